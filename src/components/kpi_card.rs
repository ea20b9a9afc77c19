//! KPI Card Component

use leptos::prelude::*;

#[component]
pub fn KpiCard(
    #[prop(into)] label: String,
    value: Signal<String>,
    #[prop(optional, into)] tone: String,
) -> impl IntoView {
    let class = if tone.is_empty() { "kpi-card".to_string() } else { format!("kpi-card kpi-{}", tone) };
    view! {
        <div class=class>
            <div class="kpi-value">{move || value.get()}</div>
            <div class="kpi-label">{label}</div>
        </div>
    }
}
