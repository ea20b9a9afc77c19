//! Dashboard page: headline KPIs and technician workload.

use chrono::Utc;
use leptos::prelude::*;

use crate::components::KpiCard;
use crate::kpi::{billing_summary, connection_kpis, lead_kpis, ticket_kpis, workload};
use crate::models::ConnectionStatus;
use crate::store::{use_app_store, AppStateStoreFields};

fn money(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

fn percent(rate: Option<f64>) -> String {
    rate.map_or_else(|| "–".to_string(), |r| format!("{:.0}%", r * 100.0))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_app_store();
    let today = Utc::now().date_naive();

    let tickets = Memo::new(move |_| store.board().with(|b| ticket_kpis(b.tickets(), today)));
    let connections = Memo::new(move |_| store.connections().with(|c| connection_kpis(c)));
    let leads = Memo::new(move |_| store.leads().with(|l| lead_kpis(l)));
    let billing = Memo::new(move |_| store.invoices().with(|i| billing_summary(i, today)));
    let load = Memo::new(move |_| {
        let team = store.team().get();
        store.board().with(|b| workload(b.tickets(), &team))
    });

    view! {
        <div class="page dashboard-page">
            <h1>"Dashboard"</h1>

            <section class="kpi-grid">
                <KpiCard label="Open tickets" value=Signal::derive(move || tickets.get().open.to_string()) />
                <KpiCard
                    label="Urgent & open"
                    tone="danger"
                    value=Signal::derive(move || tickets.get().urgent_open.to_string())
                />
                <KpiCard
                    label="Unassigned"
                    tone="warning"
                    value=Signal::derive(move || tickets.get().unassigned_open.to_string())
                />
                <KpiCard label="Resolved today" value=Signal::derive(move || tickets.get().resolved_today.to_string()) />
                <KpiCard
                    label="Mean resolution"
                    value=Signal::derive(move || {
                        tickets.get().mean_resolution_hours.map_or_else(|| "–".to_string(), |h| format!("{:.1} h", h))
                    })
                />
            </section>

            <section class="kpi-grid">
                <KpiCard
                    label="Active connections"
                    tone="success"
                    value=Signal::derive(move || connections.get().count(ConnectionStatus::Active).to_string())
                />
                <KpiCard
                    label="Pending installs"
                    value=Signal::derive(move || connections.get().count(ConnectionStatus::Pending).to_string())
                />
                <KpiCard label="Lead conversion" value=Signal::derive(move || percent(leads.get().conversion_rate)) />
                <KpiCard label="Collected" tone="success" value=Signal::derive(move || money(billing.get().collected)) />
                <KpiCard label="Outstanding" tone="warning" value=Signal::derive(move || money(billing.get().outstanding)) />
                <KpiCard
                    label="Overdue invoices"
                    tone="danger"
                    value=Signal::derive(move || billing.get().overdue_count.to_string())
                />
            </section>

            <div class="dashboard-columns">
                <section class="panel">
                    <h2>"Tickets by status"</h2>
                    <table class="table">
                        <tbody>
                            {move || {
                                tickets
                                    .get()
                                    .by_status
                                    .into_iter()
                                    .map(|(status, n)| {
                                        view! {
                                            <tr>
                                                <td>{crate::components::status_badge::ticket_badge(status)}</td>
                                                <td class="num">{n}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </section>

                <section class="panel">
                    <h2>"Technician workload"</h2>
                    <table class="table">
                        <thead>
                            <tr><th>"Member"</th><th class="num">"Open tickets"</th></tr>
                        </thead>
                        <tbody>
                            {move || {
                                load.get()
                                    .into_iter()
                                    .map(|(_, name, open)| view! { <tr><td>{name}</td><td class="num">{open}</td></tr> })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </section>

                <section class="panel">
                    <h2>"Leads"</h2>
                    <table class="table">
                        <tbody>
                            {move || {
                                leads
                                    .get()
                                    .by_status
                                    .into_iter()
                                    .map(|(status, n)| view! { <tr><td>{status.as_str()}</td><td class="num">{n}</td></tr> })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </section>
            </div>
        </div>
    }
}
