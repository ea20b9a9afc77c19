//! Form Field Component
//!
//! Labelled text input with the validation message for its field underneath.

use leptos::prelude::*;

use crate::validation::ValidationErrors;

#[component]
pub fn Field(
    #[prop(into)] label: String,
    /// Key into `errors`
    name: &'static str,
    errors: RwSignal<ValidationErrors>,
    value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let error = move || errors.with(|e| e.get(name).map(|m| m.to_string()));

    view! {
        <label class=move || if error().is_some() { "field field-invalid" } else { "field" }>
            <span class="field-label">{label}</span>
            <input
                type=input_type.unwrap_or("text")
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error().map(|msg| view! { <span class="field-error">{msg}</span> })}
        </label>
    }
}

/// Select over a fixed list of wire values
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    options: Vec<(String, String)>,
    value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// `(value, label)` pairs for a wire enum
pub fn enum_options<T: std::fmt::Display>(all: &[T]) -> Vec<(String, String)> {
    all.iter().map(|v| (v.to_string(), v.to_string())).collect()
}
