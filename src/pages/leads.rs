//! Leads page: prospects, their status, and the hand-off into onboarding.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{deleting_signal, enum_options, status_badge::lead_badge, DeleteConfirmButton, Field, InFlight};
use crate::context::use_app_context;
use crate::filters::search_leads;
use crate::forms::LeadForm;
use crate::models::{LeadId, LeadStatus};
use crate::store::{store_remove_lead, store_upsert_lead, use_app_store, AppStateStoreFields};
use crate::validation::ValidationErrors;

#[component]
pub fn LeadsPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (query, set_query) = signal(String::new());
    let (status, set_status) = signal(None::<LeadStatus>);
    let form = RwSignal::new(LeadForm::default());
    let errors = RwSignal::new(ValidationErrors::new());

    let rows = Memo::new(move |_| {
        let status = status.get();
        query.with(|q| store.leads().with(|ls| search_leads(ls, q, status)))
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.get_untracked().validate() {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        spawn_local(async move {
            match api::create_lead(&payload).await {
                Ok(lead) => {
                    store_upsert_lead(&store, lead);
                    form.set(LeadForm::default());
                    ctx.toasts.success("Lead added");
                }
                Err(e) => ctx.toasts.error(format!("Could not add lead: {}", e)),
            }
        });
    };

    let set_lead_status = move |id: LeadId, raw: String| {
        let Ok(next) = raw.parse::<LeadStatus>() else {
            return;
        };
        spawn_local(async move {
            match api::update_lead_status(&id, next).await {
                Ok(lead) => store_upsert_lead(&store, lead),
                Err(e) => ctx.toasts.error(format!("Could not update lead: {}", e)),
            }
        });
    };

    let deleting = RwSignal::new(InFlight::default());
    let delete = move |id: LeadId| {
        if !deleting.try_update(|d| d.begin(id.as_str())).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            match api::delete_lead(&id).await {
                Ok(()) => store_remove_lead(&store, &id),
                Err(e) => ctx.toasts.error(format!("Could not delete lead: {}", e)),
            }
            deleting.update(|d| d.finish(id.as_str()));
        });
    };

    view! {
        <div class="page leads-page">
            <h1>"Leads"</h1>
            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search name, phone, address, source…"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <select on:change=move |ev| set_status.set(event_target_value(&ev).parse().ok())>
                    <option value="">"All statuses"</option>
                    {LeadStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th><th>"Phone"</th><th>"Source"</th><th>"Status"</th>
                        <th>"Since"</th><th></th><th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|l| (l.id.clone(), l.status)
                        children=move |l| {
                            let id = l.id.clone();
                            let status_id = l.id.clone();
                            let current = l.status;
                            let can_onboard = !matches!(l.status, LeadStatus::Converted | LeadStatus::Lost);
                            let onboard_href = format!("/onboarding?lead={}", l.id.as_str());
                            view! {
                                <tr>
                                    <td>
                                        {l.name.clone()}
                                        <div class="muted">{l.address.clone()}</div>
                                    </td>
                                    <td>{l.phone.clone()}</td>
                                    <td>{l.source.clone()}</td>
                                    <td>
                                        {lead_badge(l.status)}
                                        <select on:change=move |ev| set_lead_status(status_id.clone(), event_target_value(&ev))>
                                            {enum_options(LeadStatus::ALL)
                                                .into_iter()
                                                .map(|(value, label)| {
                                                    let selected = value == current.as_str();
                                                    view! { <option value=value selected=selected>{label}</option> }
                                                })
                                                .collect_view()}
                                        </select>
                                    </td>
                                    <td>{l.created_at.format("%d %b %Y").to_string()}</td>
                                    <td>
                                        {can_onboard
                                            .then(|| view! { <a class="btn btn-small" href=onboard_href>"Onboard"</a> })}
                                    </td>
                                    <td>
                                        <DeleteConfirmButton
                                            kind="lead"
                                            name=l.name.clone()
                                            busy=deleting_signal(deleting, l.id.as_str())
                                            on_confirm=Callback::new(move |_| delete(id.clone()))
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <h2>"New lead"</h2>
            <form class="panel form-grid" on:submit=on_submit>
                <Field label="Name" name="name" errors=errors
                    value=Signal::derive(move || form.with(|f| f.name.clone()))
                    on_input=move |v: String| form.update(|f| f.name = v) />
                <Field label="Phone" name="phone" errors=errors input_type="tel"
                    value=Signal::derive(move || form.with(|f| f.phone.clone()))
                    on_input=move |v: String| form.update(|f| f.phone = v) />
                <Field label="Email" name="email" errors=errors input_type="email"
                    value=Signal::derive(move || form.with(|f| f.email.clone()))
                    on_input=move |v: String| form.update(|f| f.email = v) />
                <Field label="Address" name="address" errors=errors
                    value=Signal::derive(move || form.with(|f| f.address.clone()))
                    on_input=move |v: String| form.update(|f| f.address = v) />
                <Field label="Source" name="source" errors=errors placeholder="Walk-in"
                    value=Signal::derive(move || form.with(|f| f.source.clone()))
                    on_input=move |v: String| form.update(|f| f.source = v) />
                <Field label="Note" name="note" errors=errors
                    value=Signal::derive(move || form.with(|f| f.note.clone()))
                    on_input=move |v: String| form.update(|f| f.note = v) />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary">"Add lead"</button>
                </div>
            </form>
        </div>
    }
}
