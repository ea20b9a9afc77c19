//! Onboarding page: the three-step customer wizard.
//!
//! `?customer=ID[&connection=ID]` resumes an unfinished onboarding;
//! `?lead=ID` prefills the profile from a lead.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

use crate::api;
use crate::components::{enum_options, Field, SelectField};
use crate::context::use_app_context;
use crate::forms::{ConnectionForm, CustomerForm, PlanSelection};
use crate::models::{ConnectionId, ConnectionType, CustomerId, LeadId};
use crate::store::{
    find_entity, store_upsert_connection, store_upsert_customer, store_upsert_subscription, use_app_store,
    AppStateStoreFields,
};
use crate::validation::ValidationErrors;
use crate::wizard::{OnboardingWizard, WizardStep};

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let query = use_query_map();

    let wizard = RwSignal::new(OnboardingWizard::new());
    let profile = RwSignal::new(CustomerForm::default());
    let connection = RwSignal::new(ConnectionForm::default());
    let selection = RwSignal::new(PlanSelection::default());
    let errors = RwSignal::new(ValidationErrors::new());
    let busy = RwSignal::new(false);

    // Resume an unfinished onboarding from the query string, once
    Effect::new(move |_| {
        let (customer, conn) = query.with_untracked(|q| (q.get("customer"), q.get("connection")));
        if let Some(customer) = customer.filter(|c| !c.is_empty()) {
            wizard.set(OnboardingWizard::resume(
                CustomerId::from(customer),
                conn.filter(|c| !c.is_empty()).map(ConnectionId::from),
            ));
        }
    });

    // Prefill from a lead. Leads may still be loading, so keep watching them
    // until the lead turns up; anything the operator typed meanwhile is kept.
    let prefilled = StoredValue::new(false);
    Effect::new(move |_| {
        if prefilled.get_value() {
            return;
        }
        let (customer, lead) = query.with_untracked(|q| (q.get("customer"), q.get("lead")));
        if customer.is_some_and(|c| !c.is_empty()) {
            return;
        }
        let Some(lead_id) = lead.filter(|l| !l.is_empty()).map(LeadId::from) else {
            return;
        };
        let Some(lead) = store.leads().with(|ls| find_entity(ls, &lead_id).cloned()) else {
            return;
        };
        prefilled.set_value(true);
        if profile.with_untracked(|p| *p == CustomerForm::default()) {
            profile.set(CustomerForm::from_lead(&lead));
        }
    });

    let step = Memo::new(move |_| wizard.with(|w| w.step()));

    let go_to = move |target: WizardStep| {
        errors.set(ValidationErrors::new());
        let mut w = wizard.get_untracked();
        match w.go_to(target) {
            Ok(()) => wizard.set(w),
            Err(e) => ctx.toasts.info(e.to_string()),
        }
    };

    // ===== Step 1 =====
    let submit_profile = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        // Already created: moving forward does not create a second customer
        if wizard.with_untracked(|w| w.customer_id().is_some()) {
            go_to(WizardStep::Connection);
            return;
        }
        let payload = match profile.get_untracked().validate() {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        busy.set(true);
        spawn_local(async move {
            match api::create_customer(&payload).await {
                Ok(customer) => {
                    let id = customer.id.clone();
                    store_upsert_customer(&store, customer);
                    wizard.update(|w| w.profile_saved(id));
                }
                Err(e) => ctx.toasts.error(format!("Could not save customer: {}", e)),
            }
            busy.set(false);
        });
    };

    // ===== Step 2 =====
    let submit_connection = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let customer = match wizard.with_untracked(|w| w.require_customer().cloned()) {
            Ok(c) => c,
            Err(e) => return ctx.toasts.error(e.to_string()),
        };
        if wizard.with_untracked(|w| w.connection_id().is_some()) {
            go_to(WizardStep::Plan);
            return;
        }
        let payload = match connection.get_untracked().validate(&customer) {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        busy.set(true);
        spawn_local(async move {
            match api::create_connection(&payload).await {
                Ok(conn) => {
                    let id = conn.id.clone();
                    store_upsert_connection(&store, conn);
                    let mut w = wizard.get_untracked();
                    match w.connection_saved(id) {
                        Ok(()) => wizard.set(w),
                        Err(e) => ctx.toasts.error(e.to_string()),
                    }
                }
                Err(e) => ctx.toasts.error(format!("Could not save connection: {}", e)),
            }
            busy.set(false);
        });
    };

    // ===== Step 3 =====
    let submit_plan = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (customer, conn) = match wizard.with_untracked(|w| {
            w.require_connection().map(|(c, n)| (c.clone(), n.clone()))
        }) {
            Ok(ids) => ids,
            Err(e) => return ctx.toasts.error(e.to_string()),
        };
        let today = Utc::now().date_naive();
        let payload = match selection.get_untracked().validate(&customer, &conn, today) {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        busy.set(true);
        spawn_local(async move {
            match api::create_subscription(&payload).await {
                Ok(sub) => {
                    let id = sub.id.clone();
                    store_upsert_subscription(&store, sub);
                    let mut w = wizard.get_untracked();
                    match w.plan_saved(id) {
                        Ok(()) => {
                            wizard.set(w);
                            ctx.toasts.success("Customer onboarded");
                        }
                        Err(e) => ctx.toasts.error(e.to_string()),
                    }
                }
                Err(e) => ctx.toasts.error(format!("Could not start subscription: {}", e)),
            }
            busy.set(false);
        });
    };

    let restart = move |_| {
        wizard.update(|w| w.restart());
        profile.set(CustomerForm::default());
        connection.set(ConnectionForm::default());
        selection.set(PlanSelection::default());
        errors.set(ValidationErrors::new());
    };

    let area_options = move || {
        let mut opts = vec![(String::new(), "No area".to_string())];
        opts.extend(store.areas().with(|a| a.iter().map(|a| (a.id.to_string(), a.name.clone())).collect::<Vec<_>>()));
        opts
    };

    let stepper = move || {
        WizardStep::STEPS
            .iter()
            .map(|s| {
                let s = *s;
                let class = move || {
                    let w = wizard.get();
                    let mut c = String::from("wizard-step");
                    if w.step() == s { c.push_str(" current"); }
                    if w.is_complete(s) { c.push_str(" complete"); }
                    if !w.is_unlocked(s) { c.push_str(" locked"); }
                    c
                };
                view! {
                    <button class=class on:click=move |_| go_to(s)>
                        <span class="wizard-step-number">{s.number()}</span>
                        {s.title()}
                    </button>
                }
            })
            .collect_view()
    };

    let profile_step = move || {
        let saved = wizard.with(|w| w.customer_id().is_some());
        view! {
            <form class="panel form-grid" on:submit=submit_profile>
                {saved.then(|| view! { <p class="notice field-wide">"Customer saved. Continue to the connection details."</p> })}
                <Field label="Full name" name="name" errors=errors
                    value=Signal::derive(move || profile.with(|f| f.name.clone()))
                    on_input=move |v: String| profile.update(|f| f.name = v) />
                <Field label="Phone" name="phone" errors=errors input_type="tel"
                    value=Signal::derive(move || profile.with(|f| f.phone.clone()))
                    on_input=move |v: String| profile.update(|f| f.phone = v) />
                <Field label="Email" name="email" errors=errors input_type="email"
                    value=Signal::derive(move || profile.with(|f| f.email.clone()))
                    on_input=move |v: String| profile.update(|f| f.email = v) />
                <Field label="Installation address" name="address" errors=errors
                    value=Signal::derive(move || profile.with(|f| f.address.clone()))
                    on_input=move |v: String| profile.update(|f| f.address = v) />
                <SelectField label="Area" options=area_options()
                    value=Signal::derive(move || profile.with(|f| f.area.clone()))
                    on_change=move |v: String| profile.update(|f| f.area = v) />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" prop:disabled=move || busy.get()>
                        {if saved { "Next" } else { "Save & continue" }}
                    </button>
                </div>
            </form>
        }
    };

    let connection_step = move || {
        let saved = wizard.with(|w| w.connection_id().is_some());
        view! {
            <form class="panel form-grid" on:submit=submit_connection>
                <SelectField label="Connection type" options=enum_options(ConnectionType::ALL)
                    value=Signal::derive(move || connection.with(|f| f.connection_type.clone()))
                    on_change=move |v: String| connection.update(|f| f.connection_type = v) />
                <Field label="Router model" name="routerModel" errors=errors
                    value=Signal::derive(move || connection.with(|f| f.router_model.clone()))
                    on_input=move |v: String| connection.update(|f| f.router_model = v) />
                <Field label="Router serial" name="routerSerial" errors=errors
                    value=Signal::derive(move || connection.with(|f| f.router_serial.clone()))
                    on_input=move |v: String| connection.update(|f| f.router_serial = v) />
                <Field label="ONT serial" name="ontSerial" errors=errors
                    value=Signal::derive(move || connection.with(|f| f.ont_serial.clone()))
                    on_input=move |v: String| connection.update(|f| f.ont_serial = v) />
                <Field label="MAC address" name="macAddress" errors=errors placeholder="AA:BB:CC:DD:EE:FF"
                    value=Signal::derive(move || connection.with(|f| f.mac_address.clone()))
                    on_input=move |v: String| connection.update(|f| f.mac_address = v) />
                <Field label="IP address" name="ipAddress" errors=errors placeholder="10.0.0.1"
                    value=Signal::derive(move || connection.with(|f| f.ip_address.clone()))
                    on_input=move |v: String| connection.update(|f| f.ip_address = v) />
                <Field label="Installation date" name="installationDate" errors=errors input_type="date"
                    value=Signal::derive(move || connection.with(|f| f.installation_date.clone()))
                    on_input=move |v: String| connection.update(|f| f.installation_date = v) />
                <SelectField label="Area" options=area_options()
                    value=Signal::derive(move || connection.with(|f| f.area.clone()))
                    on_change=move |v: String| connection.update(|f| f.area = v) />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| wizard.update(|w| w.back())>"Back"</button>
                    <button type="submit" class="btn btn-primary" prop:disabled=move || busy.get()>
                        {if saved { "Next" } else { "Save & continue" }}
                    </button>
                </div>
            </form>
        }
    };

    let plan_step = move || {
        let plans = store.plans().with(|ps| ps.iter().filter(|p| p.active).cloned().collect::<Vec<_>>());
        view! {
            <form class="panel" on:submit=submit_plan>
                <div class="plan-picker">
                    {plans
                        .into_iter()
                        .map(|p| {
                            let id = p.id.to_string();
                            let pick = id.clone();
                            let selected = move || selection.with(|s| s.plan == id);
                            let checked = selected.clone();
                            view! {
                                <label class=move || if selected() { "plan-option selected" } else { "plan-option" }>
                                    <input
                                        type="radio"
                                        name="plan"
                                        prop:checked=checked
                                        on:change=move |_| selection.update(|s| s.plan = pick.clone())
                                    />
                                    <strong>{p.name.clone()}</strong>
                                    <span>{format!("{} Mbps", p.speed_mbps)}</span>
                                    <span>{format!("₹{:.2} / {} days", p.price, p.validity_days)}</span>
                                    <span>{p.data_limit_gb.map_or_else(|| "Unlimited".to_string(), |gb| format!("{} GB", gb))}</span>
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
                {move || errors.with(|e| e.get("plan").map(|m| view! { <p class="field-error">{format!("Plan {}", m)}</p> }))}
                <Field label="Start date" name="startDate" errors=errors input_type="date"
                    value=Signal::derive(move || selection.with(|f| f.start_date.clone()))
                    on_input=move |v: String| selection.update(|f| f.start_date = v) />
                <div class="form-actions">
                    <button type="button" class="btn" on:click=move |_| wizard.update(|w| w.back())>"Back"</button>
                    <button type="submit" class="btn btn-primary" prop:disabled=move || busy.get()>"Activate plan"</button>
                </div>
            </form>
        }
    };

    let done_step = move || {
        let href = wizard.with(|w| w.customer_id().map(|c| format!("/customers/{}", c)).unwrap_or_default());
        view! {
            <div class="panel wizard-done">
                <h2>"All set"</h2>
                <p>"The customer, connection and subscription are saved."</p>
                <a class="btn" href=href>"Open customer"</a>
                <button class="btn btn-primary" on:click=restart>"Onboard another"</button>
            </div>
        }
    };

    view! {
        <div class="page onboarding-page">
            <header class="page-header">
                <h1>"Onboard a customer"</h1>
                <button class="btn btn-link" on:click=restart>"Start over"</button>
            </header>
            <nav class="wizard-steps">{stepper}</nav>
            {move || match step.get() {
                WizardStep::Profile => profile_step().into_any(),
                WizardStep::Connection => connection_step().into_any(),
                WizardStep::Plan => plan_step().into_any(),
                WizardStep::Done => done_step().into_any(),
            }}
        </div>
    }
}
