//! Plans page: catalog list, create, toggle active, delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{deleting_signal, DeleteConfirmButton, Field, InFlight};
use crate::context::use_app_context;
use crate::forms::PlanForm;
use crate::models::{Plan, PlanId};
use crate::store::{store_remove_plan, store_upsert_plan, use_app_store, AppStateStoreFields};
use crate::validation::ValidationErrors;

#[component]
pub fn PlansPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let form = RwSignal::new(PlanForm::default());
    let errors = RwSignal::new(ValidationErrors::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.get_untracked().validate() {
            Ok(p) => p,
            Err(e) => return errors.set(e),
        };
        errors.set(ValidationErrors::new());
        spawn_local(async move {
            match api::create_plan(&payload).await {
                Ok(plan) => {
                    store_upsert_plan(&store, plan);
                    form.set(PlanForm::default());
                    ctx.toasts.success("Plan added");
                }
                Err(e) => ctx.toasts.error(format!("Could not add plan: {}", e)),
            }
        });
    };

    let toggle = move |plan: Plan| {
        spawn_local(async move {
            match api::set_plan_active(&plan.id, !plan.active).await {
                Ok(updated) => store_upsert_plan(&store, updated),
                Err(e) => ctx.toasts.error(format!("Could not update plan: {}", e)),
            }
        });
    };

    let deleting = RwSignal::new(InFlight::default());
    let delete = move |id: PlanId| {
        if !deleting.try_update(|d| d.begin(id.as_str())).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            match api::delete_plan(&id).await {
                Ok(()) => store_remove_plan(&store, &id),
                Err(e) => ctx.toasts.error(format!("Could not delete plan: {}", e)),
            }
            deleting.update(|d| d.finish(id.as_str()));
        });
    };

    view! {
        <div class="page plans-page">
            <h1>"Plans"</h1>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th><th class="num">"Speed"</th><th class="num">"Price"</th>
                        <th class="num">"Validity"</th><th class="num">"Data"</th><th>"Active"</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.plans().get()
                        key=|p| (p.id.clone(), p.active, p.name.clone())
                        children=move |p| {
                            let id = p.id.clone();
                            let plan = p.clone();
                            view! {
                                <tr class={if p.active { "" } else { "inactive" }}>
                                    <td>{p.name.clone()}</td>
                                    <td class="num">{format!("{} Mbps", p.speed_mbps)}</td>
                                    <td class="num">{format!("₹{:.2}", p.price)}</td>
                                    <td class="num">{format!("{} days", p.validity_days)}</td>
                                    <td class="num">{p.data_limit_gb.map_or_else(|| "Unlimited".to_string(), |gb| format!("{} GB", gb))}</td>
                                    <td>
                                        <input type="checkbox" prop:checked=p.active on:change=move |_| toggle(plan.clone()) />
                                    </td>
                                    <td>
                                        <DeleteConfirmButton
                                            kind="plan"
                                            name=p.name.clone()
                                            busy=deleting_signal(deleting, p.id.as_str())
                                            on_confirm=Callback::new(move |_| delete(id.clone()))
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <h2>"New plan"</h2>
            <form class="panel form-grid" on:submit=on_submit>
                <Field label="Name" name="name" errors=errors
                    value=Signal::derive(move || form.with(|f| f.name.clone()))
                    on_input=move |v: String| form.update(|f| f.name = v) />
                <Field label="Speed (Mbps)" name="speedMbps" errors=errors input_type="number"
                    value=Signal::derive(move || form.with(|f| f.speed_mbps.clone()))
                    on_input=move |v: String| form.update(|f| f.speed_mbps = v) />
                <Field label="Price" name="price" errors=errors input_type="number"
                    value=Signal::derive(move || form.with(|f| f.price.clone()))
                    on_input=move |v: String| form.update(|f| f.price = v) />
                <Field label="Validity (days)" name="validityDays" errors=errors input_type="number"
                    value=Signal::derive(move || form.with(|f| f.validity_days.clone()))
                    on_input=move |v: String| form.update(|f| f.validity_days = v) />
                <Field label="Data limit (GB)" name="dataLimitGb" errors=errors input_type="number"
                    placeholder="Blank = unlimited"
                    value=Signal::derive(move || form.with(|f| f.data_limit_gb.clone()))
                    on_input=move |v: String| form.update(|f| f.data_limit_gb = v) />
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary">"Add plan"</button>
                </div>
            </form>
        </div>
    }
}
