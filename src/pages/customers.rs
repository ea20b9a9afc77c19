//! Customers page: searchable list with delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{deleting_signal, DeleteConfirmButton, InFlight};
use crate::context::use_app_context;
use crate::filters::search_customers;
use crate::models::CustomerId;
use crate::store::{store_remove_customer, use_app_store, AppStateStoreFields};

#[component]
pub fn CustomersPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let (query, set_query) = signal(String::new());

    let rows = Memo::new(move |_| query.with(|q| store.customers().with(|cs| search_customers(cs, q))));
    let area_name = move |id: Option<&crate::models::AreaId>| -> String {
        id.and_then(|id| store.areas().with(|a| a.iter().find(|a| &a.id == id).map(|a| a.name.clone())))
            .unwrap_or_default()
    };

    let deleting = RwSignal::new(InFlight::default());
    let delete = move |id: CustomerId| {
        if !deleting.try_update(|d| d.begin(id.as_str())).unwrap_or(false) {
            return;
        }
        spawn_local(async move {
            match api::delete_customer(&id).await {
                Ok(()) => {
                    store_remove_customer(&store, &id);
                    ctx.toasts.success("Customer deleted");
                }
                Err(e) => ctx.toasts.error(format!("Could not delete customer: {}", e)),
            }
            deleting.update(|d| d.finish(id.as_str()));
        });
    };

    view! {
        <div class="page customers-page">
            <header class="page-header">
                <h1>"Customers"</h1>
                <a class="btn btn-primary" href="/onboarding">"+ Onboard customer"</a>
            </header>
            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search name, phone, email, address…"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <span class="muted">{move || format!("{} customers", rows.with(Vec::len))}</span>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Phone"</th>
                        <th>"Email"</th>
                        <th>"Area"</th>
                        <th>"Since"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|c| (c.id.clone(), c.name.clone(), c.phone.clone())
                        children=move |c| {
                            let id = c.id.clone();
                            let href = format!("/customers/{}", c.id);
                            view! {
                                <tr>
                                    <td><a href=href>{c.name.clone()}</a></td>
                                    <td>{c.phone.clone()}</td>
                                    <td>{c.email.clone().unwrap_or_default()}</td>
                                    <td>{area_name(c.area.as_ref())}</td>
                                    <td>{c.created_at.format("%Y-%m-%d").to_string()}</td>
                                    <td>
                                        <DeleteConfirmButton
                                            kind="customer"
                                            name=c.name.clone()
                                            busy=deleting_signal(deleting, c.id.as_str())
                                            on_confirm=Callback::new(move |_| delete(id.clone()))
                                        />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
