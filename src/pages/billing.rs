//! Billing page: invoices with collection totals.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{status_badge::invoice_badge, KpiCard};
use crate::context::use_app_context;
use crate::filters::filter_invoices;
use crate::kpi::{billing_summary, effective_status};
use crate::models::{InvoiceId, InvoiceStatus};
use crate::store::{store_upsert_invoice, use_app_store, AppStateStoreFields};

fn money(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

#[component]
pub fn BillingPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let today = Utc::now().date_naive();
    let (status, set_status) = signal(None::<InvoiceStatus>);

    let summary = Memo::new(move |_| store.invoices().with(|i| billing_summary(i, today)));
    let rows = Memo::new(move |_| {
        let status = status.get();
        store.invoices().with(|i| filter_invoices(i, status, today))
    });
    let customer_name = move |id: &crate::models::CustomerId| -> String {
        store
            .customers()
            .with(|cs| cs.iter().find(|c| &c.id == id).map(|c| c.name.clone()))
            .unwrap_or_else(|| id.as_str().to_string())
    };

    let mark_paid = move |id: InvoiceId| {
        spawn_local(async move {
            match api::mark_invoice_paid(&id).await {
                Ok(invoice) => {
                    store_upsert_invoice(&store, invoice);
                    ctx.toasts.success("Invoice marked paid");
                }
                Err(e) => ctx.toasts.error(format!("Could not mark invoice paid: {}", e)),
            }
        });
    };

    view! {
        <div class="page billing-page">
            <h1>"Billing"</h1>
            <section class="kpi-grid">
                <KpiCard label="Billed" value=Signal::derive(move || money(summary.get().billed)) />
                <KpiCard label="Collected" value=Signal::derive(move || money(summary.get().collected)) tone="good" />
                <KpiCard label="Outstanding" value=Signal::derive(move || money(summary.get().outstanding)) tone="warn" />
                <KpiCard
                    label="Overdue invoices"
                    value=Signal::derive(move || summary.get().overdue_count.to_string())
                    tone="bad"
                />
            </section>
            <div class="filter-bar">
                <select on:change=move |ev| set_status.set(event_target_value(&ev).parse().ok())>
                    <option value="">"All invoices"</option>
                    {InvoiceStatus::ALL
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Invoice"</th><th>"Customer"</th><th class="num">"Amount"</th>
                        <th>"Issued"</th><th>"Due"</th><th>"Status"</th><th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|i| (i.id.clone(), i.status)
                        children=move |i| {
                            let status = effective_status(&i, today);
                            let id = i.id.clone();
                            let href = format!("/customers/{}", i.customer.as_str());
                            view! {
                                <tr class={if status == InvoiceStatus::Overdue { "overdue" } else { "" }}>
                                    <td>{i.id.as_str().to_string()}</td>
                                    <td><a href=href>{customer_name(&i.customer)}</a></td>
                                    <td class="num">{money(i.amount)}</td>
                                    <td>{i.issued_on.format("%d %b %Y").to_string()}</td>
                                    <td>{i.due_on.format("%d %b %Y").to_string()}</td>
                                    <td>{invoice_badge(status)}</td>
                                    <td>
                                        {(status != InvoiceStatus::Paid)
                                            .then(|| view! {
                                                <button class="btn btn-small" on:click=move |_| mark_paid(id.clone())>
                                                    "Mark paid"
                                                </button>
                                            })}
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
