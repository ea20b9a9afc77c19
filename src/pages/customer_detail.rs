//! Customer detail page: connections, subscriptions, invoices, tickets.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api;
use crate::components::status_badge::{connection_badge, invoice_badge, ticket_badge};
use crate::context::use_app_context;
use crate::kpi::effective_status;
use crate::loaders::load_customer_records;
use crate::models::{ConnectionId, ConnectionStatus, CustomerId};
use crate::store::{find_entity, store_upsert_connection, store_upsert_customer, use_app_store, AppStateStoreFields};

#[component]
pub fn CustomerDetailPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let params = use_params_map();
    let today = Utc::now().date_naive();

    let customer_id = Memo::new(move |_| CustomerId::from(params.with(|p| p.get("id").unwrap_or_default())));
    let customer = Memo::new(move |_| customer_id.with(|id| store.customers().with(|cs| find_entity(cs, id).cloned())));

    Effect::new(move |_| {
        let id = customer_id.get();
        if id.as_str().is_empty() {
            return;
        }
        load_customer_records(store, ctx.toasts, id.clone());
        if customer.with_untracked(Option::is_none) {
            spawn_local(async move {
                match api::get_customer(&id).await {
                    Ok(c) => store_upsert_customer(&store, c),
                    Err(e) => ctx.toasts.error(format!("Could not load customer: {}", e)),
                }
            });
        }
    });

    let connections = Memo::new(move |_| {
        customer_id.with(|id| {
            store.connections().with(|cs| cs.iter().filter(|c| &c.customer == id).cloned().collect::<Vec<_>>())
        })
    });
    let subscriptions = Memo::new(move |_| {
        customer_id.with(|id| {
            store.subscriptions().with(|s| s.iter().filter(|s| &s.customer == id).cloned().collect::<Vec<_>>())
        })
    });
    let invoices = Memo::new(move |_| {
        customer_id.with(|id| {
            store.invoices().with(|i| i.iter().filter(|i| &i.customer == id).cloned().collect::<Vec<_>>())
        })
    });
    let tickets = Memo::new(move |_| {
        customer_id.with(|id| {
            store.board().with(|b| {
                b.tickets().iter().filter(|t| t.customer.as_ref() == Some(id)).cloned().collect::<Vec<_>>()
            })
        })
    });

    let plan_name = move |id: &crate::models::PlanId| -> String {
        store
            .plans()
            .with(|p| find_entity(p, id).map(|p| format!("{} ({} Mbps)", p.name, p.speed_mbps)))
            .unwrap_or_else(|| id.to_string())
    };

    let set_connection_status = move |id: ConnectionId, status: ConnectionStatus| {
        spawn_local(async move {
            match api::update_connection_status(&id, status).await {
                Ok(c) => store_upsert_connection(&store, c),
                Err(e) => ctx.toasts.error(format!("Could not update connection: {}", e)),
            }
        });
    };

    // Onboarding resumes at the first step this customer has not finished
    let resume_href = move || {
        let id = customer_id.get();
        match connections.with(|cs| cs.first().map(|c| c.id.clone())) {
            Some(conn) if subscriptions.with(Vec::is_empty) => {
                format!("/onboarding?customer={}&connection={}", id, conn)
            }
            Some(_) => String::new(),
            None => format!("/onboarding?customer={}", id),
        }
    };

    view! {
        <div class="page customer-detail-page">
            <a class="back-link" href="/customers">"← Customers"</a>
            {move || match customer.get() {
                None => view! { <p class="muted">"Loading customer…"</p> }.into_any(),
                Some(c) => view! {
                    <header class="page-header">
                        <h1>{c.name.clone()}</h1>
                        {move || {
                            let href = resume_href();
                            (!href.is_empty()).then(|| view! { <a class="btn" href=href>"Continue onboarding"</a> })
                        }}
                    </header>
                    <dl class="facts panel">
                        <dt>"Phone"</dt><dd>{c.phone.clone()}</dd>
                        <dt>"Email"</dt><dd>{c.email.clone().unwrap_or_else(|| "–".into())}</dd>
                        <dt>"Address"</dt><dd>{c.address.clone()}</dd>
                        <dt>"Customer since"</dt><dd>{c.created_at.format("%Y-%m-%d").to_string()}</dd>
                    </dl>
                }
                    .into_any(),
            }}

            <section class="panel">
                <h2>"Connections"</h2>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Type"</th><th>"Router"</th><th>"ONT"</th><th>"MAC"</th><th>"IP"</th>
                            <th>"Installed"</th><th>"Status"</th><th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            connections
                                .get()
                                .into_iter()
                                .map(|c| {
                                    let id = c.id.clone();
                                    view! {
                                        <tr>
                                            <td>{c.connection_type.as_str()}</td>
                                            <td>{format!("{} · {}", c.router_model, c.router_serial)}</td>
                                            <td>{c.ont_serial.clone().unwrap_or_default()}</td>
                                            <td>{c.mac_address.clone().unwrap_or_default()}</td>
                                            <td>{c.ip_address.clone().unwrap_or_default()}</td>
                                            <td>{c.installation_date.map(|d| d.to_string()).unwrap_or_default()}</td>
                                            <td>{connection_badge(c.status)}</td>
                                            <td>
                                                <select
                                                    prop:value=c.status.as_str()
                                                    on:change=move |ev| {
                                                        if let Ok(status) = event_target_value(&ev).parse::<ConnectionStatus>() {
                                                            set_connection_status(id.clone(), status);
                                                        }
                                                    }
                                                >
                                                    {ConnectionStatus::ALL
                                                        .iter()
                                                        .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </section>

            <section class="panel">
                <h2>"Subscriptions"</h2>
                <table class="table">
                    <thead><tr><th>"Plan"</th><th>"Start"</th><th>"End"</th><th></th></tr></thead>
                    <tbody>
                        {move || {
                            subscriptions
                                .get()
                                .into_iter()
                                .map(|s| {
                                    let state = if s.end_date < today { "Expired" } else { "Current" };
                                    view! {
                                        <tr>
                                            <td>{plan_name(&s.plan)}</td>
                                            <td>{s.start_date.to_string()}</td>
                                            <td>{s.end_date.to_string()}</td>
                                            <td>{state}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </section>

            <div class="dashboard-columns">
                <section class="panel">
                    <h2>"Invoices"</h2>
                    <table class="table">
                        <tbody>
                            {move || {
                                invoices
                                    .get()
                                    .into_iter()
                                    .map(|i| {
                                        view! {
                                            <tr>
                                                <td>{i.issued_on.to_string()}</td>
                                                <td class="num">{format!("₹{:.2}", i.amount)}</td>
                                                <td>{invoice_badge(effective_status(&i, today))}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </section>
                <section class="panel">
                    <h2>"Tickets"</h2>
                    <ul class="plain-list">
                        {move || {
                            tickets
                                .get()
                                .into_iter()
                                .map(|t| {
                                    let href = format!("/tickets/{}", t.id);
                                    view! {
                                        <li>
                                            <a href=href>{t.title.clone()}</a>
                                            " "
                                            {ticket_badge(t.status)}
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </section>
            </div>
        </div>
    }
}
