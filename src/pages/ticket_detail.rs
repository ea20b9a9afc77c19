//! Ticket detail page: description, status, assignment history.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

use crate::api;
use crate::board::TicketChange;
use crate::components::status_badge::{priority_badge, ticket_badge};
use crate::context::use_app_context;
use crate::loaders::spawn_board_change;
use crate::markdown::{render_markdown, render_markdown_inline};
use crate::models::{MemberId, TicketId, TicketStatus};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TicketDetailPage() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let params = use_params_map();

    let ticket_id = Memo::new(move |_| TicketId::from(params.with(|p| p.get("id").unwrap_or_default())));
    let ticket = Memo::new(move |_| ticket_id.with(|id| store.board().with(|b| b.ticket(id).cloned())));
    let pending = Memo::new(move |_| ticket_id.with(|id| store.board().with(|b| b.is_pending(id))));

    // Deep link before the list arrived: fetch just this one
    Effect::new(move |_| {
        let id = ticket_id.get();
        if id.as_str().is_empty() || ticket.with_untracked(Option::is_some) {
            return;
        }
        spawn_local(async move {
            match api::get_ticket(&id).await {
                Ok(t) => store.board().write().upsert(t),
                Err(e) => ctx.toasts.error(format!("Could not load ticket {}: {}", id, e)),
            }
        });
    });

    let member_name = move |id: Option<&MemberId>| -> String {
        match id {
            None => "Unassigned".to_string(),
            Some(id) => store
                .team()
                .with(|team| team.iter().find(|m| &m.id == id).map(|m| m.name.clone()))
                .unwrap_or_else(|| id.to_string()),
        }
    };
    let customer_name = move |id: &crate::models::CustomerId| -> String {
        store
            .customers()
            .with(|cs| cs.iter().find(|c| &c.id == id).map(|c| c.name.clone()))
            .unwrap_or_else(|| id.to_string())
    };

    let on_status = move |ev: leptos::ev::Event| {
        let Ok(status) = event_target_value(&ev).parse::<TicketStatus>() else { return };
        let id = ticket_id.get_untracked();
        if ticket.with_untracked(|t| t.as_ref().map(|t| t.status)) == Some(status) {
            return;
        }
        spawn_board_change(store, ctx.toasts, TicketChange::Status { ticket_id: id, status, at: Utc::now() });
    };

    view! {
        <div class="page ticket-detail-page">
            <a class="back-link" href="/tickets">"← Board"</a>
            {move || match ticket.get() {
                None => view! { <p class="muted">"Loading ticket…"</p> }.into_any(),
                Some(t) => {
                    let description = if t.description.trim().is_empty() {
                        "<p class=\"muted\">No description</p>".to_string()
                    } else {
                        render_markdown(&t.description)
                    };
                    let customer = t.customer.clone().map(|c| {
                        let href = format!("/customers/{}", c);
                        view! { <a href=href>{customer_name(&c)}</a> }
                    });
                    let history = t
                        .assignment_history
                        .iter()
                        .rev()
                        .map(|r| {
                            let note = render_markdown_inline(&r.note);
                            view! {
                                <li class="history-entry">
                                    <div class="history-head">
                                        <strong>{member_name(r.assigned_to.as_ref())}</strong>
                                        " · by " {r.assigned_by.clone()} " · "
                                        {r.assigned_at.format("%Y-%m-%d %H:%M").to_string()}
                                    </div>
                                    <div class="history-note" inner_html=note></div>
                                </li>
                            }
                        })
                        .collect_view();
                    view! {
                        <header class="page-header">
                            <h1>{t.title.clone()}</h1>
                            {ticket_badge(t.status)}
                            {priority_badge(t.priority)}
                            <Show when=move || pending.get()>
                                <span class="ticket-saving">"saving…"</span>
                            </Show>
                        </header>
                        <div class="detail-grid">
                            <section class="panel">
                                <h2>"Description"</h2>
                                <div class="markdown" inner_html=description></div>
                            </section>
                            <aside class="panel">
                                <dl class="facts">
                                    <dt>"Ticket"</dt><dd>{t.id.to_string()}</dd>
                                    <dt>"Customer"</dt><dd>{customer}</dd>
                                    <dt>"Assigned to"</dt><dd>{member_name(t.assigned_to.as_ref())}</dd>
                                    <dt>"Opened"</dt><dd>{t.created_at.format("%Y-%m-%d %H:%M").to_string()}</dd>
                                    <dt>"Resolved"</dt>
                                    <dd>{t.resolved_at.map(|r| r.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "–".into())}</dd>
                                </dl>
                                <label class="field">
                                    <span class="field-label">"Status"</span>
                                    <select prop:value=t.status.as_str() on:change=on_status>
                                        {TicketStatus::ALL
                                            .iter()
                                            .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                                            .collect_view()}
                                    </select>
                                </label>
                                <p class="muted">"Reassign by dragging the card on the technician board."</p>
                            </aside>
                        </div>
                        <section class="panel">
                            <h2>"Assignment history"</h2>
                            {if t.assignment_history.is_empty() {
                                view! { <p class="muted">"Never reassigned"</p> }.into_any()
                            } else {
                                view! { <ul class="history">{history}</ul> }.into_any()
                            }}
                        </section>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
