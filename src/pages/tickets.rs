//! Tickets page: the Kanban board, its filters, and the new-ticket form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::board::{group_tickets, BoardView};
use crate::components::{enum_options, use_board_dnd, BoardColumn, Field, ReassignDialog, SelectField};
use crate::context::use_app_context;
use crate::filters::TicketFilter;
use crate::forms::TicketForm;
use crate::models::{AreaId, MemberId, Priority};
use crate::store::{store_load_state, use_app_store, AppStateStoreFields, Resource};
use crate::validation::ValidationErrors;

#[component]
fn NewTicketForm(on_done: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let form = RwSignal::new(TicketForm::default());
    let errors = RwSignal::new(ValidationErrors::new());
    let busy = RwSignal::new(false);

    let customer_options = move || {
        let mut opts = vec![(String::new(), "No customer".to_string())];
        opts.extend(store.customers().with(|cs| {
            cs.iter().map(|c| (c.id.to_string(), format!("{} ({})", c.name, c.phone))).collect::<Vec<_>>()
        }));
        opts
    };
    let area_options = move || {
        let mut opts = vec![(String::new(), "No area".to_string())];
        opts.extend(store.areas().with(|a| a.iter().map(|a| (a.id.to_string(), a.name.clone())).collect::<Vec<_>>()));
        opts
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let payload = match form.get_untracked().validate() {
            Ok(p) => p,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(ValidationErrors::new());
        busy.set(true);
        spawn_local(async move {
            match api::create_ticket(&payload).await {
                Ok(ticket) => {
                    store.board().write().upsert(ticket);
                    ctx.toasts.success("Ticket created");
                    form.set(TicketForm::default());
                    on_done.run(());
                }
                Err(e) => ctx.toasts.error(format!("Could not create ticket: {}", e)),
            }
            busy.set(false);
        });
    };

    view! {
        <form class="panel form-grid" on:submit=on_submit>
            <Field
                label="Title"
                name="title"
                errors=errors
                value=Signal::derive(move || form.with(|f| f.title.clone()))
                on_input=move |v: String| form.update(|f| f.title = v)
            />
            <SelectField
                label="Priority"
                options=enum_options(Priority::ALL)
                value=Signal::derive(move || form.with(|f| f.priority.clone()))
                on_change=move |v: String| form.update(|f| f.priority = v)
            />
            {move || view! {
                <SelectField
                    label="Customer"
                    options=customer_options()
                    value=Signal::derive(move || form.with(|f| f.customer.clone()))
                    on_change=move |v: String| form.update(|f| f.customer = v)
                />
                <SelectField
                    label="Area"
                    options=area_options()
                    value=Signal::derive(move || form.with(|f| f.area.clone()))
                    on_change=move |v: String| form.update(|f| f.area = v)
                />
            }}
            <label class="field field-wide">
                <span class="field-label">"Description (Markdown)"</span>
                <textarea
                    rows="4"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </label>
            <div class="form-actions">
                <button type="button" class="btn" on:click=move |_| on_done.run(())>"Cancel"</button>
                <button type="submit" class="btn btn-primary" prop:disabled=move || busy.get()>"Create ticket"</button>
            </div>
        </form>
    }
}

#[component]
pub fn TicketsPage() -> impl IntoView {
    let store = use_app_store();
    let board_ctx = use_board_dnd();
    let view_mode = board_ctx.view;

    let filter = RwSignal::new(TicketFilter::default());
    let creating = RwSignal::new(false);

    let columns = Memo::new(move |_| {
        let team = store.team().get();
        let view = view_mode.get();
        filter.with(|f| store.board().with(|b| group_tickets(&f.apply(b.tickets()), view, &team)))
    });

    let load_state = move || store_load_state(&store, Resource::Tickets);

    let view_button = move |mode: BoardView, label: &'static str| {
        view! {
            <button
                class=move || if view_mode.get() == mode { "btn btn-toggle active" } else { "btn btn-toggle" }
                on:click=move |_| view_mode.set(mode)
            >
                {label}
            </button>
        }
    };

    let priority_options = {
        let mut opts = vec![(String::new(), "Any priority".to_string())];
        opts.extend(enum_options(Priority::ALL));
        opts
    };

    view! {
        <div class="page tickets-page">
            <header class="page-header">
                <h1>"Tickets"</h1>
                <div class="view-toggle">
                    {view_button(BoardView::Status, "By status")}
                    {view_button(BoardView::Team, "By technician")}
                </div>
                <button class="btn btn-primary" on:click=move |_| creating.update(|c| *c = !*c)>"+ New ticket"</button>
            </header>

            <Show when=move || creating.get()>
                <NewTicketForm on_done=Callback::new(move |_| creating.set(false)) />
            </Show>

            <div class="filter-bar">
                <input
                    type="search"
                    placeholder="Search tickets…"
                    prop:value=move || filter.with(|f| f.query.clone())
                    on:input=move |ev| filter.update(|f| f.query = event_target_value(&ev))
                />
                <select
                    prop:value=move || filter.with(TicketFilter::priority_value)
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.priority = value.parse::<Priority>().ok());
                    }
                >
                    {priority_options
                        .into_iter()
                        .map(|(v, t)| view! { <option value=v>{t}</option> })
                        .collect_view()}
                </select>
                <select
                    prop:value=move || filter.with(TicketFilter::area_value)
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.area = (!value.is_empty()).then(|| AreaId::from(value)));
                    }
                >
                    <option value="">"Any area"</option>
                    {move || store.areas().with(|areas| {
                        areas
                            .iter()
                            .map(|a| {
                                let id = a.id.clone();
                                view! {
                                    <option
                                        value=a.id.to_string()
                                        prop:selected=move || filter.with(|f| f.area.as_ref() == Some(&id))
                                    >
                                        {a.name.clone()}
                                    </option>
                                }
                            })
                            .collect_view()
                    })}
                </select>
                <select
                    prop:value=move || filter.with(TicketFilter::assignee_value)
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| f.assignee = (!value.is_empty()).then(|| MemberId::from(value)));
                    }
                >
                    <option value="">"Anyone"</option>
                    {move || store.team().with(|team| {
                        team.iter()
                            .map(|m| {
                                let id = m.id.clone();
                                view! {
                                    <option
                                        value=m.id.to_string()
                                        prop:selected=move || filter.with(|f| f.assignee.as_ref() == Some(&id))
                                    >
                                        {m.name.clone()}
                                    </option>
                                }
                            })
                            .collect_view()
                    })}
                </select>
                <Show when=move || !filter.with(TicketFilter::is_empty)>
                    <button class="btn btn-link" on:click=move |_| filter.set(TicketFilter::default())>"Clear"</button>
                </Show>
            </div>

            {move || load_state().error().map(|e| view! { <div class="load-error">{format!("Tickets could not be loaded: {}", e)}</div> })}

            <div class="board">
                {move || {
                    let team = store.team().get();
                    columns
                        .get()
                        .into_iter()
                        .map(|column| view! { <BoardColumn column=column team=team.clone() /> })
                        .collect_view()
                }}
            </div>

            <ReassignDialog />
        </div>
    }
}
