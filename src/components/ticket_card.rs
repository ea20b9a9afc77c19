//! Ticket Card Component
//!
//! One draggable card on the board.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_card_mousedown, make_on_card_mouseenter, DragSource};
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::board::ColumnKey;
use crate::components::board_dnd::use_board_dnd;
use crate::components::status_badge::priority_badge;
use crate::models::Ticket;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TicketCard(
    ticket: Ticket,
    column: ColumnKey,
    index: usize,
    /// Shown on the status board; None on the team board
    assignee_name: Option<String>,
) -> impl IntoView {
    let store = use_app_store();
    let dnd = use_board_dnd().dnd;
    let navigate = use_navigate();

    let id = ticket.id.clone();
    let card_id = id.as_str().to_string();

    let is_drop_before = {
        let column = column.clone();
        move || {
            dnd.drop_target_read
                .with(|t| t.as_ref().map_or(false, |t| t.column == column && t.index == index))
        }
    };

    let source = DragSource { card_id: card_id.clone(), column: column.clone(), index };
    let on_mousedown = make_on_card_mousedown(dnd, source);
    let on_mouseenter = make_on_card_mouseenter(dnd, column, index);

    let pending_id = id.clone();
    let is_pending = Memo::new(move |_| store.board().with(|b| b.is_pending(&pending_id)));
    let is_dragging = move || dnd.is_dragging(&card_id);

    let card_class = move || {
        let mut c = String::from("ticket-card");
        if is_pending.get() { c.push_str(" pending"); }
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_before() { c.push_str(" drop-before"); }
        c
    };

    let href = format!("/tickets/{}", id);
    let on_click = move |_| {
        // Releasing a drag also fires click
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        navigate(&href, NavigateOptions::default());
    };

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:click=on_click
        >
            <div class="ticket-card-head">
                <span class="ticket-id">{ticket.id.to_string()}</span>
                {priority_badge(ticket.priority)}
            </div>
            <div class="ticket-title">{ticket.title.clone()}</div>
            {assignee_name.map(|name| view! { <div class="ticket-assignee">{name}</div> })}
            <Show when=move || is_pending.get()>
                <span class="ticket-saving">"saving…"</span>
            </Show>
        </div>
    }
}
