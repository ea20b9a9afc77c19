//! Board Column Component

use leptos::prelude::*;
use leptos_dragdrop::{make_on_column_mouseenter, make_on_column_mouseleave};

use crate::board::{Column, ColumnKey};
use crate::components::board_dnd::use_board_dnd;
use crate::components::ticket_card::TicketCard;
use crate::models::TeamMember;

#[component]
pub fn BoardColumn(column: Column, team: Vec<TeamMember>) -> impl IntoView {
    let dnd = use_board_dnd().dnd;
    let len = column.tickets.len();
    let key = column.key.clone();

    let on_mouseenter = make_on_column_mouseenter(dnd, key.clone(), move || len);
    let on_mouseleave = make_on_column_mouseleave(dnd);

    // Unassigned is shown on the team board but never accepts a drop
    let accepts_drop = !matches!(key, ColumnKey::Assignee(None));
    let target_key = key.clone();
    let column_class = move || {
        let mut c = String::from("board-column");
        if accepts_drop && dnd.drag_active() && dnd.is_target_column(&target_key) {
            c.push_str(" drop-target");
        }
        if !accepts_drop && dnd.drag_active() {
            c.push_str(" drop-disabled");
        }
        c
    };

    let show_assignee = matches!(key, ColumnKey::Status(_));
    let cards = column
        .tickets
        .into_iter()
        .enumerate()
        .map(|(index, ticket)| {
            let assignee_name = if show_assignee {
                Some(
                    ticket
                        .assigned_to
                        .as_ref()
                        .and_then(|id| team.iter().find(|m| &m.id == id))
                        .map_or_else(|| "Unassigned".to_string(), |m| m.name.clone()),
                )
            } else {
                None
            };
            view! {
                <TicketCard ticket=ticket column=key.clone() index=index assignee_name=assignee_name />
            }
        })
        .collect_view();

    view! {
        <section class=column_class on:mouseenter=on_mouseenter on:mouseleave=on_mouseleave>
            <header class="board-column-header">
                <span class="board-column-title">{column.title}</span>
                <span class="board-column-count">{len}</span>
            </header>
            <div class="board-column-body">
                {cards}
                {(len == 0).then(|| view! { <div class="board-column-empty">"No tickets"</div> })}
            </div>
        </section>
    }
}
