//! Reassign Dialog Component
//!
//! Modal shown after a drop on another technician's column. Confirm stays
//! disabled until a handover reason is typed.

use chrono::Utc;
use leptos::prelude::*;

use crate::components::board_dnd::use_board_dnd;
use crate::context::use_app_context;
use crate::loaders::spawn_board_change;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ReassignDialog() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let draft = use_board_dnd().draft;

    let member_name = move |id: Option<&crate::models::MemberId>| -> String {
        match id {
            None => "Unassigned".to_string(),
            Some(id) => store
                .team()
                .with(|team| team.iter().find(|m| &m.id == id).map(|m| m.name.clone()))
                .unwrap_or_else(|| id.to_string()),
        }
    };

    // Only re-render the modal when a different draft opens, not per keystroke
    let open = Memo::new(move |_| {
        draft.with(|d| d.as_ref().map(|d| (d.ticket_title.clone(), d.from.clone(), d.to.clone())))
    });
    let reason = move || draft.with(|d| d.as_ref().map(|d| d.reason().to_string()).unwrap_or_default());

    let can_confirm = move || draft.with(|d| d.as_ref().map_or(false, |d| d.can_confirm()));

    let on_confirm = move |_| {
        let Some(current) = draft.get_untracked() else { return };
        match current.into_change(&ctx.operator(), Utc::now()) {
            Some(change) => {
                draft.set(None);
                spawn_board_change(store, ctx.toasts, change);
            }
            None => ctx.toasts.error("A handover reason is required"),
        }
    };

    view! {
        {move || {
            open
                .get()
                .map(|(title, from, to)| {
                    let from = member_name(from.as_ref());
                    let to = member_name(Some(&to));
                    view! {
                        <div class="modal-backdrop" on:click=move |_| draft.set(None)>
                            <div class="modal" on:click=|ev| ev.stop_propagation()>
                                <h3>"Reassign ticket"</h3>
                                <p class="modal-subtitle">
                                    <strong>{title}</strong>
                                    " · " {from} " → " {to}
                                </p>
                                <label class="field">
                                    <span class="field-label">"Handover reason"</span>
                                    <textarea
                                        rows="4"
                                        placeholder="Why is this ticket changing hands?"
                                        prop:value=reason
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            draft.update(|d| {
                                                if let Some(d) = d {
                                                    d.set_reason(value);
                                                }
                                            });
                                        }
                                    ></textarea>
                                </label>
                                <div class="modal-actions">
                                    <button class="btn" on:click=move |_| draft.set(None)>"Cancel"</button>
                                    <button
                                        class="btn btn-primary"
                                        prop:disabled=move || !can_confirm()
                                        on:click=on_confirm
                                    >
                                        "Reassign"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
