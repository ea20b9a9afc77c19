//! Board Drag & Drop Context
//!
//! One set of DnD signals for the whole app, bound to the document once. The
//! tickets page reads it from context so revisiting the page never stacks
//! document listeners.

use chrono::Utc;
use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DndSignals, DragSource, DropTarget};

use crate::board::{BoardView, ColumnKey, DropPlan, ReassignDraft, TicketChange};
use crate::loaders::spawn_board_change;
use crate::store::{AppStateStoreFields, AppStore};
use crate::toast::Toasts;

#[derive(Clone, Copy)]
pub struct BoardDndContext {
    pub dnd: DndSignals<ColumnKey>,
    /// Status or Team columns
    pub view: RwSignal<BoardView>,
    /// Reassignment waiting for a handover reason
    pub draft: RwSignal<Option<ReassignDraft>>,
}

pub fn use_board_dnd() -> BoardDndContext {
    expect_context::<BoardDndContext>()
}

/// Create the board DnD context and bind the drop handler
pub fn provide_board_dnd(store: AppStore, toasts: Toasts) -> BoardDndContext {
    let ctx = BoardDndContext {
        dnd: create_dnd_signals(),
        view: RwSignal::new(BoardView::default()),
        draft: RwSignal::new(None),
    };

    bind_global_mouseup(ctx.dnd, move |source: DragSource<ColumnKey>, target: DropTarget<ColumnKey>| {
        let view = ctx.view.get_untracked();
        let plan = store.board().with_untracked(|b| b.plan_drop(view, &source, &target));
        match plan {
            DropPlan::NoOp => {}
            DropPlan::ChangeStatus { ticket_id, to, .. } => {
                let change = TicketChange::Status { ticket_id, status: to, at: Utc::now() };
                spawn_board_change(store, toasts, change);
            }
            DropPlan::ConfirmReassign(draft) => ctx.draft.set(Some(draft)),
        }
    });

    provide_context(ctx);
    ctx
}
