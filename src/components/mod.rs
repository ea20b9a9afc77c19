//! UI Components
//!
//! Reusable Leptos components.

pub mod board_dnd;
mod board_column;
mod delete_confirm_button;
mod field;
mod kpi_card;
mod reassign_dialog;
mod sidebar;
pub mod status_badge;
mod ticket_card;
mod toast_stack;

pub use board_column::BoardColumn;
pub use board_dnd::{provide_board_dnd, use_board_dnd, BoardDndContext};
pub use delete_confirm_button::{deleting_signal, DeleteConfirmButton, InFlight};
pub use field::{enum_options, Field, SelectField};
pub use kpi_card::KpiCard;
pub use reassign_dialog::ReassignDialog;
pub use sidebar::Sidebar;
pub use ticket_card::TicketCard;
pub use toast_stack::ToastStack;
