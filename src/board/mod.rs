//! Ticket Board
//!
//! Kanban logic behind the tickets page: column grouping, drop planning,
//! optimistic changes with rollback, and the server round-trip.

mod change;
mod columns;
mod pending;
mod sync;
mod ticket_board;

pub use change::TicketChange;
pub use columns::{column_of, group_tickets, BoardView, Column, ColumnKey};
pub use pending::{OpToken, PendingOps, Settled};
pub use sync::{dispatch, persist_change, BoardHandle, TicketGateway};
pub use ticket_board::{DropPlan, ReassignDraft, TicketBoard};
