//! Ticket Changes
//!
//! The two mutations the board can make to a ticket.

use chrono::{DateTime, Utc};

use crate::models::{AssignmentRecord, MemberId, Ticket, TicketId, TicketStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum TicketChange {
    Status {
        ticket_id: TicketId,
        status: TicketStatus,
        at: DateTime<Utc>,
    },
    Reassign {
        ticket_id: TicketId,
        to: MemberId,
        note: String,
        by: String,
        at: DateTime<Utc>,
    },
}

impl TicketChange {
    pub fn ticket_id(&self) -> &TicketId {
        match self {
            TicketChange::Status { ticket_id, .. } | TicketChange::Reassign { ticket_id, .. } => ticket_id,
        }
    }

    /// Local rendition of what the server will do
    pub fn apply_to(&self, ticket: &mut Ticket) {
        match self {
            TicketChange::Status { status, at, .. } => {
                ticket.status = *status;
                if status.is_open() {
                    ticket.resolved_at = None;
                } else if ticket.resolved_at.is_none() {
                    ticket.resolved_at = Some(*at);
                }
            }
            TicketChange::Reassign { to, note, by, at, .. } => {
                ticket.assigned_to = Some(to.clone());
                ticket.assignment_history.push(AssignmentRecord {
                    assigned_to: Some(to.clone()),
                    assigned_by: by.clone(),
                    assigned_at: *at,
                    note: note.clone(),
                });
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TicketChange::Status { ticket_id, status, .. } => format!("{} -> {}", ticket_id, status),
            TicketChange::Reassign { ticket_id, to, .. } => format!("{} -> assignee {}", ticket_id, to),
        }
    }
}
