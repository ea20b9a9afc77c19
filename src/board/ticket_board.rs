//! Ticket Board State
//!
//! The in-memory ticket list plus the pending-operation ledger. All board
//! mutations go through here so the displayed copy and the last confirmed
//! server copy never drift apart silently.

use chrono::{DateTime, Utc};
use leptos_dragdrop::{DragSource, DropTarget};

use crate::error::ApiError;
use crate::models::{MemberId, Ticket, TicketId, TicketStatus};

use super::change::TicketChange;
use super::columns::{column_of, BoardView, ColumnKey};
use super::pending::{OpToken, PendingOps, Settled};

/// What a drop should do
#[derive(Debug, Clone, PartialEq)]
pub enum DropPlan {
    /// Same slot, same column, or an invalid target
    NoOp,
    /// Status view: commit immediately
    ChangeStatus {
        ticket_id: TicketId,
        from: TicketStatus,
        to: TicketStatus,
    },
    /// Team view: ask for a handover reason first
    ConfirmReassign(ReassignDraft),
}

/// A reassignment waiting for the operator's handover reason
#[derive(Debug, Clone, PartialEq)]
pub struct ReassignDraft {
    pub ticket_id: TicketId,
    pub ticket_title: String,
    pub from: Option<MemberId>,
    pub to: MemberId,
    reason: String,
}

impl ReassignDraft {
    pub fn new(ticket: &Ticket, to: MemberId) -> Self {
        Self {
            ticket_id: ticket.id.clone(),
            ticket_title: ticket.title.clone(),
            from: ticket.assigned_to.clone(),
            to,
            reason: String::new(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    /// Confirm stays disabled until a reason is given
    pub fn can_confirm(&self) -> bool {
        !self.reason.trim().is_empty()
    }

    /// Turn the draft into a change, or None while the reason is blank
    pub fn into_change(self, by: &str, at: DateTime<Utc>) -> Option<TicketChange> {
        if !self.can_confirm() {
            return None;
        }
        Some(TicketChange::Reassign {
            ticket_id: self.ticket_id,
            to: self.to,
            note: self.reason.trim().to_string(),
            by: by.to_string(),
            at,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketBoard {
    tickets: Vec<Ticket>,
    pending: PendingOps,
}

impl TicketBoard {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets, pending: PendingOps::default() }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    pub fn is_pending(&self, id: &TicketId) -> bool {
        self.pending.contains(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Take a fresh server list. Tickets with changes still in flight keep
    /// showing all of them, replayed in order on top of the new server copy.
    pub fn replace_all(&mut self, tickets: Vec<Ticket>) {
        self.tickets = tickets;
        for ticket in &mut self.tickets {
            if let Some(op) = self.pending.get_mut(&ticket.id) {
                op.confirmed = ticket.clone();
                *ticket = op.replayed();
            }
        }
    }

    /// Insert or replace a single server copy (create, detail fetch)
    pub fn upsert(&mut self, ticket: Ticket) {
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(existing) => {
                if let Some(op) = self.pending.get_mut(&ticket.id) {
                    op.confirmed = ticket;
                    *existing = op.replayed();
                } else {
                    *existing = ticket;
                }
            }
            None => self.tickets.push(ticket),
        }
    }

    /// Decide what dropping `source` on `target` means in `view`
    pub fn plan_drop(
        &self,
        view: BoardView,
        source: &DragSource<ColumnKey>,
        target: &DropTarget<ColumnKey>,
    ) -> DropPlan {
        if target.is_origin_of(source) || target.column == source.column {
            return DropPlan::NoOp;
        }
        let Some(ticket) = self.tickets.iter().find(|t| t.id.as_str() == source.card_id) else {
            return DropPlan::NoOp;
        };
        if column_of(ticket, view) == target.column {
            return DropPlan::NoOp;
        }

        match (view, &target.column) {
            (BoardView::Status, ColumnKey::Status(to)) => DropPlan::ChangeStatus {
                ticket_id: ticket.id.clone(),
                from: ticket.status,
                to: *to,
            },
            (BoardView::Team, ColumnKey::Assignee(Some(to))) => {
                DropPlan::ConfirmReassign(ReassignDraft::new(ticket, to.clone()))
            }
            _ => DropPlan::NoOp,
        }
    }

    /// Apply `change` to the displayed ticket right away and record it as
    /// pending. None if the ticket is not on the board.
    pub fn apply(&mut self, change: TicketChange) -> Option<OpToken> {
        let ticket = self.tickets.iter_mut().find(|t| &t.id == change.ticket_id())?;
        let token = self.pending.begin(ticket, change.clone());
        change.apply_to(ticket);
        tracing::info!(?token, "optimistic {}", change.describe());
        Some(token)
    }

    /// Reconcile the server's answer for the change identified by `token`
    pub fn settle(&mut self, id: &TicketId, token: OpToken, result: Result<Ticket, ApiError>) -> Settled {
        match self.pending.take_current(id, token) {
            Some(op) => match result {
                Ok(server) => {
                    self.replace_shown(server);
                    Settled::Confirmed
                }
                Err(e) => {
                    if let Some((_, change)) = op.newest() {
                        tracing::warn!("rolling back {}: {}", change.describe(), e);
                    }
                    self.replace_shown(op.confirmed);
                    Settled::RolledBack(e)
                }
            },
            None => {
                // An older response: remember what the server confirmed, leave the display alone
                self.pending.settle_stale(id, token, result.ok());
                Settled::Superseded
            }
        }
    }

    fn replace_shown(&mut self, ticket: Ticket) {
        if let Some(shown) = self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            *shown = ticket;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{at, ticket};

    fn board() -> TicketBoard {
        TicketBoard::new(vec![
            ticket("T1", TicketStatus::Open, None),
            ticket("T2", TicketStatus::InProgress, Some("M1")),
        ])
    }

    fn src(id: &str, column: ColumnKey, index: usize) -> DragSource<ColumnKey> {
        DragSource { card_id: id.to_string(), column, index }
    }

    fn dst(column: ColumnKey, index: usize) -> DropTarget<ColumnKey> {
        DropTarget { column, index }
    }

    fn status_change(id: &str, status: TicketStatus) -> TicketChange {
        TicketChange::Status { ticket_id: TicketId::from(id), status, at: at(12) }
    }

    #[test]
    fn test_drop_on_other_status_plans_change() {
        let b = board();
        let plan = b.plan_drop(
            BoardView::Status,
            &src("T1", ColumnKey::Status(TicketStatus::Open), 0),
            &dst(ColumnKey::Status(TicketStatus::InProgress), 1),
        );
        assert_eq!(
            plan,
            DropPlan::ChangeStatus {
                ticket_id: TicketId::from("T1"),
                from: TicketStatus::Open,
                to: TicketStatus::InProgress,
            }
        );
    }

    #[test]
    fn test_drop_on_own_slot_is_noop() {
        let b = board();
        let column = ColumnKey::Status(TicketStatus::Open);
        assert_eq!(
            b.plan_drop(BoardView::Status, &src("T1", column.clone(), 0), &dst(column.clone(), 0)),
            DropPlan::NoOp
        );
        // Reordering inside a column does not touch the ticket either
        assert_eq!(
            b.plan_drop(BoardView::Status, &src("T1", column.clone(), 0), &dst(column, 3)),
            DropPlan::NoOp
        );
    }

    #[test]
    fn test_team_drop_needs_reason() {
        let b = board();
        let plan = b.plan_drop(
            BoardView::Team,
            &src("T1", ColumnKey::Assignee(None), 0),
            &dst(ColumnKey::Assignee(Some(MemberId::from("M2"))), 0),
        );
        let DropPlan::ConfirmReassign(mut draft) = plan else {
            panic!("expected reassignment draft, got {:?}", plan);
        };
        assert_eq!(draft.from, None);
        assert!(!draft.can_confirm());

        draft.set_reason("   ");
        assert!(!draft.can_confirm());
        assert!(draft.clone().into_change("Asha", at(9)).is_none());

        draft.set_reason(" customer moved to sector 4 ");
        assert!(draft.can_confirm());
        match draft.into_change("Asha", at(9)) {
            Some(TicketChange::Reassign { to, note, by, .. }) => {
                assert_eq!(to, MemberId::from("M2"));
                assert_eq!(note, "customer moved to sector 4");
                assert_eq!(by, "Asha");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_drop_on_unassigned_is_rejected() {
        let b = board();
        let plan = b.plan_drop(
            BoardView::Team,
            &src("T2", ColumnKey::Assignee(Some(MemberId::from("M1"))), 0),
            &dst(ColumnKey::Assignee(None), 0),
        );
        assert_eq!(plan, DropPlan::NoOp);
    }

    #[test]
    fn test_mismatched_column_kind_is_noop() {
        let b = board();
        let plan = b.plan_drop(
            BoardView::Status,
            &src("T1", ColumnKey::Status(TicketStatus::Open), 0),
            &dst(ColumnKey::Assignee(Some(MemberId::from("M1"))), 0),
        );
        assert_eq!(plan, DropPlan::NoOp);
    }

    #[test]
    fn test_apply_is_immediate_and_success_confirms() {
        let mut b = board();
        let id = TicketId::from("T1");
        let token = b.apply(status_change("T1", TicketStatus::Resolved)).expect("on board");

        assert_eq!(b.ticket(&id).map(|t| t.status), Some(TicketStatus::Resolved));
        assert_eq!(b.ticket(&id).and_then(|t| t.resolved_at), Some(at(12)));
        assert!(b.is_pending(&id));

        let mut server = ticket("T1", TicketStatus::Resolved, None);
        server.resolved_at = Some(at(13));
        assert_eq!(b.settle(&id, token, Ok(server.clone())), Settled::Confirmed);
        assert_eq!(b.ticket(&id), Some(&server));
        assert!(!b.is_pending(&id));
    }

    #[test]
    fn test_failure_rolls_back() {
        let mut b = board();
        let id = TicketId::from("T1");
        let before = b.ticket(&id).cloned();
        let token = b.apply(status_change("T1", TicketStatus::Closed)).expect("on board");

        let err = ApiError::Rejected { status: 409, message: "Ticket locked".into() };
        assert_eq!(b.settle(&id, token, Err(err.clone())), Settled::RolledBack(err));
        assert_eq!(b.ticket(&id).cloned(), before);
        assert_eq!(b.pending_count(), 0);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_change() {
        let mut b = board();
        let id = TicketId::from("T1");
        let first = b.apply(status_change("T1", TicketStatus::InProgress)).expect("on board");
        let second = b.apply(status_change("T1", TicketStatus::Resolved)).expect("on board");

        let err = ApiError::Network("offline".into());
        assert_eq!(b.settle(&id, first, Err(err)), Settled::Superseded);
        assert_eq!(b.ticket(&id).map(|t| t.status), Some(TicketStatus::Resolved));

        // Newest change fails too: back to the state before the first drag
        let err = ApiError::Network("offline".into());
        assert!(matches!(b.settle(&id, second, Err(err)), Settled::RolledBack(_)));
        assert_eq!(b.ticket(&id).map(|t| t.status), Some(TicketStatus::Open));
    }

    #[test]
    fn test_stale_success_becomes_rollback_target() {
        let mut b = board();
        let id = TicketId::from("T1");
        let first = b.apply(status_change("T1", TicketStatus::InProgress)).expect("on board");
        let second = b.apply(status_change("T1", TicketStatus::Closed)).expect("on board");

        let confirmed_first = ticket("T1", TicketStatus::InProgress, None);
        assert_eq!(b.settle(&id, first, Ok(confirmed_first)), Settled::Superseded);
        assert_eq!(b.ticket(&id).map(|t| t.status), Some(TicketStatus::Closed));

        let err = ApiError::Network("offline".into());
        assert!(matches!(b.settle(&id, second, Err(err)), Settled::RolledBack(_)));
        assert_eq!(b.ticket(&id).map(|t| t.status), Some(TicketStatus::InProgress));
    }

    #[test]
    fn test_refetch_keeps_in_flight_change() {
        let mut b = board();
        let id = TicketId::from("T1");
        let token = b.apply(status_change("T1", TicketStatus::OnHold)).expect("on board");

        let mut fresh = ticket("T1", TicketStatus::Open, None);
        fresh.title = "Renamed on server".into();
        b.replace_all(vec![fresh]);
        let shown = b.ticket(&id).expect("still there");
        assert_eq!(shown.status, TicketStatus::OnHold);
        assert_eq!(shown.title, "Renamed on server");

        let err = ApiError::Network("offline".into());
        b.settle(&id, token, Err(err));
        let shown = b.ticket(&id).expect("still there");
        assert_eq!(shown.status, TicketStatus::Open);
        assert_eq!(shown.title, "Renamed on server");
    }

    #[test]
    fn test_refetch_replays_every_in_flight_reassign() {
        let mut b = board();
        let id = TicketId::from("T1");
        let reassign = |to: &str, note: &str| TicketChange::Reassign {
            ticket_id: TicketId::from("T1"),
            to: MemberId::from(to),
            note: note.to_string(),
            by: "Asha".to_string(),
            at: at(11),
        };
        let first = b.apply(reassign("M1", "closest to site")).expect("on board");
        b.apply(reassign("M2", "M1 called in sick")).expect("on board");
        let before = b.ticket(&id).cloned().expect("on board");
        assert_eq!(before.assignment_history.len(), 2);

        b.replace_all(vec![ticket("T1", TicketStatus::Open, None)]);
        let shown = b.ticket(&id).expect("still there");
        assert_eq!(shown.assigned_to, Some(MemberId::from("M2")));
        assert_eq!(shown.assignment_history, before.assignment_history);

        // First answer lands; a later refetch carries its entry and replays only the second
        let mut server = ticket("T1", TicketStatus::Open, None);
        reassign("M1", "closest to site").apply_to(&mut server);
        assert_eq!(b.settle(&id, first, Ok(server.clone())), Settled::Superseded);
        b.replace_all(vec![server]);
        assert_eq!(b.ticket(&id), Some(&before));
    }

    #[test]
    fn test_apply_unknown_ticket() {
        let mut b = board();
        assert!(b.apply(status_change("T404", TicketStatus::Closed)).is_none());
        assert_eq!(b.pending_count(), 0);
    }

    #[test]
    fn test_upsert_adds_new_ticket() {
        let mut b = board();
        b.upsert(ticket("T3", TicketStatus::Open, None));
        assert_eq!(b.tickets().len(), 3);
    }
}
