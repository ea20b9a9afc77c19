//! Board Sync
//!
//! Sends a board change to the server and reconciles the answer. The gateway
//! trait is the seam between the board and the REST client.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{MemberId, Ticket, TicketId, TicketStatus};

use super::change::TicketChange;
use super::pending::Settled;
use super::ticket_board::TicketBoard;

/// Server calls the board needs
#[async_trait(?Send)]
pub trait TicketGateway {
    async fn update_status(&self, id: &TicketId, status: TicketStatus) -> ApiResult<Ticket>;

    async fn reassign(&self, id: &TicketId, to: &MemberId, note: &str, by: &str) -> ApiResult<Ticket>;
}

/// Somewhere a [`TicketBoard`] lives (the app store, or a `RefCell` in tests)
pub trait BoardHandle {
    fn with_board<R>(&self, f: impl FnOnce(&mut TicketBoard) -> R) -> R;
}

impl BoardHandle for RefCell<TicketBoard> {
    fn with_board<R>(&self, f: impl FnOnce(&mut TicketBoard) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Issue the one request that persists `change`
pub async fn persist_change<G: TicketGateway + ?Sized>(gateway: &G, change: &TicketChange) -> ApiResult<Ticket> {
    match change {
        TicketChange::Status { ticket_id, status, .. } => gateway.update_status(ticket_id, *status).await,
        TicketChange::Reassign { ticket_id, to, note, by, .. } => gateway.reassign(ticket_id, to, note, by).await,
    }
}

/// Apply `change` optimistically, persist it, then settle.
///
/// Returns None (and sends nothing) when the ticket is not on the board.
pub async fn dispatch<G, H>(gateway: &G, board: &H, change: TicketChange) -> Option<Settled>
where
    G: TicketGateway + ?Sized,
    H: BoardHandle + ?Sized,
{
    let token = board.with_board(|b| b.apply(change.clone()))?;
    let result = persist_change(gateway, &change).await;
    Some(board.with_board(|b| b.settle(change.ticket_id(), token, result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use futures::executor::block_on;

    use crate::board::test_support::{at, ticket};
    use crate::error::ApiError;

    /// Records every call, and what the board showed at that moment
    struct RecordingGateway {
        board: Rc<RefCell<TicketBoard>>,
        calls: RefCell<Vec<String>>,
        seen_status: RefCell<Vec<Option<TicketStatus>>>,
        fail_with: Option<ApiError>,
    }

    impl RecordingGateway {
        fn new(board: Rc<RefCell<TicketBoard>>, fail_with: Option<ApiError>) -> Self {
            Self { board, calls: RefCell::new(Vec::new()), seen_status: RefCell::new(Vec::new()), fail_with }
        }
    }

    #[async_trait(?Send)]
    impl TicketGateway for RecordingGateway {
        async fn update_status(&self, id: &TicketId, status: TicketStatus) -> ApiResult<Ticket> {
            self.calls.borrow_mut().push(format!("status {} {}", id, status));
            let shown = self.board.borrow().ticket(id).map(|t| t.status);
            self.seen_status.borrow_mut().push(shown);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(ticket(id.as_str(), status, None)),
            }
        }

        async fn reassign(&self, id: &TicketId, to: &MemberId, note: &str, by: &str) -> ApiResult<Ticket> {
            self.calls.borrow_mut().push(format!("assign {} {} {} {}", id, to, note, by));
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => {
                    let mut t = ticket(id.as_str(), TicketStatus::Open, Some(to.as_str()));
                    t.assignment_history = self.board.borrow().ticket(id).map(|t| t.assignment_history.clone()).unwrap_or_default();
                    Ok(t)
                }
            }
        }
    }

    fn shared_board() -> Rc<RefCell<TicketBoard>> {
        Rc::new(RefCell::new(TicketBoard::new(vec![ticket("T1", TicketStatus::Open, None)])))
    }

    #[test]
    fn test_status_drop_updates_before_request_and_sends_once() {
        let board = shared_board();
        let gateway = RecordingGateway::new(board.clone(), None);
        let change = TicketChange::Status {
            ticket_id: TicketId::from("T1"),
            status: TicketStatus::InProgress,
            at: at(10),
        };

        let settled = block_on(dispatch(&gateway, &*board, change));

        assert_eq!(settled, Some(Settled::Confirmed));
        assert_eq!(*gateway.calls.borrow(), vec!["status T1 In Progress".to_string()]);
        // The board already showed the new status while the request was in flight
        assert_eq!(*gateway.seen_status.borrow(), vec![Some(TicketStatus::InProgress)]);
        assert_eq!(board.borrow().ticket(&TicketId::from("T1")).map(|t| t.status), Some(TicketStatus::InProgress));
    }

    #[test]
    fn test_rejected_request_restores_ticket() {
        let board = shared_board();
        let err = ApiError::Rejected { status: 500, message: "Server error".into() };
        let gateway = RecordingGateway::new(board.clone(), Some(err.clone()));
        let change = TicketChange::Status {
            ticket_id: TicketId::from("T1"),
            status: TicketStatus::Closed,
            at: at(10),
        };

        let settled = block_on(dispatch(&gateway, &*board, change));

        assert_eq!(settled, Some(Settled::RolledBack(err)));
        assert_eq!(board.borrow().ticket(&TicketId::from("T1")).map(|t| t.status), Some(TicketStatus::Open));
        assert_eq!(gateway.calls.borrow().len(), 1);
    }

    #[test]
    fn test_reassign_sends_reason_and_operator() {
        let board = shared_board();
        let gateway = RecordingGateway::new(board.clone(), None);
        let change = TicketChange::Reassign {
            ticket_id: TicketId::from("T1"),
            to: MemberId::from("M2"),
            note: "shift change".into(),
            by: "Asha".into(),
            at: at(10),
        };

        let settled = block_on(dispatch(&gateway, &*board, change));

        assert_eq!(settled, Some(Settled::Confirmed));
        assert_eq!(*gateway.calls.borrow(), vec!["assign T1 M2 shift change Asha".to_string()]);
        let b = board.borrow();
        let shown = b.ticket(&TicketId::from("T1")).expect("on board");
        assert_eq!(shown.assigned_to, Some(MemberId::from("M2")));
        assert_eq!(shown.assignment_history.len(), 1);
        assert_eq!(shown.assignment_history[0].note, "shift change");
    }

    #[test]
    fn test_unknown_ticket_sends_nothing() {
        let board = shared_board();
        let gateway = RecordingGateway::new(board.clone(), None);
        let change = TicketChange::Status {
            ticket_id: TicketId::from("T9"),
            status: TicketStatus::Closed,
            at: at(10),
        };

        assert_eq!(block_on(dispatch(&gateway, &*board, change)), None);
        assert!(gateway.calls.borrow().is_empty());
    }
}
