//! Pending Operations
//!
//! Ledger of optimistic changes that have not been confirmed by the server,
//! keyed by ticket id. Each entry keeps the last server-confirmed copy of the
//! ticket so a failed request can be undone, plus every change still in flight
//! so a refetch can replay them in order.

use std::collections::HashMap;

use crate::error::ApiError;
use crate::models::{Ticket, TicketId};

use super::change::TicketChange;

/// Identifies one optimistic change; later changes get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingOp {
    /// Last server-confirmed state of the ticket
    pub confirmed: Ticket,
    /// Changes still in flight, oldest first
    pub changes: Vec<(OpToken, TicketChange)>,
}

impl PendingOp {
    pub fn newest(&self) -> Option<&(OpToken, TicketChange)> {
        self.changes.last()
    }

    /// `confirmed` with every in-flight change applied on top
    pub fn replayed(&self) -> Ticket {
        let mut shown = self.confirmed.clone();
        for (_, change) in &self.changes {
            change.apply_to(&mut shown);
        }
        shown
    }

    /// A server copy answering `token` already contains it and everything older
    fn confirm_through(&mut self, token: OpToken, server: Ticket) {
        self.confirmed = server;
        self.changes.retain(|(t, _)| *t > token);
    }

    fn forget(&mut self, token: OpToken) {
        self.changes.retain(|(t, _)| *t != token);
    }
}

/// How a server response was reconciled
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// Server copy now displayed
    Confirmed,
    /// Request failed; the confirmed copy was restored
    RolledBack(ApiError),
    /// A newer change to the same ticket is in flight; display untouched
    Superseded,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingOps {
    next: u64,
    ops: HashMap<TicketId, PendingOp>,
}

impl PendingOps {
    /// Record a change. `confirmed` is only used if the ticket has no pending
    /// entry yet; otherwise the older confirmed copy is kept.
    pub(crate) fn begin(&mut self, confirmed: &Ticket, change: TicketChange) -> OpToken {
        self.next += 1;
        let token = OpToken(self.next);
        self.ops
            .entry(confirmed.id.clone())
            .or_insert_with(|| PendingOp { confirmed: confirmed.clone(), changes: Vec::new() })
            .changes
            .push((token, change));
        token
    }

    pub(crate) fn get_mut(&mut self, id: &TicketId) -> Option<&mut PendingOp> {
        self.ops.get_mut(id)
    }

    /// Remove and return the entry if `token` is still the newest for `id`
    pub(crate) fn take_current(&mut self, id: &TicketId, token: OpToken) -> Option<PendingOp> {
        match self.ops.get(id).and_then(PendingOp::newest) {
            Some((newest, _)) if *newest == token => self.ops.remove(id),
            _ => None,
        }
    }

    /// Record the answer to an older change while a newer one is in flight
    pub(crate) fn settle_stale(&mut self, id: &TicketId, token: OpToken, server: Option<Ticket>) {
        if let Some(op) = self.ops.get_mut(id) {
            match server {
                Some(server) => op.confirm_through(token, server),
                None => op.forget(token),
            }
        }
    }

    pub fn contains(&self, id: &TicketId) -> bool {
        self.ops.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{at, ticket};
    use crate::models::{MemberId, TicketStatus};

    fn reassign(to: &str, note: &str) -> TicketChange {
        TicketChange::Reassign {
            ticket_id: TicketId::from("T1"),
            to: MemberId::from(to),
            note: note.to_string(),
            by: "Asha".to_string(),
            at: at(10),
        }
    }

    #[test]
    fn test_changes_replay_in_order() {
        let base = ticket("T1", TicketStatus::Open, None);
        let mut ops = PendingOps::default();
        let first = ops.begin(&base, reassign("M1", "nearest"));
        let second = ops.begin(&base, reassign("M2", "M1 on leave"));
        assert!(first < second);
        assert_eq!(ops.len(), 1);

        let id = TicketId::from("T1");
        let shown = ops.get_mut(&id).map(|op| op.replayed()).expect("pending");
        assert_eq!(shown.assigned_to, Some(MemberId::from("M2")));

        // The older answer no longer needs replaying; the newer one still does
        let mut server = base.clone();
        reassign("M1", "nearest").apply_to(&mut server);
        ops.settle_stale(&id, first, Some(server));
        let op = ops.get_mut(&id).expect("pending");
        assert_eq!(op.changes.len(), 1);
        assert_eq!(op.newest().map(|(t, _)| *t), Some(second));

        assert!(ops.take_current(&id, first).is_none());
        assert!(ops.take_current(&id, second).is_some());
        assert!(ops.is_empty());
    }

    #[test]
    fn test_failed_stale_change_is_dropped() {
        let base = ticket("T1", TicketStatus::Open, None);
        let mut ops = PendingOps::default();
        let id = TicketId::from("T1");
        let first = ops.begin(&base, reassign("M1", "nearest"));
        ops.begin(&base, reassign("M2", "M1 on leave"));

        ops.settle_stale(&id, first, None);
        let op = ops.get_mut(&id).expect("pending");
        assert_eq!(op.changes.len(), 1);
        assert_eq!(op.confirmed, base);
    }
}
