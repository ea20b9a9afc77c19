//! Board Columns
//!
//! Groups the flat ticket list into droppable columns, either by status or by
//! assignee.

use std::collections::BTreeMap;

use crate::models::{MemberId, TeamMember, Ticket, TicketStatus};

/// Which field the board columns are keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardView {
    #[default]
    Status,
    Team,
}

/// Column identifier used by the drag-and-drop layer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Status(TicketStatus),
    /// None = the "Unassigned" column
    Assignee(Option<MemberId>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: ColumnKey,
    pub title: String,
    pub tickets: Vec<Ticket>,
}

/// The column a ticket belongs to in `view`
pub fn column_of(ticket: &Ticket, view: BoardView) -> ColumnKey {
    match view {
        BoardView::Status => ColumnKey::Status(ticket.status),
        BoardView::Team => ColumnKey::Assignee(ticket.assigned_to.clone()),
    }
}

/// Cards in a column are ordered oldest first
fn sort_cards(tickets: &mut [Ticket]) {
    tickets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

/// Build the columns for `view`.
///
/// Status view always shows every status. Team view shows "Unassigned", then
/// every team member by name, then any assignee id missing from `team`.
pub fn group_tickets(tickets: &[Ticket], view: BoardView, team: &[TeamMember]) -> Vec<Column> {
    let mut columns: Vec<Column> = match view {
        BoardView::Status => TicketStatus::ALL
            .iter()
            .map(|status| Column {
                key: ColumnKey::Status(*status),
                title: status.as_str().to_string(),
                tickets: Vec::new(),
            })
            .collect(),
        BoardView::Team => {
            let mut members: Vec<&TeamMember> = team.iter().collect();
            members.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            std::iter::once(Column {
                key: ColumnKey::Assignee(None),
                title: "Unassigned".to_string(),
                tickets: Vec::new(),
            })
            .chain(members.into_iter().map(|m| Column {
                key: ColumnKey::Assignee(Some(m.id.clone())),
                title: m.name.clone(),
                tickets: Vec::new(),
            }))
            .collect()
        }
    };

    let mut strays: BTreeMap<MemberId, Vec<Ticket>> = BTreeMap::new();
    for ticket in tickets {
        let key = column_of(ticket, view);
        match columns.iter_mut().find(|c| c.key == key) {
            Some(column) => column.tickets.push(ticket.clone()),
            None => {
                if let ColumnKey::Assignee(Some(id)) = key {
                    strays.entry(id).or_default().push(ticket.clone());
                }
            }
        }
    }
    columns.extend(strays.into_iter().map(|(id, tickets)| Column {
        title: format!("Unknown ({})", id),
        key: ColumnKey::Assignee(Some(id)),
        tickets,
    }));

    for column in &mut columns {
        sort_cards(&mut column.tickets);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{member, ticket};

    #[test]
    fn test_status_view_has_every_status() {
        let tickets = vec![ticket("T1", TicketStatus::Open, None), ticket("T2", TicketStatus::Closed, None)];
        let columns = group_tickets(&tickets, BoardView::Status, &[]);

        assert_eq!(columns.len(), TicketStatus::ALL.len());
        assert_eq!(columns[0].key, ColumnKey::Status(TicketStatus::Open));
        assert_eq!(columns[0].tickets.len(), 1);
        assert!(columns[1].tickets.is_empty());
        assert_eq!(columns[4].tickets[0].id.as_str(), "T2");
    }

    #[test]
    fn test_team_view_columns() {
        let team = vec![member("M2", "zoe"), member("M1", "Arjun")];
        let tickets = vec![
            ticket("T1", TicketStatus::Open, Some("M1")),
            ticket("T2", TicketStatus::Open, None),
            ticket("T3", TicketStatus::Open, Some("M9")),
        ];
        let columns = group_tickets(&tickets, BoardView::Team, &team);

        let titles: Vec<&str> = columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Unassigned", "Arjun", "zoe", "Unknown (M9)"]);
        assert_eq!(columns[0].tickets[0].id.as_str(), "T2");
        assert_eq!(columns[1].tickets[0].id.as_str(), "T1");
        assert_eq!(columns[3].key, ColumnKey::Assignee(Some(MemberId::from("M9"))));
    }

    #[test]
    fn test_cards_oldest_first() {
        let mut newer = ticket("T1", TicketStatus::Open, None);
        newer.created_at = newer.created_at + chrono::Duration::hours(1);
        let older = ticket("T2", TicketStatus::Open, None);
        let columns = group_tickets(&[newer, older], BoardView::Status, &[]);

        let ids: Vec<&str> = columns[0].tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T2", "T1"]);
    }
}
