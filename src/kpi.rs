//! Dashboard KPIs
//!
//! Counts and totals derived from the in-memory slices.

use chrono::NaiveDate;

use crate::models::{
    Connection, ConnectionStatus, Invoice, InvoiceStatus, Lead, LeadStatus, MemberId, Priority, TeamMember,
    Ticket, TicketStatus,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TicketKpis {
    pub by_status: Vec<(TicketStatus, usize)>,
    pub open: usize,
    pub urgent_open: usize,
    pub unassigned_open: usize,
    pub resolved_today: usize,
    /// Mean hours from creation to resolution over resolved tickets
    pub mean_resolution_hours: Option<f64>,
}

pub fn ticket_kpis(tickets: &[Ticket], today: NaiveDate) -> TicketKpis {
    let by_status = TicketStatus::ALL
        .iter()
        .map(|s| (*s, tickets.iter().filter(|t| t.status == *s).count()))
        .collect();

    let open: Vec<&Ticket> = tickets.iter().filter(|t| t.status.is_open()).collect();

    let resolution_hours: Vec<f64> = tickets
        .iter()
        .filter_map(|t| t.resolved_at.map(|r| (r - t.created_at).num_minutes() as f64 / 60.0))
        .filter(|h| *h >= 0.0)
        .collect();

    TicketKpis {
        by_status,
        open: open.len(),
        urgent_open: open.iter().filter(|t| t.priority == Priority::Urgent).count(),
        unassigned_open: open.iter().filter(|t| t.assigned_to.is_none()).count(),
        resolved_today: tickets
            .iter()
            .filter(|t| t.resolved_at.map_or(false, |r| r.date_naive() == today))
            .count(),
        mean_resolution_hours: mean(&resolution_hours),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionKpis {
    pub by_status: Vec<(ConnectionStatus, usize)>,
    pub total: usize,
}

impl ConnectionKpis {
    pub fn count(&self, status: ConnectionStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

pub fn connection_kpis(connections: &[Connection]) -> ConnectionKpis {
    ConnectionKpis {
        by_status: ConnectionStatus::ALL
            .iter()
            .map(|s| (*s, connections.iter().filter(|c| c.status == *s).count()))
            .collect(),
        total: connections.len(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadKpis {
    pub by_status: Vec<(LeadStatus, usize)>,
    /// Converted / (all leads); None with no leads
    pub conversion_rate: Option<f64>,
}

pub fn lead_kpis(leads: &[Lead]) -> LeadKpis {
    let converted = leads.iter().filter(|l| l.status == LeadStatus::Converted).count();
    LeadKpis {
        by_status: LeadStatus::ALL
            .iter()
            .map(|s| (*s, leads.iter().filter(|l| l.status == *s).count()))
            .collect(),
        conversion_rate: if leads.is_empty() {
            None
        } else {
            Some(converted as f64 / leads.len() as f64)
        },
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillingSummary {
    pub billed: f64,
    pub collected: f64,
    pub outstanding: f64,
    pub overdue_count: usize,
}

/// Totals over `invoices`. An unpaid invoice past its due date counts as overdue.
pub fn billing_summary(invoices: &[Invoice], today: NaiveDate) -> BillingSummary {
    invoices.iter().fold(BillingSummary::default(), |mut acc, inv| {
        acc.billed += inv.amount;
        match effective_status(inv, today) {
            InvoiceStatus::Paid => acc.collected += inv.amount,
            InvoiceStatus::Unpaid => acc.outstanding += inv.amount,
            InvoiceStatus::Overdue => {
                acc.outstanding += inv.amount;
                acc.overdue_count += 1;
            }
        }
        acc
    })
}

/// Status as of `today`; the backend may lag marking invoices overdue
pub fn effective_status(invoice: &Invoice, today: NaiveDate) -> InvoiceStatus {
    match invoice.status {
        InvoiceStatus::Unpaid if invoice.due_on < today => InvoiceStatus::Overdue,
        other => other,
    }
}

/// Open tickets per team member, busiest first
pub fn workload(tickets: &[Ticket], team: &[TeamMember]) -> Vec<(MemberId, String, usize)> {
    let mut rows: Vec<(MemberId, String, usize)> = team
        .iter()
        .map(|m| {
            let open = tickets
                .iter()
                .filter(|t| t.status.is_open() && t.assigned_to.as_ref() == Some(&m.id))
                .count();
            (m.id.clone(), m.name.clone(), open)
        })
        .collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));
    rows
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{at, member, ticket};
    use crate::models::{CustomerId, InvoiceId, LeadId};
    use chrono::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
    }

    #[test]
    fn test_ticket_kpis() {
        let mut resolved = ticket("T3", TicketStatus::Resolved, Some("M1"));
        resolved.resolved_at = Some(at(8) + Duration::hours(6));
        let mut urgent = ticket("T1", TicketStatus::Open, None);
        urgent.priority = Priority::Urgent;
        let tickets = vec![urgent, ticket("T2", TicketStatus::OnHold, Some("M1")), resolved];

        let kpis = ticket_kpis(&tickets, day(1));
        assert_eq!(kpis.open, 2);
        assert_eq!(kpis.urgent_open, 1);
        assert_eq!(kpis.unassigned_open, 1);
        assert_eq!(kpis.resolved_today, 1);
        assert_eq!(kpis.mean_resolution_hours, Some(6.0));
        assert_eq!(kpis.by_status[0], (TicketStatus::Open, 1));

        assert_eq!(ticket_kpis(&tickets, day(2)).resolved_today, 0);
        assert_eq!(ticket_kpis(&[], day(1)).mean_resolution_hours, None);
    }

    fn invoice(id: &str, amount: f64, status: InvoiceStatus, due: NaiveDate) -> Invoice {
        Invoice {
            id: InvoiceId::from(id),
            customer: CustomerId::from("C1"),
            amount,
            issued_on: day(1),
            due_on: due,
            status,
        }
    }

    #[test]
    fn test_billing_summary_marks_late_unpaid_overdue() {
        let invoices = vec![
            invoice("I1", 500.0, InvoiceStatus::Paid, day(5)),
            invoice("I2", 700.0, InvoiceStatus::Unpaid, day(5)),
            invoice("I3", 300.0, InvoiceStatus::Unpaid, day(20)),
        ];
        let summary = billing_summary(&invoices, day(10));
        assert_eq!(summary.billed, 1500.0);
        assert_eq!(summary.collected, 500.0);
        assert_eq!(summary.outstanding, 1000.0);
        assert_eq!(summary.overdue_count, 1);
    }

    #[test]
    fn test_lead_conversion_rate() {
        let lead = |id: &str, status| Lead {
            id: LeadId::from(id),
            name: id.to_string(),
            phone: "9999999999".into(),
            email: None,
            address: String::new(),
            source: "walk-in".into(),
            status,
            note: String::new(),
            created_at: at(8),
        };
        let leads = vec![lead("L1", LeadStatus::Converted), lead("L2", LeadStatus::New), lead("L3", LeadStatus::Lost), lead("L4", LeadStatus::Converted)];
        assert_eq!(lead_kpis(&leads).conversion_rate, Some(0.5));
        assert_eq!(lead_kpis(&[]).conversion_rate, None);
    }

    #[test]
    fn test_workload_busiest_first() {
        let team = vec![member("M1", "Arjun"), member("M2", "Bela")];
        let tickets = vec![
            ticket("T1", TicketStatus::Open, Some("M2")),
            ticket("T2", TicketStatus::InProgress, Some("M2")),
            ticket("T3", TicketStatus::Closed, Some("M1")),
        ];
        let rows = workload(&tickets, &team);
        assert_eq!(rows[0], (MemberId::from("M2"), "Bela".to_string(), 2));
        assert_eq!(rows[1].2, 0);
    }
}
