//! List Filters
//!
//! Search and predicate filters for list pages.

use chrono::NaiveDate;

use crate::kpi::effective_status;
use crate::models::{AreaId, Customer, Invoice, InvoiceStatus, Lead, LeadStatus, MemberId, Priority, Ticket};

/// Every whitespace-separated term of `query` must appear (case-insensitive)
/// in at least one of `fields`. An empty query matches everything.
pub fn matches_text(fields: &[&str], query: &str) -> bool {
    let fields: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|term| fields.iter().any(|f| f.contains(&term)))
}

pub fn search_customers(customers: &[Customer], query: &str) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| {
            matches_text(
                &[c.name.as_str(), c.phone.as_str(), c.email.as_deref().unwrap_or(""), c.address.as_str()],
                query,
            )
        })
        .cloned()
        .collect()
}

pub fn search_leads(leads: &[Lead], query: &str, status: Option<LeadStatus>) -> Vec<Lead> {
    leads
        .iter()
        .filter(|l| status.map_or(true, |s| l.status == s))
        .filter(|l| matches_text(&[l.name.as_str(), l.phone.as_str(), l.address.as_str(), l.source.as_str()], query))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilter {
    pub query: String,
    pub priority: Option<Priority>,
    pub area: Option<AreaId>,
    pub assignee: Option<MemberId>,
}

impl TicketFilter {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.priority.is_none() && self.area.is_none() && self.assignee.is_none()
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.priority.map_or(true, |p| ticket.priority == p)
            && self.area.as_ref().map_or(true, |a| ticket.area.as_ref() == Some(a))
            && self.assignee.as_ref().map_or(true, |m| ticket.assigned_to.as_ref() == Some(m))
            && matches_text(&[ticket.title.as_str(), ticket.description.as_str(), ticket.id.as_str()], &self.query)
    }

    pub fn apply(&self, tickets: &[Ticket]) -> Vec<Ticket> {
        tickets.iter().filter(|t| self.matches(t)).cloned().collect()
    }

    /// Option value the priority select should show; "" is "Any priority"
    pub fn priority_value(&self) -> String {
        self.priority.map(|p| p.to_string()).unwrap_or_default()
    }

    pub fn area_value(&self) -> String {
        self.area.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    pub fn assignee_value(&self) -> String {
        self.assignee.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

/// Invoices whose status (as of `today`) is `status`; all when None
pub fn filter_invoices(invoices: &[Invoice], status: Option<InvoiceStatus>, today: NaiveDate) -> Vec<Invoice> {
    invoices
        .iter()
        .filter(|i| status.map_or(true, |s| effective_status(i, today) == s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::test_support::{at, ticket};
    use crate::models::{CustomerId, TicketStatus};

    fn customer(id: &str, name: &str, phone: &str) -> Customer {
        Customer {
            id: CustomerId::from(id),
            name: name.to_string(),
            phone: phone.to_string(),
            email: None,
            address: "12 MG Road".to_string(),
            area: None,
            created_at: at(8),
        }
    }

    #[test]
    fn test_matches_text_all_terms() {
        assert!(matches_text(&["Priya Sharma", "98450"], "priya 984"));
        assert!(!matches_text(&["Priya Sharma", "98450"], "priya 111"));
        assert!(matches_text(&["anything"], "   "));
    }

    #[test]
    fn test_search_customers() {
        let customers = vec![customer("C1", "Priya Sharma", "9845012345"), customer("C2", "Rahul Verma", "9900011122")];
        let found = search_customers(&customers, "VERMA");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "C2");
        assert_eq!(search_customers(&customers, "mg road").len(), 2);
    }

    #[test]
    fn test_ticket_filter() {
        let mut t1 = ticket("T1", TicketStatus::Open, Some("M1"));
        t1.priority = Priority::High;
        t1.area = Some(AreaId::from("A1"));
        let t2 = ticket("T2", TicketStatus::Open, None);
        let tickets = vec![t1, t2];

        let filter = TicketFilter { priority: Some(Priority::High), ..Default::default() };
        assert_eq!(filter.apply(&tickets).len(), 1);

        let filter = TicketFilter { area: Some(AreaId::from("A2")), ..Default::default() };
        assert!(filter.apply(&tickets).is_empty());

        let filter = TicketFilter { query: "t2".into(), ..Default::default() };
        assert_eq!(filter.apply(&tickets)[0].id.as_str(), "T2");

        assert!(TicketFilter::default().is_empty());
        assert_eq!(TicketFilter::default().apply(&tickets).len(), 2);
    }

    #[test]
    fn test_cleared_filter_resets_select_values() {
        let mut filter = TicketFilter {
            query: "fiber".to_string(),
            priority: Some(Priority::High),
            area: Some(AreaId::from("A1")),
            assignee: Some(MemberId::from("M2")),
        };
        assert_eq!(filter.priority_value(), Priority::High.to_string());
        assert_eq!(filter.area_value(), "A1");
        assert_eq!(filter.assignee_value(), "M2");

        filter = TicketFilter::default();
        assert_eq!(filter.priority_value(), "");
        assert_eq!(filter.area_value(), "");
        assert_eq!(filter.assignee_value(), "");
    }
}
