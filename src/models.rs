//! Frontend Models
//!
//! Data structures matching backend entities. Ids are opaque backend strings
//! carried in `_id`; every status-like field is a closed enum so an unknown
//! wire value fails decoding at the boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($($name:ident),* $(,)?) => {$(
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    )*};
}

id_type!(
    TicketId,
    MemberId,
    CustomerId,
    ConnectionId,
    PlanId,
    SubscriptionId,
    AreaId,
    LeadId,
    InvoiceId,
    NotificationId,
);

/// Closed string enum with the exact wire spelling as its label
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:tt),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(format!("unknown {}: {}", stringify!($name), other)),
                }
            }
        }
    };
}

wire_enum!(
    /// Ticket workflow state; columns of the status board
    TicketStatus {
        Open => "Open",
        InProgress => "In Progress",
        OnHold => "On Hold",
        Resolved => "Resolved",
        Closed => "Closed",
    }
);

impl TicketStatus {
    /// Still needs work (counts towards the open KPI)
    pub fn is_open(&self) -> bool {
        !matches!(self, TicketStatus::Resolved | TicketStatus::Closed)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TicketStatus::Open => "status-open",
            TicketStatus::InProgress => "status-in-progress",
            TicketStatus::OnHold => "status-on-hold",
            TicketStatus::Resolved => "status-resolved",
            TicketStatus::Closed => "status-closed",
        }
    }
}

wire_enum!(
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Urgent => "Urgent",
    }
);

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

wire_enum!(
    Role {
        Admin => "Admin",
        Manager => "Manager",
        Technician => "Technician",
        Support => "Support",
    }
);

wire_enum!(
    ConnectionType {
        Ftth => "FTTH",
        Wireless => "Wireless",
        Broadband => "Broadband",
    }
);

wire_enum!(
    ConnectionStatus {
        Pending => "Pending",
        Active => "Active",
        Suspended => "Suspended",
        Terminated => "Terminated",
    }
);

wire_enum!(
    LeadStatus {
        New => "New",
        Contacted => "Contacted",
        Qualified => "Qualified",
        Converted => "Converted",
        Lost => "Lost",
    }
);

wire_enum!(
    InvoiceStatus {
        Paid => "Paid",
        Unpaid => "Unpaid",
        Overdue => "Overdue",
    }
);

/// One entry of a ticket's handover trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    pub assigned_to: Option<MemberId>,
    pub assigned_by: String,
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

/// Support ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(rename = "_id", alias = "id")]
    pub id: TicketId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub customer: Option<CustomerId>,
    #[serde(default)]
    pub area: Option<AreaId>,
    #[serde(default)]
    pub assigned_to: Option<MemberId>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignment_history: Vec<AssignmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id", alias = "id")]
    pub id: MemberId,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub areas: Vec<AreaId>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id", alias = "id")]
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub area: Option<AreaId>,
    pub created_at: DateTime<Utc>,
}

/// Installed line plus the hardware on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(rename = "_id", alias = "id")]
    pub id: ConnectionId,
    pub customer: CustomerId,
    #[serde(default)]
    pub area: Option<AreaId>,
    pub connection_type: ConnectionType,
    #[serde(default)]
    pub router_model: String,
    #[serde(default)]
    pub router_serial: String,
    #[serde(default)]
    pub ont_serial: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub installation_date: Option<NaiveDate>,
    pub status: ConnectionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id", alias = "id")]
    pub id: PlanId,
    pub name: String,
    pub speed_mbps: u32,
    pub price: f64,
    pub validity_days: u32,
    /// None = unlimited
    #[serde(default)]
    pub data_limit_gb: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id", alias = "id")]
    pub id: SubscriptionId,
    pub customer: CustomerId,
    pub connection: ConnectionId,
    pub plan: PlanId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    #[serde(rename = "_id", alias = "id")]
    pub id: AreaId,
    pub name: String,
    #[serde(default)]
    pub pincode: Option<String>,
}

/// Prospective customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id", alias = "id")]
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub source: String,
    pub status: LeadStatus,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id", alias = "id")]
    pub id: InvoiceId,
    pub customer: CustomerId,
    pub amount: f64,
    pub issued_on: NaiveDate,
    pub due_on: NaiveDate,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: NotificationId,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Entities held in store slices
pub trait Entity: Clone {
    type Id: Clone + PartialEq;

    fn id(&self) -> &Self::Id;
}

macro_rules! entity {
    ($($ty:ident => $id:ident),* $(,)?) => {$(
        impl Entity for $ty {
            type Id = $id;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    )*};
}

entity!(
    Ticket => TicketId,
    TeamMember => MemberId,
    Customer => CustomerId,
    Connection => ConnectionId,
    Plan => PlanId,
    Subscription => SubscriptionId,
    Area => AreaId,
    Lead => LeadId,
    Invoice => InvoiceId,
    Notification => NotificationId,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_decodes_backend_shape() {
        let json = r#"{
            "_id": "T1",
            "title": "No signal",
            "status": "In Progress",
            "priority": "High",
            "assignedTo": "M1",
            "createdAt": "2026-03-01T10:00:00Z",
            "assignmentHistory": [
                {"assignedTo": "M1", "assignedBy": "Asha", "assignedAt": "2026-03-01T10:05:00Z", "note": "nearest tech"}
            ]
        }"#;
        let ticket: Ticket = serde_json::from_str(json).expect("decode");
        assert_eq!(ticket.id.as_str(), "T1");
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.assigned_to, Some(MemberId::from("M1")));
        assert_eq!(ticket.assignment_history.len(), 1);
        assert!(ticket.description.is_empty());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"_id":"T1","title":"x","status":"Escalated","createdAt":"2026-03-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Ticket>(json).is_err());
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(serde_json::to_string(&TicketStatus::InProgress).unwrap(), "\"In Progress\"");
        assert_eq!("On Hold".parse::<TicketStatus>(), Ok(TicketStatus::OnHold));
        assert!("on hold".parse::<TicketStatus>().is_err());
        assert!(TicketStatus::OnHold.is_open());
        assert!(!TicketStatus::Closed.is_open());
    }

    #[test]
    fn test_id_alias_accepted() {
        let json = r#"{"id":"A1","name":"North"}"#;
        let area: Area = serde_json::from_str(json).expect("decode");
        assert_eq!(area.id, AreaId::from("A1"));
    }
}
