//! Form State
//!
//! Raw text held by each form while the user types, and the validated request
//! payload it turns into on submit.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AreaId, ConnectionId, ConnectionType, CustomerId, Lead, PlanId, Priority, Role};
use crate::validation::ValidationErrors;

fn optional_id<T: From<String>>(value: &str) -> Option<T> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(T::from(value.to_string()))
    }
}

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

// ============ Customer ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
}

impl CustomerForm {
    /// Profile prefilled from a lead being onboarded; the area is left to pick
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone().unwrap_or_default(),
            address: lead.address.clone(),
            area: String::new(),
        }
    }

    pub fn validate(&self) -> Result<NewCustomer, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.required("name", &self.name);
        let phone = errors.phone("phone", &self.phone);
        let email = errors.optional_email("email", &self.email);
        let address = errors.required("address", &self.address);
        let area = optional_id(&self.area);
        errors.finish(|| NewCustomer { name, phone, email, address, area })
    }
}

// ============ Connection ============

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionForm {
    pub connection_type: String,
    pub router_model: String,
    pub router_serial: String,
    pub ont_serial: String,
    pub mac_address: String,
    pub ip_address: String,
    pub installation_date: String,
    pub area: String,
}

impl Default for ConnectionForm {
    fn default() -> Self {
        Self {
            connection_type: ConnectionType::Ftth.as_str().to_string(),
            router_model: String::new(),
            router_serial: String::new(),
            ont_serial: String::new(),
            mac_address: String::new(),
            ip_address: String::new(),
            installation_date: String::new(),
            area: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConnection {
    pub customer: CustomerId,
    pub connection_type: ConnectionType,
    pub router_model: String,
    pub router_serial: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ont_serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
}

impl ConnectionForm {
    pub fn validate(&self, customer: &CustomerId) -> Result<NewConnection, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let connection_type = errors.choice::<ConnectionType>("connectionType", &self.connection_type);
        let router_model = errors.required("routerModel", &self.router_model);
        let router_serial = errors.required("routerSerial", &self.router_serial);
        let ont_serial = optional_text(&self.ont_serial);
        let mac_address = errors.optional_mac("macAddress", &self.mac_address);
        let ip_address = errors.optional_ipv4("ipAddress", &self.ip_address);
        let installation_date = errors.optional_date("installationDate", &self.installation_date);

        // FTTH lines terminate on an ONT
        if connection_type == Some(ConnectionType::Ftth) && ont_serial.is_none() {
            errors.add("ontSerial", "is required for FTTH");
        }

        match connection_type {
            Some(connection_type) => errors.finish(|| NewConnection {
                customer: customer.clone(),
                connection_type,
                router_model,
                router_serial,
                ont_serial,
                mac_address,
                ip_address,
                installation_date,
                area: optional_id(&self.area),
            }),
            None => Err(errors),
        }
    }
}

// ============ Plan selection (wizard step three) ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanSelection {
    pub plan: String,
    /// Blank = today
    pub start_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub customer: CustomerId,
    pub connection: ConnectionId,
    pub plan: PlanId,
    pub start_date: NaiveDate,
}

impl PlanSelection {
    pub fn validate(
        &self,
        customer: &CustomerId,
        connection: &ConnectionId,
        today: NaiveDate,
    ) -> Result<NewSubscription, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let plan = errors.required("plan", &self.plan);
        let start_date = errors.optional_date("startDate", &self.start_date).unwrap_or(today);
        if start_date < today {
            errors.add("startDate", "cannot be in the past");
        }
        errors.finish(|| NewSubscription {
            customer: customer.clone(),
            connection: connection.clone(),
            plan: PlanId::from(plan),
            start_date,
        })
    }
}

// ============ Plan catalog ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanForm {
    pub name: String,
    pub speed_mbps: String,
    pub price: String,
    pub validity_days: String,
    /// Blank = unlimited
    pub data_limit_gb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub name: String,
    pub speed_mbps: u32,
    pub price: f64,
    pub validity_days: u32,
    pub data_limit_gb: Option<u32>,
    pub active: bool,
}

impl PlanForm {
    pub fn validate(&self) -> Result<NewPlan, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.required("name", &self.name);
        let speed_mbps = errors.positive::<u32>("speedMbps", &self.speed_mbps);
        let price = errors.amount("price", &self.price);
        let validity_days = errors.positive::<u32>("validityDays", &self.validity_days);
        let data_limit_gb = errors.optional_positive::<u32>("dataLimitGb", &self.data_limit_gb);
        match (speed_mbps, price, validity_days) {
            (Some(speed_mbps), Some(price), Some(validity_days)) => errors.finish(|| NewPlan {
                name,
                speed_mbps,
                price,
                validity_days,
                data_limit_gb,
                active: true,
            }),
            _ => Err(errors),
        }
    }
}

// ============ Lead ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub source: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    pub source: String,
    pub note: String,
}

impl LeadForm {
    pub fn validate(&self) -> Result<NewLead, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.required("name", &self.name);
        let phone = errors.phone("phone", &self.phone);
        let email = errors.optional_email("email", &self.email);
        errors.finish(|| NewLead {
            name,
            phone,
            email,
            address: self.address.trim().to_string(),
            source: optional_text(&self.source).unwrap_or_else(|| "Walk-in".to_string()),
            note: self.note.trim().to_string(),
        })
    }
}

// ============ Team ============

#[derive(Debug, Clone, PartialEq)]
pub struct MemberForm {
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub areas: Vec<AreaId>,
}

impl Default for MemberForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: Role::Technician.as_str().to_string(),
            phone: String::new(),
            email: String::new(),
            areas: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub role: Role,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub areas: Vec<AreaId>,
}

impl MemberForm {
    pub fn validate(&self) -> Result<NewMember, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.required("name", &self.name);
        let role = errors.choice::<Role>("role", &self.role);
        let phone = errors.phone("phone", &self.phone);
        let email = errors.optional_email("email", &self.email);
        match role {
            Some(role) => errors.finish(|| NewMember { name, role, phone, email, areas: self.areas.clone() }),
            None => Err(errors),
        }
    }
}

// ============ Area ============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaForm {
    pub name: String,
    pub pincode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArea {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

impl AreaForm {
    pub fn validate(&self) -> Result<NewArea, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = errors.required("name", &self.name);
        let pincode = errors.optional_pincode("pincode", &self.pincode);
        errors.finish(|| NewArea { name, pincode })
    }
}

// ============ Ticket ============

#[derive(Debug, Clone, PartialEq)]
pub struct TicketForm {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub customer: String,
    pub area: String,
    pub assigned_to: String,
}

impl Default for TicketForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::Medium.as_str().to_string(),
            customer: String::new(),
            area: String::new(),
            assigned_to: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<AreaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<crate::models::MemberId>,
}

impl TicketForm {
    pub fn validate(&self) -> Result<NewTicket, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = errors.required("title", &self.title);
        let priority = errors.choice::<Priority>("priority", &self.priority);
        match priority {
            Some(priority) => errors.finish(|| NewTicket {
                title,
                description: self.description.trim().to_string(),
                priority,
                customer: optional_id(&self.customer),
                area: optional_id(&self.area),
                assigned_to: optional_id(&self.assigned_to),
            }),
            None => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{LeadId, LeadStatus};

    #[test]
    fn test_customer_form() {
        let form = CustomerForm {
            name: " Priya Sharma ".into(),
            phone: "+91 98450 12345".into(),
            email: String::new(),
            address: "12 MG Road".into(),
            area: "A1".into(),
        };
        let payload = form.validate().expect("valid");
        assert_eq!(payload.name, "Priya Sharma");
        assert_eq!(payload.email, None);
        assert_eq!(payload.area, Some(AreaId::from("A1")));

        let json = serde_json::to_value(&payload).expect("encode");
        assert!(json.get("email").is_none());
        assert_eq!(json["area"], "A1");
    }

    #[test]
    fn test_customer_form_from_lead() {
        let lead = Lead {
            id: LeadId::from("L1"),
            name: "Ravi Kumar".into(),
            phone: "98450 55555".into(),
            email: None,
            address: "4th Cross, Jayanagar".into(),
            source: "walk-in".into(),
            status: LeadStatus::Qualified,
            note: String::new(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        };
        let form = CustomerForm::from_lead(&lead);
        assert_eq!(form.name, "Ravi Kumar");
        assert_eq!(form.email, "");
        assert_eq!(form.area, "");

        let payload = form.validate().expect("lead details are a valid profile");
        assert_eq!(payload.address, "4th Cross, Jayanagar");
        assert_eq!(payload.email, None);
        assert_eq!(payload.area, None);
    }

    #[test]
    fn test_customer_form_reports_every_field() {
        let form = CustomerForm { email: "nope".into(), ..Default::default() };
        let errors = form.validate().expect_err("invalid");
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.get("phone"), Some("is required"));
        assert_eq!(errors.get("email"), Some("is not a valid email"));
        assert_eq!(errors.get("address"), Some("is required"));
    }

    #[test]
    fn test_connection_form_hardware_checks() {
        let customer = CustomerId::from("C1");
        let form = ConnectionForm {
            router_model: "TP-Link XC220".into(),
            router_serial: "RS-1".into(),
            mac_address: "00:11:22:33:44".into(),
            ip_address: "10.0.0.999".into(),
            ..Default::default()
        };
        let errors = form.validate(&customer).expect_err("invalid");
        assert!(errors.get("macAddress").is_some());
        assert!(errors.get("ipAddress").is_some());
        assert_eq!(errors.get("ontSerial"), Some("is required for FTTH"));

        let form = ConnectionForm {
            connection_type: "Wireless".into(),
            router_model: "Ubiquiti".into(),
            router_serial: "RS-2".into(),
            ip_address: "10.0.0.9".into(),
            installation_date: "2026-03-04".into(),
            ..Default::default()
        };
        let payload = form.validate(&customer).expect("valid");
        assert_eq!(payload.connection_type, ConnectionType::Wireless);
        let json = serde_json::to_value(&payload).expect("encode");
        assert_eq!(json["connectionType"], "Wireless");
        assert_eq!(json["installationDate"], "2026-03-04");
        assert_eq!(json["customer"], "C1");
    }

    #[test]
    fn test_plan_selection_defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).expect("date");
        let selection = PlanSelection { plan: "P1".into(), start_date: String::new() };
        let payload = selection
            .validate(&CustomerId::from("C1"), &ConnectionId::from("N1"), today)
            .expect("valid");
        assert_eq!(payload.start_date, today);

        let selection = PlanSelection { plan: String::new(), start_date: "2026-02-01".into() };
        let errors = selection
            .validate(&CustomerId::from("C1"), &ConnectionId::from("N1"), today)
            .expect_err("invalid");
        assert_eq!(errors.get("plan"), Some("is required"));
        assert_eq!(errors.get("startDate"), Some("cannot be in the past"));
    }

    #[test]
    fn test_plan_form_numbers() {
        let form = PlanForm {
            name: "Fiber 100".into(),
            speed_mbps: "100".into(),
            price: "699.00".into(),
            validity_days: "30".into(),
            data_limit_gb: String::new(),
        };
        let plan = form.validate().expect("valid");
        assert_eq!(plan.speed_mbps, 100);
        assert_eq!(plan.data_limit_gb, None);

        let form = PlanForm { price: "0".into(), speed_mbps: "fast".into(), ..form };
        let errors = form.validate().expect_err("invalid");
        assert!(errors.get("price").is_some());
        assert!(errors.get("speedMbps").is_some());
    }

    #[test]
    fn test_plan_price_rejects_infinity() {
        let form = PlanForm {
            name: "Fiber 100".into(),
            speed_mbps: "100".into(),
            price: "inf".into(),
            validity_days: "30".into(),
            data_limit_gb: String::new(),
        };
        let errors = form.validate().expect_err("infinite price");
        assert_eq!(errors.get("price"), Some("must be a number greater than zero"));

        let form = PlanForm { price: "1e999".into(), ..form };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_lead_source_defaults() {
        let form = LeadForm { name: "Ravi".into(), phone: "9876543210".into(), ..Default::default() };
        assert_eq!(form.validate().expect("valid").source, "Walk-in");
    }

    #[test]
    fn test_member_role_must_be_known() {
        let form = MemberForm {
            name: "Arjun".into(),
            role: "Intern".into(),
            phone: "9876543210".into(),
            ..Default::default()
        };
        assert_eq!(form.validate().expect_err("invalid").get("role"), Some("pick one of the options"));
    }

    #[test]
    fn test_area_pincode() {
        let form = AreaForm { name: "Koramangala".into(), pincode: "5600".into() };
        assert!(form.validate().is_err());
        let form = AreaForm { pincode: "560034".into(), ..form };
        assert_eq!(form.validate().expect("valid").pincode.as_deref(), Some("560034"));
    }

    #[test]
    fn test_ticket_form() {
        let form = TicketForm { title: "No signal".into(), customer: "C1".into(), ..Default::default() };
        let ticket = form.validate().expect("valid");
        assert_eq!(ticket.priority, Priority::Medium);
        assert_eq!(ticket.customer, Some(CustomerId::from("C1")));
        assert_eq!(ticket.assigned_to, None);
    }
}
