//! Ticket API

use async_trait::async_trait;
use gloo_net::http::Method;
use serde::Serialize;

use super::{get, send, seg};
use crate::board::TicketGateway;
use crate::error::ApiResult;
use crate::forms::NewTicket;
use crate::models::{MemberId, Ticket, TicketId, TicketStatus};

#[derive(Serialize)]
struct StatusArgs {
    status: TicketStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignArgs<'a> {
    assigned_to: &'a MemberId,
    note: &'a str,
    assigned_by: &'a str,
}

pub async fn list_tickets() -> ApiResult<Vec<Ticket>> {
    get("/tickets").await
}

pub async fn get_ticket(id: &TicketId) -> ApiResult<Ticket> {
    get(&format!("/tickets/{}", seg(id.as_str()))).await
}

pub async fn create_ticket(ticket: &NewTicket) -> ApiResult<Ticket> {
    send(Method::POST, "/tickets", ticket).await
}

pub async fn update_ticket_status(id: &TicketId, status: TicketStatus) -> ApiResult<Ticket> {
    send(Method::PATCH, &format!("/tickets/{}/status", seg(id.as_str())), &StatusArgs { status }).await
}

pub async fn assign_ticket(id: &TicketId, to: &MemberId, note: &str, by: &str) -> ApiResult<Ticket> {
    let args = AssignArgs { assigned_to: to, note, assigned_by: by };
    send(Method::PATCH, &format!("/tickets/{}/assign", seg(id.as_str())), &args).await
}

/// Board gateway backed by the REST endpoints above
#[derive(Debug, Clone, Copy, Default)]
pub struct RestTickets;

#[async_trait(?Send)]
impl TicketGateway for RestTickets {
    async fn update_status(&self, id: &TicketId, status: TicketStatus) -> ApiResult<Ticket> {
        update_ticket_status(id, status).await
    }

    async fn reassign(&self, id: &TicketId, to: &MemberId, note: &str, by: &str) -> ApiResult<Ticket> {
        assign_ticket(id, to, note, by).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_value(StatusArgs { status: TicketStatus::InProgress }).expect("encode");
        assert_eq!(body, serde_json::json!({"status": "In Progress"}));

        let to = MemberId::from("M2");
        let body = serde_json::to_value(AssignArgs { assigned_to: &to, note: "shift change", assigned_by: "Asha" })
            .expect("encode");
        assert_eq!(body["assignedTo"], "M2");
        assert_eq!(body["note"], "shift change");
    }
}
