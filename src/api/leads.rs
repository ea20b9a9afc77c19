//! Lead API

use gloo_net::http::Method;
use serde::Serialize;

use super::{call, get, send, seg};
use crate::error::ApiResult;
use crate::forms::NewLead;
use crate::models::{Lead, LeadId, LeadStatus};

#[derive(Serialize)]
struct StatusArgs {
    status: LeadStatus,
}

pub async fn list_leads() -> ApiResult<Vec<Lead>> {
    get("/leads").await
}

pub async fn create_lead(lead: &NewLead) -> ApiResult<Lead> {
    send(Method::POST, "/leads", lead).await
}

pub async fn update_lead_status(id: &LeadId, status: LeadStatus) -> ApiResult<Lead> {
    send(Method::PATCH, &format!("/leads/{}/status", seg(id.as_str())), &StatusArgs { status }).await
}

pub async fn delete_lead(id: &LeadId) -> ApiResult<()> {
    call(Method::DELETE, &format!("/leads/{}", seg(id.as_str()))).await
}
