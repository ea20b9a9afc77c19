//! Team & Area API

use gloo_net::http::Method;
use serde::Serialize;

use super::{call, get, send, seg};
use crate::error::ApiResult;
use crate::forms::{NewArea, NewMember};
use crate::models::{Area, AreaId, MemberId, TeamMember};

#[derive(Serialize)]
struct AreasArgs<'a> {
    areas: &'a [AreaId],
}

// ============ Team ============

pub async fn list_team() -> ApiResult<Vec<TeamMember>> {
    get("/team").await
}

pub async fn create_member(member: &NewMember) -> ApiResult<TeamMember> {
    send(Method::POST, "/team", member).await
}

/// Replaces the member's whole area list
pub async fn set_member_areas(id: &MemberId, areas: &[AreaId]) -> ApiResult<TeamMember> {
    send(Method::PATCH, &format!("/team/{}/areas", seg(id.as_str())), &AreasArgs { areas }).await
}

pub async fn delete_member(id: &MemberId) -> ApiResult<()> {
    call(Method::DELETE, &format!("/team/{}", seg(id.as_str()))).await
}

// ============ Areas ============

pub async fn list_areas() -> ApiResult<Vec<Area>> {
    get("/areas").await
}

pub async fn create_area(area: &NewArea) -> ApiResult<Area> {
    send(Method::POST, "/areas", area).await
}

pub async fn delete_area(id: &AreaId) -> ApiResult<()> {
    call(Method::DELETE, &format!("/areas/{}", seg(id.as_str()))).await
}
