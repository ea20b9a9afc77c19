//! Plan & Subscription API

use gloo_net::http::Method;
use serde::Serialize;

use super::{call, get, query, send, seg};
use crate::error::ApiResult;
use crate::forms::{NewPlan, NewSubscription};
use crate::models::{CustomerId, Plan, PlanId, Subscription};

#[derive(Serialize)]
struct ActiveArgs {
    active: bool,
}

// ============ Plans ============

pub async fn list_plans() -> ApiResult<Vec<Plan>> {
    get("/plans").await
}

pub async fn create_plan(plan: &NewPlan) -> ApiResult<Plan> {
    send(Method::POST, "/plans", plan).await
}

pub async fn set_plan_active(id: &PlanId, active: bool) -> ApiResult<Plan> {
    send(Method::PATCH, &format!("/plans/{}", seg(id.as_str())), &ActiveArgs { active }).await
}

pub async fn delete_plan(id: &PlanId) -> ApiResult<()> {
    call(Method::DELETE, &format!("/plans/{}", seg(id.as_str()))).await
}

// ============ Subscriptions ============

pub async fn list_subscriptions(customer: &CustomerId) -> ApiResult<Vec<Subscription>> {
    get(&format!("/subscriptions{}", query("customer", customer.as_str()))).await
}

pub async fn create_subscription(subscription: &NewSubscription) -> ApiResult<Subscription> {
    send(Method::POST, "/subscriptions", subscription).await
}
