//! Notification API

use gloo_net::http::Method;

use super::{call, get, seg};
use crate::error::ApiResult;
use crate::models::{Notification, NotificationId};

pub async fn list_notifications() -> ApiResult<Vec<Notification>> {
    get("/notifications").await
}

pub async fn mark_notification_read(id: &NotificationId) -> ApiResult<Notification> {
    call(Method::PATCH, &format!("/notifications/{}/read", seg(id.as_str()))).await
}

pub async fn mark_all_notifications_read() -> ApiResult<()> {
    call(Method::PATCH, "/notifications/read-all").await
}

pub async fn delete_notification(id: &NotificationId) -> ApiResult<()> {
    call(Method::DELETE, &format!("/notifications/{}", seg(id.as_str()))).await
}
