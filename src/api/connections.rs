//! Connection API

use gloo_net::http::Method;
use serde::Serialize;

use super::{get, query, send, seg};
use crate::error::ApiResult;
use crate::forms::NewConnection;
use crate::models::{Connection, ConnectionId, ConnectionStatus, CustomerId};

#[derive(Serialize)]
struct StatusArgs {
    status: ConnectionStatus,
}

pub async fn list_connections() -> ApiResult<Vec<Connection>> {
    get("/connections").await
}

pub async fn list_customer_connections(customer: &CustomerId) -> ApiResult<Vec<Connection>> {
    get(&format!("/connections{}", query("customer", customer.as_str()))).await
}

pub async fn create_connection(connection: &NewConnection) -> ApiResult<Connection> {
    send(Method::POST, "/connections", connection).await
}

pub async fn update_connection_status(id: &ConnectionId, status: ConnectionStatus) -> ApiResult<Connection> {
    send(Method::PATCH, &format!("/connections/{}/status", seg(id.as_str())), &StatusArgs { status }).await
}
