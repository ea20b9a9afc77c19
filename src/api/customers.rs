//! Customer API

use gloo_net::http::Method;

use super::{call, get, send, seg};
use crate::error::ApiResult;
use crate::forms::NewCustomer;
use crate::models::{Customer, CustomerId};

pub async fn list_customers() -> ApiResult<Vec<Customer>> {
    get("/customers").await
}

pub async fn get_customer(id: &CustomerId) -> ApiResult<Customer> {
    get(&format!("/customers/{}", seg(id.as_str()))).await
}

pub async fn create_customer(customer: &NewCustomer) -> ApiResult<Customer> {
    send(Method::POST, "/customers", customer).await
}

pub async fn delete_customer(id: &CustomerId) -> ApiResult<()> {
    call(Method::DELETE, &format!("/customers/{}", seg(id.as_str()))).await
}
