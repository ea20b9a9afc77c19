//! Billing API

use gloo_net::http::Method;

use super::{call, get, query, seg};
use crate::error::ApiResult;
use crate::models::{CustomerId, Invoice, InvoiceId};

pub async fn list_invoices() -> ApiResult<Vec<Invoice>> {
    get("/invoices").await
}

pub async fn list_customer_invoices(customer: &CustomerId) -> ApiResult<Vec<Invoice>> {
    get(&format!("/invoices{}", query("customer", customer.as_str()))).await
}

pub async fn mark_invoice_paid(id: &InvoiceId) -> ApiResult<Invoice> {
    call(Method::PATCH, &format!("/invoices/{}/pay", seg(id.as_str()))).await
}
