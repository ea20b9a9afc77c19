//! REST API Wrappers
//!
//! Frontend bindings to backend endpoints, organized by domain.
//! Every response goes through [`envelope::decode`], the single place that
//! knows the backend's response shape.

mod envelope;
mod tickets;
mod customers;
mod connections;
mod plans;
mod team;
mod leads;
mod billing;
mod notifications;

use gloo_net::http::{Method, RequestBuilder, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiResult;

// Re-export all public items
pub use envelope::decode;
pub use tickets::*;
pub use customers::*;
pub use connections::*;
pub use plans::*;
pub use team::*;
pub use leads::*;
pub use billing::*;
pub use notifications::*;

fn request(method: Method, path: &str) -> RequestBuilder {
    let cfg = ApiConfig::load();
    let builder = RequestBuilder::new(&cfg.url(path))
        .method(method)
        .header("Accept", "application/json");
    match &cfg.token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn finish<T: DeserializeOwned>(method: &Method, path: &str, resp: Response) -> ApiResult<T> {
    let status = resp.status();
    let body = resp.text().await?;
    let decoded = decode(status, &body);
    if let Err(e) = &decoded {
        tracing::warn!(status, "{} {} failed: {}", method, path, e);
    }
    decoded
}

pub(crate) async fn get<T: DeserializeOwned>(path: &str) -> ApiResult<T> {
    let resp = request(Method::GET, path).send().await?;
    finish(&Method::GET, path, resp).await
}

pub(crate) async fn send<B, T>(method: Method, path: &str, body: &B) -> ApiResult<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let resp = request(method.clone(), path).json(body)?.send().await?;
    finish(&method, path, resp).await
}

/// Body-less write (`PATCH .../read-all`, `DELETE ...`)
pub(crate) async fn call<T: DeserializeOwned>(method: Method, path: &str) -> ApiResult<T> {
    let resp = request(method.clone(), path).send().await?;
    finish(&method, path, resp).await
}

/// `?key=value` with the value percent-encoded
pub(crate) fn query(key: &str, value: &str) -> String {
    format!("?{}={}", key, utf8_percent_encode(value, NON_ALPHANUMERIC))
}

/// Path segment for an id, percent-encoded
pub(crate) fn seg(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encoding() {
        assert_eq!(query("customer", "abc123"), "?customer=abc123");
        assert_eq!(query("q", "a b&c"), "?q=a%20b%26c");
        assert_eq!(seg("x/y"), "x%2Fy");
    }
}
