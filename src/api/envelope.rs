//! Response Envelope
//!
//! The backend wraps every payload as `{"success": bool, "message": string?, "data": T?}`.
//! Anything else is a shape error; there is no guessing between alternate layouts.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

#[derive(Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

fn fallback_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Not signed in".to_string(),
        403 => "Not allowed".to_string(),
        404 => "Not found".to_string(),
        409 => "Conflict".to_string(),
        500..=599 => "Server error".to_string(),
        _ => format!("Request failed with status {}", status),
    }
}

/// Decode an HTTP status + body into the payload type.
///
/// A missing or null `data` decodes as JSON `null`, which suits `()` and `Option<T>`.
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    let ok_status = (200..300).contains(&status);

    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(_) if !ok_status => {
            return Err(ApiError::Rejected { status, message: fallback_message(status) });
        }
        Err(e) => return Err(ApiError::Shape(e.to_string())),
    };

    if !ok_status || !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback_message(status));
        return Err(ApiError::Rejected { status, message });
    }

    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| ApiError::Shape(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ticket, TicketStatus};

    const TICKET: &str = r#"{"_id":"T1","title":"Fiber cut","status":"Open","createdAt":"2026-03-01T10:00:00Z"}"#;

    #[test]
    fn test_success_payload() {
        let body = format!(r#"{{"success":true,"data":{}}}"#, TICKET);
        let ticket: Ticket = decode(200, &body).expect("decode");
        assert_eq!(ticket.status, TicketStatus::Open);
    }

    #[test]
    fn test_unit_payload_without_data() {
        decode::<()>(200, r#"{"success":true,"message":"deleted"}"#).expect("decode");
        decode::<()>(204, r#"{"success":true,"data":null}"#).expect("decode");
    }

    #[test]
    fn test_success_false_is_rejected_with_message() {
        let err = decode::<Ticket>(200, r#"{"success":false,"message":"Ticket locked"}"#).unwrap_err();
        assert_eq!(err, ApiError::Rejected { status: 200, message: "Ticket locked".into() });
    }

    #[test]
    fn test_error_status_without_json_body() {
        let err = decode::<Ticket>(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, ApiError::Rejected { status: 502, message: "Server error".into() });
    }

    #[test]
    fn test_bare_payload_is_a_shape_error() {
        // The payload without its envelope must not be accepted
        let err = decode::<Ticket>(200, TICKET).unwrap_err();
        assert!(matches!(err, ApiError::Shape(_)));
    }

    #[test]
    fn test_nested_payload_is_a_shape_error() {
        let body = format!(r#"{{"success":true,"data":{{"ticket":{}}}}}"#, TICKET);
        assert!(matches!(decode::<Ticket>(200, &body), Err(ApiError::Shape(_))));
    }
}
