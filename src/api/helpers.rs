//! Response builders for the API Gateway proxy format.

use serde_json::{Value, json};

/// Returns a 200 OK response with `{"status": "ok"}`.
#[must_use]
pub fn ok_status() -> Value {
    ok_json(&json!({ "status": "ok" }))
}

/// Returns a 200 OK response with the given JSON body.
#[must_use]
pub fn ok_json(body: &Value) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "status": "error", "error": message }).to_string()
    })
}
