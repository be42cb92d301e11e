//! Lambda entry point - thin router over the two webhook sources.
//!
//! This module handles:
//! - GET status / health / diagnostic routes
//! - Telegram updates (delegated to `approval`)
//! - ClickUp webhooks (delegated to `task_events`), optionally signature-checked

use chrono::Utc;
use futures::FutureExt;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use std::panic::AssertUnwindSafe;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{approval, helpers, parsing, signature, task_events};
use crate::relay::Relay;
use crate::telegram::Target;
use crate::telegram::message_builder::build_test_message;
use crate::telegram::models::Update;
use crate::utils::jalali::jalali_now;

/// Which platform an inbound POST body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundKind {
    Telegram,
    ClickUp,
    Unknown,
}

#[must_use]
pub fn classify_body(body: &Value) -> InboundKind {
    if body.get("update_id").is_some() {
        InboundKind::Telegram
    } else if body.get("payload").is_some() || body.get("event").is_some() {
        InboundKind::ClickUp
    } else {
        InboundKind::Unknown
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never returns `Err` in practice; every failure, including a panic inside
/// a handler, becomes an HTTP error body so later events are still served.
pub async fn function_handler(relay: &Relay, event: LambdaEvent<Value>) -> Result<Value, Error> {
    match AssertUnwindSafe(handle_request(relay, &event.payload))
        .catch_unwind()
        .await
    {
        Ok(response) => Ok(response),
        Err(_) => {
            error!("Handler panicked; returning a generic error");
            Ok(helpers::err_response(500, "Internal error"))
        }
    }
}

/// Route one API Gateway proxy event and produce its response.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_request(relay: &Relay, payload: &Value) -> Value {
    let method = parsing::request_method(payload);
    let path = parsing::request_path(payload);
    info!(method = %method, path = %path, "Webhook request received");

    match method.as_str() {
        "GET" => handle_get(relay, path).await,
        "POST" => handle_post(relay, payload).await,
        _ => helpers::err_response(405, "Method not allowed"),
    }
}

// ============================================================================
// GET routes
// ============================================================================

async fn handle_get(relay: &Relay, path: &str) -> Value {
    if path.ends_with("/health") {
        return helpers::ok_json(&json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
        }));
    }

    if path.ends_with("/test") {
        let message = build_test_message(Utc::now());
        let sent = relay
            .notifier()
            .send_text(Target::Default, &message, None)
            .await;
        let status = if sent.is_ok() { "ok" } else { "error" };
        return helpers::ok_json(&json!({ "status": status }));
    }

    helpers::ok_json(&json!({ "status": "running", "time": jalali_now() }))
}

// ============================================================================
// POST routes
// ============================================================================

async fn handle_post(relay: &Relay, payload: &Value) -> Value {
    let raw = match parsing::extract_body(payload) {
        Ok(raw) => raw,
        Err(e) => {
            error!("Unreadable request body: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    let body: Value = if raw.is_empty() {
        json!({})
    } else {
        match serde_json::from_slice(&raw) {
            Ok(v) => v,
            Err(e) => {
                error!("Request body is not JSON: {}", e);
                return helpers::err_response(400, "Invalid JSON body");
            }
        }
    };

    let empty = json!({});
    let headers = payload.get("headers").unwrap_or(&empty);

    match classify_body(&body) {
        InboundKind::Telegram => {
            if let Err(response) = verify_telegram(relay, headers) {
                return response;
            }
            handle_telegram(relay, body).await
        }
        InboundKind::ClickUp => {
            if let Err(response) = verify_clickup(relay, &raw, headers) {
                return response;
            }
            let report = task_events::handle_task_event(relay, &body).await;
            info!(
                task_id = %report.task_id,
                delivered = report.delivered,
                failed = report.failed,
                "ClickUp event handled"
            );
            helpers::ok_status()
        }
        InboundKind::Unknown => {
            info!("Ignoring body of unknown shape");
            helpers::ok_status()
        }
    }
}

async fn handle_telegram(relay: &Relay, body: Value) -> Value {
    let update: Update = match serde_json::from_value(body) {
        Ok(update) => update,
        Err(e) => {
            // Telegram retries non-2xx deliveries; a malformed update is dropped.
            warn!("Malformed Telegram update: {}", e);
            return helpers::ok_status();
        }
    };

    let outcome = approval::handle_update(relay, &update).await;
    info!(update_id = update.update_id, outcome = ?outcome, "Telegram update handled");
    helpers::ok_status()
}

// ============================================================================
// Request verification
// ============================================================================

fn verify_clickup(relay: &Relay, raw: &[u8], headers: &Value) -> Result<(), Value> {
    let Some(secret) = relay.config().clickup_webhook_secret.as_deref() else {
        return Ok(());
    };

    let Some(sig) = parsing::get_header_value(headers, "X-Signature") else {
        error!("Missing X-Signature header");
        return Err(helpers::err_response(401, "Missing X-Signature header"));
    };

    if !signature::verify_clickup_signature(raw, sig, secret) {
        return Err(helpers::err_response(401, "Invalid signature"));
    }

    info!("ClickUp signature verified successfully");
    Ok(())
}

fn verify_telegram(relay: &Relay, headers: &Value) -> Result<(), Value> {
    let Some(expected) = relay.config().telegram_webhook_secret.as_deref() else {
        return Ok(());
    };

    let presented =
        parsing::get_header_value(headers, "X-Telegram-Bot-Api-Secret-Token").unwrap_or("");
    if signature::verify_secret_token(presented, expected) {
        Ok(())
    } else {
        error!("Telegram secret token mismatch");
        Err(helpers::err_response(401, "Invalid secret token"))
    }
}
