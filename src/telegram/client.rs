//! Telegram Bot API transport.
//!
//! A single JSON-over-POST call per method; no retries. The [`BotApi`] trait
//! is the seam the notifier talks to.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::RelayError;

/// Timeout for message and photo sends.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for acknowledgements and markup edits.
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait BotApi: Send + Sync {
    /// Invoke `method` with a JSON body and return its `result`.
    ///
    /// # Errors
    ///
    /// `HttpError` on transport failure or timeout, `TelegramError` when the
    /// API answers with `ok: false` or a non-success status.
    async fn call(&self, method: &str, params: Value, timeout: Duration)
    -> Result<Value, RelayError>;
}

pub struct TelegramClient {
    http: Client,
    token: String,
    api_base: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(http: Client, token: String, api_base: &str) -> Self {
        Self {
            http,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.token)
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn call(
        &self,
        method: &str,
        params: Value,
        timeout: Duration,
    ) -> Result<Value, RelayError> {
        let resp = self
            .http
            .post(self.method_url(method))
            .json(&params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| RelayError::HttpError(format!("{method}: {}", e.without_url())))?;

        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(Value::Null);

        if status.is_success()
            && body
                .get("ok")
                .and_then(Value::as_bool)
                .unwrap_or(false)
        {
            debug!(method = %method, "Telegram call succeeded");
            return Ok(body.get("result").cloned().unwrap_or(Value::Null));
        }

        Err(RelayError::TelegramError(format!(
            "{method} HTTP {status}: {}",
            body.get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
        )))
    }
}
