//! Read-only ClickUp API access.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{Comment, CommentsResponse, Task};
use crate::core::config::AppConfig;
use crate::errors::RelayError;

/// Timeout for ClickUp metadata fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of task metadata. `Ok(None)` means ClickUp had nothing to return.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn get_task(&self, task_id: &str) -> Result<Option<Task>, RelayError>;

    /// Newest comment on the task; ClickUp lists comments newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    async fn get_latest_comment(&self, task_id: &str) -> Result<Option<Comment>, RelayError>;
}

pub struct ClickUpClient {
    http: Client,
    token: String,
    api_base: String,
}

impl ClickUpClient {
    #[must_use]
    pub fn new(http: Client, token: String, api_base: &str) -> Self {
        Self {
            http,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// `None` when no API token is configured; fetches are then skipped.
    #[must_use]
    pub fn from_config(http: Client, config: &AppConfig) -> Option<Self> {
        config
            .clickup_api_token
            .as_ref()
            .map(|token| Self::new(http, token.clone(), &config.clickup_api_base))
    }

    async fn get_json(&self, path: &str) -> Result<Option<Value>, RelayError> {
        let url = format!("{}{path}", self.api_base);
        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(path = %path, "ClickUp returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RelayError::ClickUpError(format!("GET {path} HTTP {status}")));
        }

        Ok(Some(resp.json::<Value>().await?))
    }
}

#[async_trait]
impl TaskApi for ClickUpClient {
    async fn get_task(&self, task_id: &str) -> Result<Option<Task>, RelayError> {
        match self.get_json(&format!("/task/{task_id}")).await? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    async fn get_latest_comment(&self, task_id: &str) -> Result<Option<Comment>, RelayError> {
        let Some(body) = self.get_json(&format!("/task/{task_id}/comment")).await? else {
            return Ok(None);
        };
        let response: CommentsResponse = serde_json::from_value(body)?;
        let Some(first) = response.comments.into_iter().next() else {
            return Ok(None);
        };

        match serde_json::from_value::<Comment>(first) {
            Ok(comment) => Ok(Some(comment)),
            Err(e) => {
                warn!(task_id = %task_id, "Latest comment has an unexpected shape: {}", e);
                Ok(None)
            }
        }
    }
}
