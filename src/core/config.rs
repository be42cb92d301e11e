use std::env;

use anyhow::Context;

use super::registry::{Destination, DestinationRegistry};
use crate::errors::RelayError;

pub const DEFAULT_CLASSIFICATION_FIELD: &str = "requestor";
pub const DEFAULT_TASK_LINK_BASE: &str = "https://app.clickup.com/t/";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_CLICKUP_API_BASE: &str = "https://api.clickup.com/api/v2";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    /// Operator chat that receives every event (and the approval buttons).
    pub default_chat_id: String,
    pub clickup_api_token: Option<String>,
    /// Shared secret for the ClickUp `X-Signature` HMAC. Verification is off when unset.
    pub clickup_webhook_secret: Option<String>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token`. Checked only when set.
    pub telegram_webhook_secret: Option<String>,
    pub classification_field: String,
    pub require_approval: bool,
    pub also_notify_default: bool,
    pub show_task_link: bool,
    pub task_link_base: String,
    pub telegram_api_base: String,
    pub clickup_api_base: String,
    pub destinations: DestinationRegistry,
}

impl AppConfig {
    /// Config with every optional setting at its default.
    #[must_use]
    pub fn new(telegram_bot_token: &str, default_chat_id: &str) -> Self {
        Self {
            telegram_bot_token: telegram_bot_token.to_string(),
            default_chat_id: default_chat_id.to_string(),
            clickup_api_token: None,
            clickup_webhook_secret: None,
            telegram_webhook_secret: None,
            classification_field: DEFAULT_CLASSIFICATION_FIELD.to_string(),
            require_approval: true,
            also_notify_default: true,
            show_task_link: true,
            task_link_base: DEFAULT_TASK_LINK_BASE.to_string(),
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            clickup_api_base: DEFAULT_CLICKUP_API_BASE.to_string(),
            destinations: DestinationRegistry::default(),
        }
    }

    #[must_use]
    pub fn with_destinations(mut self, destinations: Vec<Destination>) -> Self {
        self.destinations = DestinationRegistry::new(destinations);
        self
    }

    /// # Errors
    ///
    /// Returns `RelayError::ConfigError` when a required variable is missing
    /// or `RELAY_DESTINATIONS` is not valid JSON.
    pub fn from_env() -> Result<Self, RelayError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| RelayError::ConfigError(format!("{name} is not set")))
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new(
            &required("TELEGRAM_BOT_TOKEN")?,
            &required("TELEGRAM_CHAT_ID")?,
        );

        config.clickup_api_token = optional("CLICKUP_API_TOKEN");
        config.clickup_webhook_secret = optional("CLICKUP_WEBHOOK_SECRET");
        config.telegram_webhook_secret = optional("TELEGRAM_WEBHOOK_SECRET");

        if let Some(field) = optional("CLASSIFICATION_FIELD") {
            config.classification_field = field;
        }
        if let Some(flag) = optional("REQUIRE_APPROVAL") {
            config.require_approval = parse_flag("REQUIRE_APPROVAL", &flag)?;
        }
        if let Some(flag) = optional("ALSO_NOTIFY_DEFAULT") {
            config.also_notify_default = parse_flag("ALSO_NOTIFY_DEFAULT", &flag)?;
        }
        if let Some(flag) = optional("SHOW_TASK_LINK") {
            config.show_task_link = parse_flag("SHOW_TASK_LINK", &flag)?;
        }
        if let Some(base) = optional("TASK_LINK_BASE") {
            config.task_link_base = base;
        }
        if let Some(base) = optional("TELEGRAM_API_BASE") {
            config.telegram_api_base = base;
        }
        if let Some(base) = optional("CLICKUP_API_BASE") {
            config.clickup_api_base = base;
        }
        if let Some(raw) = optional("RELAY_DESTINATIONS") {
            let destinations = parse_destinations(&raw)
                .map_err(|e| RelayError::ConfigError(format!("{e:#}")))?;
            config.destinations = DestinationRegistry::new(destinations);
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool, RelayError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(RelayError::ConfigError(format!(
            "{name}: expected a boolean, got '{other}'"
        ))),
    }
}

fn parse_destinations(raw: &str) -> anyhow::Result<Vec<Destination>> {
    let destinations: Vec<Destination> =
        serde_json::from_str(raw).context("RELAY_DESTINATIONS is not a JSON array of destinations")?;
    for dest in &destinations {
        anyhow::ensure!(
            !dest.key.trim().is_empty(),
            "RELAY_DESTINATIONS contains an entry with an empty key"
        );
    }
    Ok(destinations)
}
