use reqwest::Client;
use std::sync::Arc;

use crate::clickup::{ClickUpClient, TaskApi};
use crate::core::config::AppConfig;
use crate::errors::RelayError;
use crate::telegram::{BotApi, Notifier, TelegramClient};

/// Everything an invocation needs: immutable config plus the two API seams.
///
/// Built once at start-up and shared across invocations behind an `Arc`.
pub struct Relay {
    config: AppConfig,
    bot: Arc<dyn BotApi>,
    tasks: Option<Arc<dyn TaskApi>>,
}

impl Relay {
    /// Wire real HTTP clients from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, RelayError> {
        let http = Client::builder()
            .build()
            .map_err(|e| RelayError::ConfigError(format!("HTTP client: {e}")))?;

        let bot = TelegramClient::new(
            http.clone(),
            config.telegram_bot_token.clone(),
            &config.telegram_api_base,
        );
        let tasks = ClickUpClient::from_config(http, &config)
            .map(|client| Arc::new(client) as Arc<dyn TaskApi>);

        Ok(Self {
            config,
            bot: Arc::new(bot),
            tasks,
        })
    }

    /// Assemble from explicit parts; `tasks = None` disables ClickUp fetches.
    #[must_use]
    pub fn with_apis(
        config: AppConfig,
        bot: Arc<dyn BotApi>,
        tasks: Option<Arc<dyn TaskApi>>,
    ) -> Self {
        Self { config, bot, tasks }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn notifier(&self) -> Notifier<'_> {
        Notifier::new(self.bot.as_ref(), &self.config)
    }

    #[must_use]
    pub fn tasks(&self) -> Option<&dyn TaskApi> {
        self.tasks.as_deref()
    }
}
