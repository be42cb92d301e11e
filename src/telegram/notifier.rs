//! Outbound notifications.
//!
//! Sends return a [`DeliveryError`] reason on failure and never propagate
//! further; acknowledgements and markup edits are best-effort and only log.

use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use super::client::{BotApi, CONTROL_TIMEOUT, SEND_TIMEOUT};
use crate::core::config::AppConfig;
use crate::core::registry::Destination;
use crate::errors::DeliveryError;

const PARSE_MODE: &str = "Markdown";

/// Where a message goes.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// The configured operator chat.
    Default,
    /// A team destination; refused unless enabled with a chat id.
    Destination(&'a Destination),
    /// A chat taken from an inbound update (the operator's own chat).
    Chat(i64),
}

impl Target<'_> {
    fn label(&self) -> String {
        match self {
            Target::Default => "default".to_string(),
            Target::Destination(dest) => dest.key.clone(),
            Target::Chat(id) => id.to_string(),
        }
    }
}

pub struct Notifier<'a> {
    api: &'a dyn BotApi,
    config: &'a AppConfig,
}

impl<'a> Notifier<'a> {
    #[must_use]
    pub fn new(api: &'a dyn BotApi, config: &'a AppConfig) -> Self {
        Self { api, config }
    }

    fn chat_id(&self, target: Target<'_>) -> Result<Value, DeliveryError> {
        match target {
            Target::Default => {
                let id = self.config.default_chat_id.trim();
                if id.is_empty() {
                    Err(DeliveryError::DestinationUnavailable("default".to_string()))
                } else {
                    Ok(Value::String(id.to_string()))
                }
            }
            Target::Destination(dest) if dest.is_sendable() => {
                Ok(Value::String(dest.chat_id.trim().to_string()))
            }
            Target::Destination(dest) => {
                Err(DeliveryError::DestinationUnavailable(dest.key.clone()))
            }
            Target::Chat(id) => Ok(json!(id)),
        }
    }

    async fn deliver(
        &self,
        method: &str,
        target: Target<'_>,
        mut params: Value,
        actions: Option<Value>,
    ) -> Result<(), DeliveryError> {
        let chat_id = self.chat_id(target).inspect_err(|e| {
            warn!(target = %target.label(), method = %method, "Send refused: {}", e);
        })?;

        params["chat_id"] = chat_id;
        params["parse_mode"] = Value::String(PARSE_MODE.to_string());
        if let Some(markup) = actions {
            params["reply_markup"] = markup;
        }

        match self.api.call(method, params, SEND_TIMEOUT).await {
            Ok(_) => {
                info!(target = %target.label(), method = %method, "Message sent to Telegram");
                Ok(())
            }
            Err(e) => {
                error!(target = %target.label(), method = %method, "Telegram send failed: {}", e);
                Err(DeliveryError::from(e))
            }
        }
    }

    /// # Errors
    ///
    /// Returns the reason the message was not delivered.
    pub async fn send_text(
        &self,
        target: Target<'_>,
        text: &str,
        actions: Option<Value>,
    ) -> Result<(), DeliveryError> {
        self.deliver("sendMessage", target, json!({ "text": text }), actions)
            .await
    }

    /// `image_ref` is a URL or a Telegram `file_id`.
    ///
    /// # Errors
    ///
    /// Returns the reason the photo was not delivered.
    pub async fn send_photo(
        &self,
        target: Target<'_>,
        image_ref: &str,
        caption: &str,
        actions: Option<Value>,
    ) -> Result<(), DeliveryError> {
        self.deliver(
            "sendPhoto",
            target,
            json!({ "photo": image_ref, "caption": caption }),
            actions,
        )
        .await
    }

    /// Remove the inline buttons from a sent message. Safe to repeat.
    pub async fn clear_actions(&self, chat_id: i64, message_id: i64) {
        let params = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "reply_markup": { "inline_keyboard": [] },
        });
        if let Err(e) = self
            .api
            .call("editMessageReplyMarkup", params, CONTROL_TIMEOUT)
            .await
        {
            // "message is not modified" lands here when the buttons are already gone.
            debug!(chat_id, message_id, "Clearing buttons failed: {}", e);
        }
    }

    /// Stop the client's spinner on a pressed button, optionally with a toast.
    pub async fn answer_interaction(&self, interaction_id: &str, feedback: Option<&str>) {
        let mut params = json!({ "callback_query_id": interaction_id });
        if let Some(text) = feedback {
            params["text"] = Value::String(text.to_string());
        }
        if let Err(e) = self
            .api
            .call("answerCallbackQuery", params, CONTROL_TIMEOUT)
            .await
        {
            warn!(interaction_id = %interaction_id, "answerCallbackQuery failed: {}", e);
        }
    }
}
