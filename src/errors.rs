use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to parse inbound event: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to access Telegram API: {0}")]
    TelegramError(String),

    #[error("Failed to access ClickUp API: {0}")]
    ClickUpError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Request signature rejected: {0}")]
    SignatureError(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::ParseError(error.to_string())
    }
}

/// Why a single outbound notification did not go out.
///
/// Returned by every notifier send so that callers decide what a failure
/// means for them (ack text, keeping buttons, confirmation line).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("destination '{0}' is disabled or has no chat id")]
    DestinationUnavailable(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("rejected by Telegram: {0}")]
    Rejected(String),
}

impl From<RelayError> for DeliveryError {
    fn from(error: RelayError) -> Self {
        match error {
            RelayError::TelegramError(msg) => DeliveryError::Rejected(msg),
            other => DeliveryError::Transport(other.to_string()),
        }
    }
}
