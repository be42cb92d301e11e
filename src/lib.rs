/// clickup-relay - forwards ClickUp task activity to Telegram.
///
/// A single Lambda receives two kinds of webhooks:
/// 1. ClickUp task events, which are enriched with the task and its latest
///    comment, classified to a team destination, and posted to the operator chat
/// 2. Telegram updates from the operator, which approve, edit, and forward
///    those posts to the team chats
///
/// # Architecture
///
/// - `api` routes API Gateway events and holds the two flows
/// - `clickup` reads tasks/comments and classifies them
/// - `telegram` formats and sends messages through the Bot API
/// - `core` holds configuration and the destination table
///
/// Nothing is persisted between invocations; the only state that outlives a
/// request is the destination marker embedded in edit prompts.
///
/// # Example
///
/// ```no_run
/// use clickup_relay::core::config::AppConfig;
/// use clickup_relay::relay::Relay;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     clickup_relay::setup_logging();
///
///     let config = AppConfig::new("123456:bot-token", "918656204");
///     let relay = Relay::new(config)?;
///
///     let event = serde_json::json!({
///         "requestContext": { "http": { "method": "GET" } },
///         "rawPath": "/health"
///     });
///     let response = clickup_relay::api::handle_request(&relay, &event).await;
///     println!("{response}");
///     Ok(())
/// }
/// ```
// Module declarations
pub mod api;
pub mod clickup;
pub mod core;
pub mod errors;
pub mod relay;
pub mod telegram;
pub mod utils;

pub use errors::{DeliveryError, RelayError};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Output goes to `CloudWatch` Logs. Built with the `debug-logs` feature the
/// level is DEBUG, otherwise INFO. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// clickup_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let level = if cfg!(feature = "debug-logs") {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_filter(level);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
