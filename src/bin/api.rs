use std::sync::Arc;

use clickup_relay::api::function_handler;
use clickup_relay::core::config::AppConfig;
use clickup_relay::relay::Relay;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    clickup_relay::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e.to_string())
    })?;
    info!(
        destinations = config.destinations.len(),
        clickup_enabled = config.clickup_api_token.is_some(),
        signing = config.clickup_webhook_secret.is_some(),
        "Configuration loaded"
    );

    let relay = Arc::new(Relay::new(config).map_err(|e| Error::from(e.to_string()))?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let relay = Arc::clone(&relay);
        async move { function_handler(&relay, event).await }
    }))
    .await
}
