//! Binary entrypoint for the Cost Katana webhook receiver.

use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use costkatana_webhooks::adapters::events::LogEventHandler;
use costkatana_webhooks::adapters::http::{app_router, WebhookAppState};
use costkatana_webhooks::application::EventDispatcher;
use costkatana_webhooks::config::AppConfig;
use costkatana_webhooks::domain::webhook::{KatanaEventType, WebhookVerifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.server.log_level)
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let verifier = Arc::new(WebhookVerifier::from_config(&config.webhook));

    // Default handlers log the known alert types; deployments swap these
    // for handlers that notify, throttle, or update dashboards.
    let mut dispatcher = EventDispatcher::new();
    for event_type in [
        KatanaEventType::CostAlert,
        KatanaEventType::BudgetExceeded,
        KatanaEventType::CostSpikeDetected,
        KatanaEventType::SecurityAlert,
    ] {
        dispatcher.register(event_type.as_str(), Arc::new(LogEventHandler));
    }

    let state = WebhookAppState {
        verifier,
        dispatcher: Arc::new(dispatcher),
    };

    let app = app_router(state).layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "webhook receiver listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
