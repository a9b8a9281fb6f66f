//! Payment REST API server
//!
//! Configuration comes from the YAML file named by `PAYMENTS_CONFIG` (if
//! set), with `PAYMENTS_PORT` overriding the port. `RUST_LOG` takes
//! precedence over the configured `log_level`.

use payments::config::PaymentsConfig;
use payments::server::ServerBuilder;
use payments::storage::InMemoryPaymentStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PaymentsConfig::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("{},tower_http=debug", config.log_level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        address = %config.server.address(),
        events = config.events.capacity,
        "Starting payment service"
    );

    ServerBuilder::new()
        .with_store(InMemoryPaymentStore::new())
        .with_config(config)
        .serve()
        .await
}
