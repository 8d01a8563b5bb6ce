use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod event_sourcing;
mod http;
mod metrics;
mod utils;

use config::{AppConfig, CliArgs};
use domain::theme::{ThemeEvent, ThemeService};
use event_sourcing::InMemoryEventLog;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Example: RUST_LOG=debug theme_designer
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()))
        )
        .init();

    let config = AppConfig::from_args(CliArgs::parse())?;
    tracing::info!(?config, "Starting theme designer");

    // === 1. Event log (in-memory reference implementation) ===
    let log = Arc::new(InMemoryEventLog::<ThemeEvent>::new());

    // === 2. Metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);

    // === 3. Application service ===
    let service = Arc::new(ThemeService::new(log, metrics.clone(), config.retry.clone()));

    // === 4. HTTP surface ===
    http::start_server(config.http_bind, service, metrics).await?;

    tracing::info!("Theme designer stopped");
    Ok(())
}
