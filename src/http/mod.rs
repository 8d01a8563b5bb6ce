// ============================================================================
// HTTP Surface
// ============================================================================
//
// Thin transport over ThemeService: maps requests to events/commands and
// projections back to JSON, CSS or plain text. No business rules live here.
//
// ============================================================================

mod css;
mod handlers;

use actix_web::{web, App, HttpServer};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::theme::ThemeService;
use crate::metrics::Metrics;

pub use handlers::configure;

/// Start the HTTP server and run until shutdown
pub async fn start_server(
    bind: SocketAddr,
    service: Arc<ThemeService>,
    metrics: Arc<Metrics>,
) -> std::io::Result<()> {
    tracing::info!("Starting theme designer on http://{}", bind);

    let service = web::Data::from(service);
    let metrics = web::Data::from(metrics);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .app_data(metrics.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
