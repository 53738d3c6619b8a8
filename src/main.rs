//! Parachute - Main Entry Point
//!
//! Starts the HTTP server exposing the liveness and storage-metadata routes.

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parachute::api::{configure_routes, ApiState};
use parachute::config::Settings;
use parachute::metrics::{init_metrics, metrics_endpoint};
use parachute::services::StorageMetadataService;
use parachute::storage::default_collector;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging with RUST_LOG environment variable support
    // Default: info level for parachute, warn for everything else
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,parachute=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true))
        .init();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}, using defaults", e);
        Settings::default()
    });

    info!("Starting Parachute v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}", settings.server.bind_address());
    info!(
        "Timeouts: read {}s, write {}s, idle {}s",
        settings.server.read_timeout_sec,
        settings.server.write_timeout_sec,
        settings.server.idle_timeout_sec
    );

    if settings.metrics.enabled {
        init_metrics();
        info!("Metrics exposed at {}", settings.metrics.path);
    }

    let collector = default_collector(&settings.storage);
    let platform = collector.platform();
    let metadata_service =
        StorageMetadataService::new(collector).with_root(settings.storage.root_path.clone());
    info!(
        "Reporting usage for {} ({})",
        metadata_service.root().display(),
        platform
    );

    let api_state = ApiState::new(metadata_service);
    let metrics_enabled = settings.metrics.enabled;
    let metrics_path = settings.metrics.path.clone();

    HttpServer::new(move || {
        let metrics_path = metrics_path.clone();

        App::new()
            // Add shared state
            .app_data(web::Data::new(api_state.clone()))
            // Add middleware
            .wrap(TracingLogger::default())
            // Add routes
            .configure(configure_routes)
            .configure(move |cfg| {
                if metrics_enabled {
                    cfg.route(&metrics_path, web::get().to(metrics_endpoint));
                }
            })
    })
    .workers(settings.server.workers)
    .client_request_timeout(settings.server.read_timeout())
    // No per-response write deadline exists here; this only bounds the
    // shutdown of a connection that is already closing.
    .client_disconnect_timeout(settings.server.write_timeout())
    .keep_alive(settings.server.idle_timeout())
    .bind(settings.server.bind_address())?
    .run()
    .await
}
