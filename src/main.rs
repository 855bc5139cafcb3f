// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result
    )
)]

use std::path::PathBuf;
use std::sync::Arc;

use catalog_daemon::app::{report_server_error, Args};
use catalog_daemon::batch::BatchScheduler;
use catalog_daemon::cors::build_cors_layer;
use catalog_daemon::daemon_config::load_config;
use catalog_daemon::grpc_logging::RpcLoggingLayer;
use catalog_daemon::logging::{
    self, default_log_dir, init_logging, parse_rotation, LogConfig, LOG_FILENAME,
};
use catalog_daemon::server::proto::catalog_daemon_server::CatalogDaemonServer;
use catalog_daemon::server::{CatalogDaemonService, FILE_DESCRIPTOR_SET};
use catalog_daemon::store::ItemStore;
use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::watch;
use tonic::transport::Server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_dir = args
        .log_dir
        .as_deref()
        .map_or_else(default_log_dir, PathBuf::from);
    let log_file = log_dir.join(LOG_FILENAME);
    logging::set_log_file_path(log_file.to_string_lossy().to_string());

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    let file_config = load_config(args.config.as_deref().map(std::path::Path::new))?;
    let settings = file_config.resolve(&args.overrides())?;

    let addr: std::net::SocketAddr = args.addr.parse()?;

    let cors_origins: Vec<String> = args
        .cors_origins
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    info!("CORS origins: {}", cors_origins.join(", "));
    let cors = build_cors_layer(cors_origins);

    let store = ItemStore::seeded(settings.seed_size);
    let scheduler = Arc::new(BatchScheduler::new(store, settings.batch));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let timers = scheduler.spawn_timers(&shutdown_rx);

    let service = CatalogDaemonService::new(Arc::clone(&scheduler));

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    info!("Starting catalog daemon on {} (gRPC + gRPC-Web)", addr);

    let signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {e}");
        }
        info!("Received shutdown signal, stopping server...");
    };

    let server_result = Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(RpcLoggingLayer)
        .layer(tonic_web::GrpcWebLayer::new())
        .add_service(reflection_service)
        .add_service(CatalogDaemonServer::new(service))
        .serve_with_shutdown(addr, signal)
        .await;

    // Stop the flush timers; each drains its queue once more on the way out.
    if shutdown_tx.send(true).is_err() {
        warn!("Flush timers already stopped");
    }
    for timer in timers {
        if let Err(e) = timer.await {
            warn!("Flush timer ended abnormally: {e}");
        }
    }

    if let Err(e) = server_result {
        report_server_error(addr, &log_file, &e);
        return Err(e.into());
    }

    info!("Catalog daemon stopped");
    Ok(())
}
