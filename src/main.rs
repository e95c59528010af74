// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{debug, info};
use zonesync::{
    config::{Cli, Settings},
    constants::TOKIO_WORKER_THREADS,
    inventory::InventoryClient,
    server::{router, AppState},
    sync::ZoneSync,
    zone::ZoneWriter,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("zonesync")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    init_logging();

    let settings = Settings::try_from(cli).context("Invalid configuration")?;
    info!(
        netbox_url = %settings.netbox_url,
        zones = ?settings.zones,
        zone_dir = %settings.zone_dir.display(),
        "Starting zonesync"
    );

    debug!("Creating inventory client");
    let client = InventoryClient::new(
        settings.netbox_url.clone(),
        settings.netbox_token.clone(),
        settings.inventory_timeout,
    )
    .context("Failed to build inventory HTTP client")?;

    let sync = ZoneSync::new(
        client,
        settings.zones.clone(),
        ZoneWriter::new(&settings.zone_dir),
    );

    if settings.once {
        let report = sync.run().await?;
        for zone in &report.zones {
            println!("{}\t{}\t{}", zone.zone, zone.records, zone.path.display());
        }
        return Ok(());
    }

    let app = router(Arc::new(AppState::new(sync)));
    let listener = tokio::net::TcpListener::bind(settings.listen)
        .await
        .with_context(|| format!("Failed to bind trigger endpoint on {}", settings.listen))?;

    info!(listen = %settings.listen, "Trigger endpoint listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Trigger server failed")?;

    info!("Shutdown complete");
    Ok(())
}

/// Initialize logging.
///
/// Format: timestamp file:line LEVEL message
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`json` or `text`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
