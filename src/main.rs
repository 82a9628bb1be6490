//! songbook - song record management service
//!
//! Exposes create, read, update, delete, and like/dislike operations over a
//! single `songs` table as a JSON REST API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;

use songbook::{build_router, db, AppState};

/// Command-line arguments for songbook
#[derive(Parser, Debug)]
#[command(name = "songbook")]
#[command(about = "Song record management service")]
#[command(version)]
struct Args {
    /// Database connection string
    #[arg(
        long,
        default_value = "sqlite://songbook.db?mode=rwc",
        env = "DATABASE_URL"
    )]
    database_url: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "SONGBOOK_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting songbook v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Connection string is read once at startup; schema creation is
    // idempotent and runs before the listener is bound
    let pool = db::init_database(&args.database_url)
        .await
        .context("Failed to initialize database")?;
    info!("Connected to database: {}", args.database_url);

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("songbook listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
