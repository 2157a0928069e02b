//! physiqued - physique Server Daemon
//!
//! Serves `POST /analyze`: accepts an image upload, stages it in the scratch
//! directory and answers with the analysis record.
//!
//! Usage:
//!   physiqued [OPTIONS] [config.toml]
//!
//! Without a config file the daemon listens on 0.0.0.0:8000 and stages
//! uploads under `./uploads`.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use physique_api::{create_router, AppState};
use physique_core::ScratchDir;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{DaemonConfig, Overrides};

/// Default log filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str =
    "physiqued=info,physique_api=info,physique_core=info,tower_http=info";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "physiqued")]
#[command(version, about = "physique server daemon - image analysis upload endpoint")]
struct Args {
    /// Server config file (TOML)
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "PHYSIQUE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PHYSIQUE_PORT")]
    port: Option<u16>,

    /// Scratch directory for in-flight uploads
    #[arg(long, env = "PHYSIQUE_UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,

    /// Reject request bodies larger than this many bytes
    #[arg(long, env = "PHYSIQUE_MAX_UPLOAD_BYTES")]
    max_upload_bytes: Option<usize>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(fmt::layer()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_format);

    tracing::info!("Starting physiqued");

    let mut config = match args.config {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            DaemonConfig::load(path)?
        }
        None => DaemonConfig::default(),
    };
    config.apply(Overrides {
        host: args.host,
        port: args.port,
        upload_dir: args.upload_dir,
        max_upload_bytes: args.max_upload_bytes,
    });

    let scratch = ScratchDir::open(&config.uploads.dir).with_context(|| {
        format!(
            "Failed to open upload directory: {}",
            config.uploads.dir.display()
        )
    })?;
    tracing::info!(dir = %scratch.path().display(), "Scratch directory ready");

    if config.uploads.purge_on_start {
        let purged = scratch.purge_stale().await?;
        if purged > 0 {
            tracing::info!(purged, "Purged stale staged files");
        }
    }

    let limits = config.limits();
    tracing::info!(
        max_upload_bytes = ?limits.max_bytes,
        request_timeout = ?limits.request_timeout,
        "Upload limits"
    );

    let state = AppState::new(scratch).with_limits(limits);
    let app = create_router(state);

    let (host, port) = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("physiqued stopped");
    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
