pub(crate) mod cli;
pub(crate) mod error;
pub(crate) mod layers;

use crate::error::{self as daemon_error, DaemonResult};
use api_ui::config::WebConfig;
use api_ui::router::make_app;
use api_ui::state::AppState;
use clap::Parser;
use core_explorer::ConnectionProvider;
use core_registry::ExplorerConfig;
use dotenv::dotenv;
use snafu::ResultExt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const TARGETS: [&str; 5] = [
    "explorerd",
    "api_ui",
    "core_explorer",
    "core_registry",
    "tower_http",
];

// Outer request timeout, on top of the per-connection query deadline.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

#[snafu::report]
#[tokio::main]
async fn main() -> DaemonResult<()> {
    dotenv().ok();

    let opts = cli::CliOpts::parse();

    setup_tracing(&opts);

    let config = ExplorerConfig::from_file(&opts.config).context(daemon_error::LoadConfigSnafu {
        path: opts.config.clone(),
    })?;
    let base_dir = opts.base_dir();
    let registry = config
        .registry(&base_dir)
        .context(daemon_error::LoadConfigSnafu {
            path: opts.config.clone(),
        })?;
    for entry in registry.list_all() {
        if entry.exists {
            tracing::info!(db = %entry.name, path = %entry.path.display(), "database configured");
        } else {
            tracing::warn!(db = %entry.name, path = %entry.path.display(), "database file not found");
        }
    }
    if registry.is_empty() {
        tracing::warn!("No databases configured in {}", opts.config.display());
    }

    let query_timeout = opts.query_timeout();
    let provider = ConnectionProvider::new(Arc::new(registry), query_timeout);
    let web_config = WebConfig {
        host: opts.host.clone(),
        port: opts.port(&config),
        allow_origin: Some(opts.cors_allow_origin.clone()),
        static_dir: Some(opts.static_dir()),
        pagination: config.pagination,
    };
    let state = AppState::new(Arc::new(provider), Arc::new(web_config.clone()));

    let router = make_app(state).context(daemon_error::RouterSnafu)?;
    let router = layers::with_service_layers(router, query_timeout + REQUEST_TIMEOUT_SLACK)
        .into_make_service_with_connect_info::<SocketAddr>();

    let host = web_config.host.clone();
    let port = web_config.port;
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .context(daemon_error::BindSnafu {
            host: host.clone(),
            port,
        })?;
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(daemon_error::ServeSnafu)
}

fn setup_tracing(opts: &cli::CliOpts) {
    let targets_with_level = |level: LevelFilter| -> Vec<(&str, LevelFilter)> {
        TARGETS.iter().map(|t| ((*t), level)).collect()
    };
    let level: LevelFilter = opts.tracing_level.clone().into();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(match std::env::var("RUST_LOG") {
                    Ok(val) => match val.parse::<Targets>() {
                        Ok(log_targets_from_env) => log_targets_from_env,
                        Err(err) => {
                            eprintln!("Failed to parse RUST_LOG: {err:?}");
                            Targets::default()
                                .with_targets(targets_with_level(level))
                                .with_default(LevelFilter::WARN)
                        }
                    },
                    // No var set: per-crate targets at the requested level
                    _ => Targets::default()
                        .with_targets(targets_with_level(level))
                        .with_default(LevelFilter::WARN),
                }),
        )
        .init();
}

/// Waits for Ctrl+C or SIGTERM.
///
/// A handler that cannot be installed never fires; the other one still does.
#[allow(clippy::redundant_pub_crate, clippy::cognitive_complexity)]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::warn!("Ctrl+C received, starting graceful shutdown");
        },
        () = terminate => {
            tracing::warn!("SIGTERM received, starting graceful shutdown");
        },
    }
}
