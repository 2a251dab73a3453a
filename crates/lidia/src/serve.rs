// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lidia serve` command implementation.
//!
//! Wires SQLite storage, the Groq completion client, the outbound send stub,
//! and the cleanup timer into the gateway server, then runs until a shutdown
//! signal arrives.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use lidia_config::model::LidiaConfig;
use lidia_core::error::LidiaError;
use lidia_gateway::{GatewayState, ServerConfig};
use lidia_groq::GroqClient;
use lidia_storage::SqliteStore;
use lidia_whatsapp::LogSender;

use crate::cleanup::CleanupRunner;

/// Runs the `lidia serve` command.
pub async fn run_serve(config: LidiaConfig) -> Result<(), LidiaError> {
    init_tracing(&config.agent.log_level);

    info!(agent = %config.agent.name, "starting lidia serve");

    // Initialize storage.
    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    info!(path = %config.storage.database_path, "storage initialized");

    // Initialize the completion client.
    let completion = Arc::new(GroqClient::new(&config.groq).map_err(|e| {
        error!(error = %e, "failed to initialize Groq client");
        eprintln!(
            "error: Groq API key required. Set groq.api_key in lidia.toml or the LIDIA_GROQ_API_KEY environment variable."
        );
        e
    })?);
    info!(model = %completion.model(), "completion client initialized");

    // Outbound delivery is a stub until a messaging collaborator is wired in.
    let outbound = Arc::new(LogSender::new());

    let state = GatewayState {
        store: store.clone(),
        completion,
        outbound,
        admin_numero: config.whatsapp.admin_numero.clone(),
    };
    match &config.whatsapp.admin_numero {
        Some(numero) => info!(numero = %numero, "admin command channel enabled"),
        None => debug!("admin command channel disabled (no admin_numero configured)"),
    }

    // Install signal handler.
    let cancel = install_signal_handler();

    // Spawn the cleanup timer if enabled.
    if config.cleanup.enabled {
        let runner = CleanupRunner::new(store.clone(), config.cleanup.max_age_hours);
        let interval = Duration::from_secs(config.cleanup.interval_hours * 3600);
        let cleanup_cancel = cancel.clone();
        tokio::spawn(async move {
            runner.run(interval, cleanup_cancel).await;
        });
        info!(
            interval_hours = config.cleanup.interval_hours,
            max_age_hours = config.cleanup.max_age_hours,
            "cleanup timer started"
        );
    } else {
        info!("cleanup timer disabled by configuration");
    }

    // Serve until the signal handler fires.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    tokio::select! {
        result = lidia_gateway::start_server(&server_config, state) => result?,
        _ = cancel.cancelled() => {
            info!("shutdown signal received, stopping gateway");
        }
    }

    store.close().await?;
    info!("lidia serve shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber from the configured log level.
///
/// `RUST_LOG` takes precedence when set, so operators can raise verbosity
/// per-target without touching the config file.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Installs signal handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is
/// received. The signal handler task runs in the background until then.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

            tokio::select! {
                _ = ctrl_c => {
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
                _ = sigterm.recv() => {
                    info!("received SIGTERM, initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, initiating shutdown");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}
