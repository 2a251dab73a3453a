// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use lidia_core::{CompletionProvider, HistoryStore, LidiaError, OutboundSender};

use crate::handlers;

/// Shared state for axum request handlers.
///
/// Every collaborator is an injected trait-object handle; the gateway never
/// reaches for a process-wide singleton.
#[derive(Clone)]
pub struct GatewayState {
    /// Conversation history and knowledge document store.
    pub store: Arc<dyn HistoryStore>,
    /// Chat-completion backend.
    pub completion: Arc<dyn CompletionProvider>,
    /// Outbound WhatsApp delivery (stubbed in-tree).
    pub outbound: Arc<dyn OutboundSender>,
    /// Administrative number for in-band commands and outage alerts.
    pub admin_numero: Option<String>,
}

/// Gateway server configuration (mirrors `ServerConfig` from lidia-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router over the given state.
///
/// Exposed separately from [`start_server`] so tests can drive the router
/// without binding a socket.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/webhook", post(handlers::post_webhook))
        .route("/historico", get(handlers::get_historico))
        .route("/historico/{numero}", get(handlers::get_historico_por_numero))
        .route("/atualizar-contexto", post(handlers::post_atualizar_contexto))
        .route("/contexto", get(handlers::get_contexto))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves:
/// - `POST /webhook`
/// - `GET /historico`, `GET /historico/{numero}`
/// - `POST /atualizar-contexto`, `GET /contexto`
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), LidiaError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LidiaError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| LidiaError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
