// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Lidia chatbot.
//!
//! Exposes the webhook ingress, the history read endpoints, and the context
//! admin endpoints on an axum server. All collaborators (store, completion
//! provider, outbound sender) are injected as trait-object handles through
//! [`server::GatewayState`]; the gateway owns orchestration, not policy.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};
