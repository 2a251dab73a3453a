// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message delivery trait.

use async_trait::async_trait;

use crate::error::LidiaError;

/// Delivers a reply back to a WhatsApp number.
///
/// The production implementation is supplied by an external messaging
/// collaborator; the in-tree `LogSender` only logs the send.
#[async_trait]
pub trait OutboundSender: Send + Sync + 'static {
    /// Send `mensagem` to `numero`.
    async fn send(&self, numero: &str, mensagem: &str) -> Result<(), LidiaError>;
}
