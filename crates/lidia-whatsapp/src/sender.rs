// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound send stub.
//!
//! Real delivery belongs to an external messaging collaborator; until that
//! integration exists, sends are logged and reported as successful so the
//! rest of the pipeline (persistence, envelopes, admin alerts) is exercised
//! end to end.

use async_trait::async_trait;
use tracing::info;

use lidia_core::{LidiaError, OutboundSender};

/// Log-only implementation of [`OutboundSender`].
#[derive(Debug, Clone, Default)]
pub struct LogSender;

impl LogSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutboundSender for LogSender {
    async fn send(&self, numero: &str, mensagem: &str) -> Result<(), LidiaError> {
        info!(numero = %numero, mensagem = %mensagem, "outbound WhatsApp send (stub, log only)");
        Ok(())
    }
}
