// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for LLM chat-completion backends.

use async_trait::async_trait;

use crate::error::LidiaError;
use crate::types::Turn;

/// A chat-completion backend.
///
/// Implementations receive the structured conversation history, the current
/// knowledge document, and the message being answered, and return the
/// completion text. Failures are reported through the error channel — never
/// encoded as reserved substrings of the success value.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Request a completion for `current_message` given the conversation so far.
    ///
    /// `turns` is newest-first, as returned by [`HistoryStore`]; the
    /// implementation owns any reordering its wire format needs.
    ///
    /// [`HistoryStore`]: crate::traits::HistoryStore
    async fn complete(
        &self,
        turns: &[Turn],
        document: &str,
        current_message: &str,
    ) -> Result<String, LidiaError>;
}
