// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for the conversation history and knowledge document.

use async_trait::async_trait;

use crate::error::LidiaError;
use crate::types::{Document, Speaker, Turn};

/// Persistence backend for conversation turns and the knowledge document.
///
/// Turns are append-only; the document is replaced wholesale. Implementations
/// must guarantee that [`replace_document`](HistoryStore::replace_document)
/// is atomic: a reader never observes zero document rows mid-replace, and
/// concurrent replaces leave exactly one row.
#[async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Append one turn, stamping it with the current time.
    ///
    /// `numero` and `mensagem` must be non-empty. Returns the new row id.
    async fn append_turn(
        &self,
        numero: &str,
        mensagem: &str,
        speaker: Speaker,
    ) -> Result<i64, LidiaError>;

    /// All turns for one number, newest first.
    async fn turns_for_numero(&self, numero: &str) -> Result<Vec<Turn>, LidiaError>;

    /// All turns across every number, newest first.
    async fn all_turns(&self) -> Result<Vec<Turn>, LidiaError>;

    /// Replace the knowledge document wholesale. Returns the new row id.
    async fn replace_document(&self, documentacao: &str) -> Result<i64, LidiaError>;

    /// The current knowledge document, if any.
    async fn read_document(&self) -> Result<Option<Document>, LidiaError>;

    /// Number of document rows (at most one under normal operation).
    async fn document_count(&self) -> Result<i64, LidiaError>;

    /// Delete every turn with `horario_data` strictly older than `cutoff`
    /// (a `"%Y-%m-%d %H:%M:%S"` timestamp string). Returns the removed count.
    async fn prune_older_than(&self, cutoff: &str) -> Result<u64, LidiaError>;
}
