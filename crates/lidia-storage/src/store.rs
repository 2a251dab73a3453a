// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the HistoryStore trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use lidia_config::model::StorageConfig;
use lidia_core::{Document, HistoryStore, LidiaError, Speaker, Turn};

use crate::database::Database;
use crate::queries;

/// Timestamp layout used for `horario_data`. Lexicographic order equals
/// chronological order, which the view's sort and the prune query rely on.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a UTC instant in the `horario_data` layout.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// SQLite-backed store for conversation turns and the knowledge document.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open the database at the configured path, running migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, LidiaError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite store initialized");
        Ok(Self { db })
    }

    /// Checkpoint the WAL.
    pub async fn close(&self) -> Result<(), LidiaError> {
        self.db.close().await
    }
}

#[async_trait]
impl HistoryStore for SqliteStore {
    async fn append_turn(
        &self,
        numero: &str,
        mensagem: &str,
        speaker: Speaker,
    ) -> Result<i64, LidiaError> {
        if numero.is_empty() || mensagem.is_empty() {
            return Err(LidiaError::Storage {
                source: "turn requires a non-empty numero and mensagem".into(),
            });
        }
        let horario_data = format_timestamp(Utc::now());
        queries::history::insert_turn(&self.db, numero, mensagem, speaker, &horario_data).await
    }

    async fn turns_for_numero(&self, numero: &str) -> Result<Vec<Turn>, LidiaError> {
        queries::history::turns_for_numero(&self.db, numero).await
    }

    async fn all_turns(&self) -> Result<Vec<Turn>, LidiaError> {
        queries::history::all_turns(&self.db).await
    }

    async fn replace_document(&self, documentacao: &str) -> Result<i64, LidiaError> {
        queries::context::replace_document(&self.db, documentacao).await
    }

    async fn read_document(&self) -> Result<Option<Document>, LidiaError> {
        queries::context::read_document(&self.db).await
    }

    async fn document_count(&self) -> Result<i64, LidiaError> {
        queries::context::document_count(&self.db).await
    }

    async fn prune_older_than(&self, cutoff: &str) -> Result<u64, LidiaError> {
        queries::history::prune_older_than(&self.db, cutoff).await
    }
}
