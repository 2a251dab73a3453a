// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes: the single writer
//! is what makes the transactional document replace atomic for every reader.

use lidia_core::LidiaError;
use tracing::debug;

/// Handle to the SQLite database behind a single background connection.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, LidiaError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| LidiaError::Storage { source: Box::new(e) })?;
            }
        }

        let conn = tokio_rusqlite::Connection::open(path.to_owned())
            .await
            .map_err(|e| LidiaError::Storage { source: Box::new(e) })?;

        conn.call(move |conn| -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "busy_timeout", 5000)?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            crate::migrations::run_migrations(conn)?;
            Ok(())
        })
        .await
        .map_err(|e| LidiaError::Storage {
            source: match e {
                tokio_rusqlite::Error::Error(source) => source,
                tokio_rusqlite::Error::Close((_, err)) => Box::new(err),
                other => Box::from(other.to_string()),
            },
        })?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection. Query modules call through
    /// `connection().call(...)`.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL so readers of the bare database file see all writes.
    pub async fn close(&self) -> Result<(), LidiaError> {
        self.conn
            .call(|conn| {
                conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the workspace error type.
pub(crate) fn map_tr_err(err: tokio_rusqlite::Error) -> LidiaError {
    LidiaError::Storage {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open_test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists(), "database file should be created");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dirs/lidia.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("schema.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        let tables: Vec<String> = db
            .connection()
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                let mut names = Vec::new();
                for row in rows {
                    names.push(row?);
                }
                Ok::<_, rusqlite::Error>(names)
            })
            .await
            .unwrap();

        assert!(tables.iter().any(|t| t == "historico"));
        assert!(tables.iter().any(|t| t == "contexto"));
        assert!(tables.iter().any(|t| t == "mensagens_por_numero"));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        {
            let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
            db.close().await.unwrap();
        }
        // Opening the same file again must not re-apply migrations.
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
    }
}
