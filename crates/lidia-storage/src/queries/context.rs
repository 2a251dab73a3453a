// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge document (`contexto`) operations.

use lidia_core::{Document, LidiaError};
use rusqlite::params;

use crate::database::Database;

/// Replace the document wholesale: delete all rows, insert the new one.
///
/// Runs as a single transaction on the writer thread, so no reader can
/// observe zero rows and concurrent replaces serialize cleanly. Returns the
/// new row id.
pub async fn replace_document(db: &Database, documentacao: &str) -> Result<i64, LidiaError> {
    let documentacao = documentacao.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM contexto", [])?;
            tx.execute(
                "INSERT INTO contexto (documentacao) VALUES (?1)",
                params![documentacao],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The current document, or `None` when the table is empty.
pub async fn read_document(db: &Database) -> Result<Option<Document>, LidiaError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, documentacao FROM contexto ORDER BY id LIMIT 1")?;
            let result = stmt.query_row([], |row| {
                Ok(Document {
                    id: row.get(0)?,
                    documentacao: row.get(1)?,
                })
            });
            match result {
                Ok(doc) => Ok(Some(doc)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of document rows.
pub async fn document_count(db: &Database) -> Result<i64, LidiaError> {
    db.connection()
        .call(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM contexto", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
