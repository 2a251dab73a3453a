// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History (`historico`) operations. Reads go through the
//! `mensagens_por_numero` view.

use std::str::FromStr;

use lidia_core::{LidiaError, Speaker, Turn};
use rusqlite::params;

use crate::database::Database;

/// Insert one turn. Returns the new row id.
pub async fn insert_turn(
    db: &Database,
    numero: &str,
    mensagem: &str,
    speaker: Speaker,
    horario_data: &str,
) -> Result<i64, LidiaError> {
    let numero = numero.to_string();
    let mensagem = mensagem.to_string();
    let user = speaker.to_string();
    let horario_data = horario_data.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO historico (numero, mensagem, user, horario_data)
                 VALUES (?1, ?2, ?3, ?4)",
                params![numero, mensagem, user, horario_data],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All turns for one number, newest first.
pub async fn turns_for_numero(db: &Database, numero: &str) -> Result<Vec<Turn>, LidiaError> {
    let numero = numero.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT numero, mensagem, user, horario_data
                 FROM mensagens_por_numero
                 WHERE numero = ?1
                 ORDER BY horario_data DESC",
            )?;
            let rows = stmt.query_map(params![numero], map_turn_row)?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            Ok(turns)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All turns across every number, newest first.
pub async fn all_turns(db: &Database) -> Result<Vec<Turn>, LidiaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT numero, mensagem, user, horario_data
                 FROM mensagens_por_numero
                 ORDER BY horario_data DESC",
            )?;
            let rows = stmt.query_map([], map_turn_row)?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            Ok(turns)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete every turn strictly older than `cutoff`. Returns the removed count.
pub async fn prune_older_than(db: &Database, cutoff: &str) -> Result<u64, LidiaError> {
    let cutoff = cutoff.to_string();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM historico WHERE horario_data < ?1",
                params![cutoff],
            )?;
            Ok(removed as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

fn map_turn_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Turn> {
    let user: String = row.get(2)?;
    let speaker = Speaker::from_str(&user).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Turn {
        numero: row.get(0)?,
        mensagem: row.get(1)?,
        speaker,
        horario_data: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn insert_and_read_newest_first() {
        let (db, _dir) = setup_db().await;

        insert_turn(&db, "5562900000001", "Oi", Speaker::Aluno, "2024-01-01 10:00:00")
            .await
            .unwrap();
        insert_turn(
            &db,
            "5562900000001",
            "Olá! Como posso ajudar?",
            Speaker::Bot,
            "2024-01-01 10:00:05",
        )
        .await
        .unwrap();

        let turns = turns_for_numero(&db, "5562900000001").await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].mensagem, "Olá! Como posso ajudar?");
        assert_eq!(turns[0].speaker, Speaker::Bot);
        assert_eq!(turns[1].mensagem, "Oi");
        assert_eq!(turns[1].speaker, Speaker::Aluno);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn turns_are_scoped_by_numero() {
        let (db, _dir) = setup_db().await;

        insert_turn(&db, "5562900000001", "de um", Speaker::Aluno, "2024-01-01 10:00:00")
            .await
            .unwrap();
        insert_turn(&db, "5562900000002", "de outro", Speaker::Aluno, "2024-01-01 10:00:01")
            .await
            .unwrap();

        let turns = turns_for_numero(&db, "5562900000001").await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].mensagem, "de um");

        let all = all_turns(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].numero, "5562900000002");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_numero_reads_empty() {
        let (db, _dir) = setup_db().await;
        let turns = turns_for_numero(&db, "5599999999999").await.unwrap();
        assert!(turns.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_returns_increasing_row_ids() {
        let (db, _dir) = setup_db().await;
        let id1 = insert_turn(&db, "5562900000001", "a", Speaker::Aluno, "2024-01-01 10:00:00")
            .await
            .unwrap();
        let id2 = insert_turn(&db, "5562900000001", "b", Speaker::Aluno, "2024-01-01 10:00:01")
            .await
            .unwrap();
        assert!(id2 > id1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn prune_removes_only_rows_older_than_cutoff() {
        let (db, _dir) = setup_db().await;

        insert_turn(&db, "5562900000001", "velha", Speaker::Aluno, "2024-01-01 09:00:00")
            .await
            .unwrap();
        insert_turn(&db, "5562900000002", "velha também", Speaker::Bot, "2024-01-01 09:30:00")
            .await
            .unwrap();
        insert_turn(&db, "5562900000001", "nova", Speaker::Aluno, "2024-01-02 11:00:00")
            .await
            .unwrap();

        let removed = prune_older_than(&db, "2024-01-02 00:00:00").await.unwrap();
        assert_eq!(removed, 2);

        let all = all_turns(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].mensagem, "nova");

        // Nothing left to remove on a second pass.
        let removed = prune_older_than(&db, "2024-01-02 00:00:00").await.unwrap();
        assert_eq!(removed, 0);

        db.close().await.unwrap();
    }
}
