// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Lidia workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who authored a conversation turn.
///
/// The string labels are part of the persisted schema and of the HTTP
/// surface: `historico.user` stores exactly `"aluno"` or `"Bot UNIALFA"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Speaker {
    /// The student writing in via WhatsApp.
    #[strum(serialize = "aluno")]
    #[serde(rename = "aluno")]
    Aluno,
    /// The bot's own replies.
    #[strum(serialize = "Bot UNIALFA")]
    #[serde(rename = "Bot UNIALFA")]
    Bot,
}

/// One persisted message (inbound or outbound) in a conversation.
///
/// `horario_data` is a `"%Y-%m-%d %H:%M:%S"` UTC timestamp string; with this
/// format lexicographic order equals chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Phone-like grouping identifier. Not a managed identity.
    pub numero: String,
    /// Message body, or a placeholder token for non-text content.
    pub mensagem: String,
    /// Speaker label, serialized as the `user` column/field.
    #[serde(rename = "user")]
    pub speaker: Speaker,
    /// Timestamp of the turn.
    pub horario_data: String,
}

/// The single knowledge-base document interpolated into every completion
/// request's system instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub documentacao: String,
}

/// Canonical record extracted from an inbound webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    /// Sender identifier (`from` field of the provider payload).
    pub numero: String,
    /// Text body, or a fixed placeholder for non-text message types.
    pub mensagem: String,
    /// Provider-supplied timestamp, passed through verbatim.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn speaker_labels_round_trip() {
        assert_eq!(Speaker::Aluno.to_string(), "aluno");
        assert_eq!(Speaker::Bot.to_string(), "Bot UNIALFA");
        assert_eq!(Speaker::from_str("aluno").unwrap(), Speaker::Aluno);
        assert_eq!(Speaker::from_str("Bot UNIALFA").unwrap(), Speaker::Bot);
        assert!(Speaker::from_str("someone else").is_err());
    }

    #[test]
    fn turn_serializes_speaker_as_user_field() {
        let turn = Turn {
            numero: "5562999990000".to_string(),
            mensagem: "Oi".to_string(),
            speaker: Speaker::Aluno,
            horario_data: "2024-01-01 10:00:00".to_string(),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"user\":\"aluno\""));
        assert!(!json.contains("speaker"));

        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }

    #[test]
    fn bot_speaker_serializes_with_full_label() {
        let json = serde_json::to_string(&Speaker::Bot).unwrap();
        assert_eq!(json, "\"Bot UNIALFA\"");
    }
}
