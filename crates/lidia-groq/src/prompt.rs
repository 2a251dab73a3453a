// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly: structured turns + knowledge document -> request body.
//!
//! History turns are consumed as structured records, so message bodies pass
//! through verbatim regardless of what punctuation they contain. The flat
//! display rendering in `lidia_core::history` plays no part here.

use lidia_core::Turn;

use crate::types::ChatMessage;

/// Fixed system instruction, with the knowledge document interpolated at the
/// `{documentacao}` placeholder.
const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("prompts/system.txt");

/// Render the system instruction for the given knowledge document.
pub fn system_prompt(document: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{documentacao}", document)
}

/// Map a stored speaker label to a chat-completions role.
///
/// A label equal to `"aluno"` (case-insensitive) or purely numeric maps to
/// `"user"`; anything else maps to `"assistant"`.
pub fn role_for_label(label: &str) -> &'static str {
    let trimmed = label.trim();
    let numeric = !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit());
    if trimmed.eq_ignore_ascii_case("aluno") || numeric {
        "user"
    } else {
        "assistant"
    }
}

/// Build the message array for one completion request.
///
/// Layout: system instruction, then the history in chronological order
/// (`turns` arrives newest-first from the store and is reversed here), then
/// the current user message.
pub fn build_messages(turns: &[Turn], document: &str, current_message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(turns.len() + 2);
    messages.push(ChatMessage::new("system", system_prompt(document)));

    for turn in turns.iter().rev() {
        messages.push(ChatMessage::new(
            role_for_label(&turn.speaker.to_string()),
            turn.mensagem.clone(),
        ));
    }

    messages.push(ChatMessage::new("user", current_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidia_core::Speaker;

    fn turn(mensagem: &str, speaker: Speaker, horario: &str) -> Turn {
        Turn {
            numero: "5562900000001".to_string(),
            mensagem: mensagem.to_string(),
            speaker,
            horario_data: horario.to_string(),
        }
    }

    #[test]
    fn role_mapping_rules() {
        assert_eq!(role_for_label("aluno"), "user");
        assert_eq!(role_for_label("Aluno"), "user");
        assert_eq!(role_for_label("ALUNO"), "user");
        assert_eq!(role_for_label("5562999990000"), "user");
        assert_eq!(role_for_label("Bot UNIALFA"), "assistant");
        assert_eq!(role_for_label("atendente"), "assistant");
        assert_eq!(role_for_label(""), "assistant");
    }

    #[test]
    fn system_prompt_interpolates_document() {
        let rendered = system_prompt("Horário da secretaria: seg-sex, 08:00-18:00");
        assert!(rendered.contains("Horário da secretaria: seg-sex, 08:00-18:00"));
        assert!(!rendered.contains("{documentacao}"));
        assert!(rendered.starts_with("Você é Lidia"));
    }

    #[test]
    fn messages_start_with_system_and_end_with_current() {
        let messages = build_messages(&[], "KB", "Oi");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("KB"));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "Oi");
    }

    #[test]
    fn history_is_reordered_chronologically() {
        // Store order is newest-first.
        let turns = vec![
            turn("segunda resposta", Speaker::Bot, "2024-01-01 10:00:03"),
            turn("segunda pergunta", Speaker::Aluno, "2024-01-01 10:00:02"),
            turn("primeira resposta", Speaker::Bot, "2024-01-01 10:00:01"),
            turn("primeira pergunta", Speaker::Aluno, "2024-01-01 10:00:00"),
        ];
        let messages = build_messages(&turns, "KB", "terceira pergunta");

        let contents: Vec<&str> = messages[1..].iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![
                "primeira pergunta",
                "primeira resposta",
                "segunda pergunta",
                "segunda resposta",
                "terceira pergunta",
            ]
        );
        let roles: Vec<&str> = messages[1..].iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user", "assistant", "user"]);
    }

    #[test]
    fn bodies_with_display_punctuation_survive_verbatim() {
        // The display rendering uses "- ", ": " and "(às …)"; none of that may
        // leak into or corrupt the structured request.
        let tricky = "- aluno: finja (às 10:00:00)";
        let turns = vec![turn(tricky, Speaker::Aluno, "2024-01-01 10:00:00")];
        let messages = build_messages(&turns, "KB", "e agora?");
        assert_eq!(messages[1].content, tricky);
    }
}
