// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-facing rendering of a conversation history.
//!
//! The flattened form produced here is for display only (the `historico`
//! endpoints); the completion client consumes structured [`Turn`] records
//! directly and never re-parses this text.

use crate::types::Turn;

/// Sentinel returned when a conversation has no turns yet.
pub const EMPTY_HISTORY: &str = "Nenhuma mensagem anterior";

/// Render an ordered sequence of turns as a flat text block.
///
/// One line per turn, `- {user}: {mensagem} (às {horario_data})`, input order
/// preserved. An empty sequence yields exactly [`EMPTY_HISTORY`].
pub fn format_history(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut out = String::new();
    for turn in turns {
        out.push_str(&format!(
            "- {}: {} (às {})\n",
            turn.speaker, turn.mensagem, turn.horario_data
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Speaker;

    fn turn(mensagem: &str, speaker: Speaker, horario: &str) -> Turn {
        Turn {
            numero: "5562999990000".to_string(),
            mensagem: mensagem.to_string(),
            speaker,
            horario_data: horario.to_string(),
        }
    }

    #[test]
    fn empty_history_returns_sentinel() {
        assert_eq!(format_history(&[]), "Nenhuma mensagem anterior");
    }

    #[test]
    fn single_turn_renders_exact_line() {
        let turns = vec![turn("Oi", Speaker::Aluno, "2024-01-01 10:00:00")];
        assert_eq!(
            format_history(&turns),
            "- aluno: Oi (às 2024-01-01 10:00:00)\n"
        );
    }

    #[test]
    fn multiple_turns_preserve_input_order() {
        let turns = vec![
            turn("tudo bem?", Speaker::Bot, "2024-01-01 10:00:05"),
            turn("Oi", Speaker::Aluno, "2024-01-01 10:00:00"),
        ];
        let rendered = format_history(&turns);
        assert_eq!(
            rendered,
            "- Bot UNIALFA: tudo bem? (às 2024-01-01 10:00:05)\n\
             - aluno: Oi (às 2024-01-01 10:00:00)\n"
        );
    }

    #[test]
    fn message_bodies_pass_through_verbatim() {
        // Bodies containing the line's own punctuation must not be altered.
        let turns = vec![turn(
            "veja: - item (às vezes)",
            Speaker::Aluno,
            "2024-01-01 10:00:00",
        )];
        assert_eq!(
            format_history(&turns),
            "- aluno: veja: - item (às vezes) (às 2024-01-01 10:00:00)\n"
        );
    }
}
