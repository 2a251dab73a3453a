// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook payload normalization.
//!
//! Inbound payloads arrive in two shapes: the current provider format (a
//! list whose first element carries a `messages` array) and the legacy
//! nested-map format (`entry[0].changes[0].value.messages[0]`). Both funnel
//! into one canonical record. Structural mismatches yield `None` — the
//! webhook must still be acknowledged, so nothing here is an error.

use lidia_core::NormalizedMessage;
use serde_json::Value;
use tracing::debug;

/// Placeholder tokens for non-text message types.
pub const AUDIO_PLACEHOLDER: &str = "[ÁUDIO]";
pub const IMAGE_PLACEHOLDER: &str = "[IMAGEM]";
pub const VIDEO_PLACEHOLDER: &str = "[VÍDEO]";
pub const LOCATION_PLACEHOLDER: &str = "[LOCALIZAÇÃO]";
pub const CONTACT_PLACEHOLDER: &str = "[CONTATO]";
pub const UNSUPPORTED_PLACEHOLDER: &str = "[MENSAGEM NÃO SUPORTADA]";
/// Default filename for document messages that carry none.
pub const UNNAMED_DOCUMENT: &str = "Documento sem nome";

/// Extract the canonical record from a parsed webhook payload.
///
/// Returns `None` whenever a required key is missing, an array is empty, or
/// a value has the wrong type.
pub fn extract_webhook_data(data: &Value) -> Option<NormalizedMessage> {
    if let Some(list) = data.as_array() {
        // Current provider format: list of session objects.
        let first = list.first()?;
        let messages = first.get("messages")?.as_array()?;
        let message = messages.first()?;
        return Some(normalize_message(message));
    }

    if data.is_object() {
        // Legacy WhatsApp Business API format.
        let message = data
            .get("entry")?
            .as_array()?
            .first()?
            .get("changes")?
            .as_array()?
            .first()?
            .get("value")?
            .get("messages")?
            .as_array()?
            .first()?;
        return Some(normalize_message(message));
    }

    debug!("webhook payload is neither a list nor a mapping");
    None
}

fn normalize_message(message: &Value) -> NormalizedMessage {
    let numero = message
        .get("from")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let mensagem = extract_content(message);
    // Some payloads carry the timestamp as a string, others as a number.
    let timestamp = match message.get("timestamp") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    NormalizedMessage {
        numero,
        mensagem,
        timestamp,
    }
}

/// Classify message content by its declared type.
fn extract_content(message: &Value) -> String {
    match message.get("type").and_then(Value::as_str).unwrap_or_default() {
        "text" => message
            .get("text")
            .and_then(|t| t.get("body"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        "audio" => AUDIO_PLACEHOLDER.to_string(),
        "image" => IMAGE_PLACEHOLDER.to_string(),
        "video" => VIDEO_PLACEHOLDER.to_string(),
        "location" => LOCATION_PLACEHOLDER.to_string(),
        "contact" => CONTACT_PLACEHOLDER.to_string(),
        "document" => {
            let filename = message
                .get("document")
                .and_then(|d| d.get("filename"))
                .and_then(Value::as_str)
                .unwrap_or(UNNAMED_DOCUMENT);
            format!("[DOCUMENTO] {filename}")
        }
        _ => UNSUPPORTED_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list_payload(message: Value) -> Value {
        json!([{"messages": [message]}])
    }

    fn legacy_payload(message: Value) -> Value {
        json!({
            "entry": [{
                "changes": [{
                    "value": {
                        "metadata": {"phone_number_id": "1234567890"},
                        "messages": [message]
                    }
                }]
            }]
        })
    }

    #[test]
    fn list_form_extracts_text_verbatim() {
        let payload = list_payload(json!({
            "from": "556299999999",
            "type": "text",
            "text": {"body": "Quero declaração de matrícula."},
            "timestamp": "1700000000"
        }));
        let normalized = extract_webhook_data(&payload).unwrap();
        assert_eq!(normalized.numero, "556299999999");
        assert_eq!(normalized.mensagem, "Quero declaração de matrícula.");
        assert_eq!(normalized.timestamp, "1700000000");
    }

    #[test]
    fn legacy_form_extracts_text_verbatim() {
        let payload = legacy_payload(json!({
            "from": "556288888888",
            "type": "text",
            "text": {"body": "Oi"},
            "timestamp": 1700000001
        }));
        let normalized = extract_webhook_data(&payload).unwrap();
        assert_eq!(normalized.numero, "556288888888");
        assert_eq!(normalized.mensagem, "Oi");
        assert_eq!(normalized.timestamp, "1700000001");
    }

    #[test]
    fn non_text_types_map_to_placeholders() {
        for (kind, expected) in [
            ("audio", "[ÁUDIO]"),
            ("image", "[IMAGEM]"),
            ("video", "[VÍDEO]"),
            ("location", "[LOCALIZAÇÃO]"),
            ("contact", "[CONTATO]"),
        ] {
            let mut message = json!({
                "from": "556299999999",
                "type": kind
            });
            message[kind] = json!({"id": "media-1"});
            let payload = list_payload(message);
            let normalized = extract_webhook_data(&payload).unwrap();
            assert_eq!(normalized.mensagem, expected, "type {kind}");
        }
    }

    #[test]
    fn document_placeholder_includes_filename() {
        let payload = list_payload(json!({
            "from": "556299999999",
            "type": "document",
            "document": {"filename": "edital-2026.pdf"}
        }));
        let normalized = extract_webhook_data(&payload).unwrap();
        assert_eq!(normalized.mensagem, "[DOCUMENTO] edital-2026.pdf");
    }

    #[test]
    fn document_without_filename_uses_default() {
        let payload = list_payload(json!({
            "from": "556299999999",
            "type": "document",
            "document": {}
        }));
        let normalized = extract_webhook_data(&payload).unwrap();
        assert_eq!(normalized.mensagem, "[DOCUMENTO] Documento sem nome");
    }

    #[test]
    fn unknown_type_maps_to_unsupported_placeholder() {
        let payload = list_payload(json!({
            "from": "556299999999",
            "type": "sticker",
            "sticker": {"id": "s-1"}
        }));
        let normalized = extract_webhook_data(&payload).unwrap();
        assert_eq!(normalized.mensagem, "[MENSAGEM NÃO SUPORTADA]");
    }

    #[test]
    fn empty_messages_array_yields_none() {
        let payload = json!([{"messages": []}]);
        assert!(extract_webhook_data(&payload).is_none());
    }

    #[test]
    fn missing_messages_key_yields_none() {
        let payload = json!([{"statuses": [{"id": "wamid-1"}]}]);
        assert!(extract_webhook_data(&payload).is_none());
    }

    #[test]
    fn empty_list_yields_none() {
        assert!(extract_webhook_data(&json!([])).is_none());
    }

    #[test]
    fn legacy_form_without_messages_yields_none() {
        let payload = json!({
            "entry": [{
                "changes": [{
                    "value": {"statuses": [{"id": "wamid-1"}]}
                }]
            }]
        });
        assert!(extract_webhook_data(&payload).is_none());
    }

    #[test]
    fn unrecognized_top_level_shape_yields_none() {
        assert!(extract_webhook_data(&json!("just a string")).is_none());
        assert!(extract_webhook_data(&json!({"object": "whatsapp_business_account"})).is_none());
        assert!(extract_webhook_data(&json!(42)).is_none());
    }

    #[test]
    fn missing_sender_yields_empty_numero() {
        // The handler rejects this downstream as an invalid number.
        let payload = list_payload(json!({
            "type": "text",
            "text": {"body": "anônimo"}
        }));
        let normalized = extract_webhook_data(&payload).unwrap();
        assert_eq!(normalized.numero, "");
    }
}
