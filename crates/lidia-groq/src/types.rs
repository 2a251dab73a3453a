// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq (OpenAI-compatible) chat-completions request/response types.

use serde::{Deserialize, Serialize};

/// A request to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "llama-3.3-70b-versatile").
    pub model: String,

    /// System instruction, conversation history, and the current message.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature.
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Nucleus sampling cutoff.
    pub top_p: f64,
}

/// A single message in the chat-completions conversation format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    pub role: String,

    /// Message text.
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A full response from the chat-completions endpoint.
///
/// Only the fields the gateway consumes are modeled; the rest of the payload
/// (usage, fingerprints) is ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Generated completions. The first choice carries the reply.
    pub choices: Vec<ChatChoice>,
}

/// One generated completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail inside an [`ApiErrorResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile".to_string(),
            messages: vec![
                ChatMessage::new("system", "instructions"),
                ChatMessage::new("user", "Oi"),
            ],
            temperature: 0.7,
            max_tokens: 800,
            top_p: 0.9,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Oi");
        assert_eq!(json["max_tokens"], 800);
    }

    #[test]
    fn chat_response_deserializes_ignoring_extra_fields() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Olá!"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, "Olá!");
    }

    #[test]
    fn api_error_response_deserializes() {
        let body = r#"{"error": {"message": "Rate limited", "type": "rate_limit_error"}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.type_, "rate_limit_error");
        assert_eq!(parsed.error.message, "Rate limited");
    }
}
