// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Groq chat-completions API.
//!
//! One blocking-free attempt per request, bounded by the configured timeout.
//! There is deliberately no retry layer: the inbound-webhook convention
//! (always acknowledge with 2xx) is the system's resilience mechanism, and a
//! retried completion would only hold the webhook open longer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use thiserror::Error;
use tracing::{debug, error};

use lidia_config::model::GroqConfig;
use lidia_core::{CompletionProvider, LidiaError, Turn};

use crate::prompt;
use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Failure taxonomy for a completion attempt.
///
/// Replaces the reserved-prefix strings of the original service ("Erro na
/// API: …", "Erro: Timeout…") with a tagged type; callers branch on the
/// variant, never on the reply text.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Non-2xx response from the API.
    #[error("API returned {status}: {detail}")]
    Api { status: u16, detail: String },

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure (DNS, refused connection, broken pipe).
    #[error("connection error: {0}")]
    Connection(String),

    /// 2xx response whose body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<CompletionError> for LidiaError {
    fn from(err: CompletionError) -> Self {
        LidiaError::Provider {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// HTTP client for the Groq OpenAI-compatible chat-completions endpoint.
///
/// Holds the bearer credential in the client's default headers and the
/// sampling parameters from configuration.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

impl GroqClient {
    /// Create a new client from configuration.
    ///
    /// Fails when no API key is configured: a gateway without a credential
    /// cannot answer anyone, so this is a startup error rather than a
    /// per-request condition.
    pub fn new(config: &GroqConfig) -> Result<Self, LidiaError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            LidiaError::Config(
                "groq.api_key is required (set it in lidia.toml or via LIDIA_GROQ_API_KEY)"
                    .to_string(),
            )
        })?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| LidiaError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LidiaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one chat request and return the first completion's text.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.api_url)
            .json(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("{}: {}", api_err.error.type_, api_err.error.message),
                Err(_) => body,
            };
            error!(status = %status, detail = %detail, "completion request failed");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::InvalidResponse(format!("failed to read body: {e}")))?;
        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::InvalidResponse(format!("failed to parse body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("response contained no choices".into()))
    }
}

#[async_trait]
impl CompletionProvider for GroqClient {
    async fn complete(
        &self,
        turns: &[Turn],
        document: &str,
        current_message: &str,
    ) -> Result<String, LidiaError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: prompt::build_messages(turns, document, current_message),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        };
        debug!(messages = request.messages.len(), model = %request.model, "sending completion request");
        let text = self.chat(&request).await?;
        Ok(text)
    }
}

/// Classify a reqwest transport error into the completion taxonomy.
fn classify_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Connection(err.to_string())
    }
}
