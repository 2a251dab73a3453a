// SPDX-FileCopyrightText: 2026 Lidia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! The webhook handler runs the whole inbound pipeline in one linear pass:
//! normalize, validate, persist the student turn, replay history, call the
//! completion provider, persist and relay the reply. A webhook is always
//! acknowledged with 2xx once its shape is recognized — non-2xx answers make
//! the provider redeliver.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use lidia_core::history::format_history;
use lidia_core::{LidiaError, Speaker, Turn};
use lidia_whatsapp::{extract_webhook_data, is_valid_numero};

use crate::server::GatewayState;

/// Reply persisted and relayed when the completion provider fails.
pub const SERVICE_UNAVAILABLE_REPLY: &str =
    "Serviços indisponíveis no momento, entre em contato com esse número: (62) 993977594";

/// Alert sent to the administrative number when the provider fails.
pub const ADMIN_OUTAGE_ALERT: &str = "Chatbot fora de serviço, verificar limites na Groq";

/// Placeholder used when no knowledge document is stored.
pub const MISSING_DOCUMENT_PLACEHOLDER: &str = "Documentação não disponível";

const MISSING_JSON_MSG: &str = "Dados JSON não fornecidos";
const NOT_PROCESSED_MSG: &str = "Dados não processados";
const INVALID_NUMBER_MSG: &str = "Número inválido";

const ADMIN_READ_COMMAND: &str = "admin - contexto atual";
const ADMIN_REPLACE_PREFIX: &str = "admin - novo contexto:";

/// Uniform status envelope: `{status, message?, numero?}`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero: Option<String>,
}

impl Envelope {
    fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            numero: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
            numero: None,
        }
    }

    fn with_numero(mut self, numero: impl Into<String>) -> Self {
        self.numero = Some(numero.into());
        self
    }
}

/// Response body for `POST /atualizar-contexto` on success.
#[derive(Debug, Serialize)]
pub struct ContextUpdateResponse {
    pub status: &'static str,
    pub message: String,
    pub id: i64,
}

/// Response body for `GET /contexto`.
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub status: &'static str,
    pub documentacao: String,
    pub total_registros: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response body for `GET /historico/{numero}`.
#[derive(Debug, Serialize)]
pub struct NumberHistoryResponse {
    pub status: &'static str,
    pub numero: String,
    pub total: usize,
    pub turns: Vec<Turn>,
    /// Flattened display rendering of `turns`.
    pub historico: String,
}

/// Response body for `GET /historico`.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub status: &'static str,
    pub total: usize,
    pub turns: Vec<Turn>,
}

fn internal_error(err: &LidiaError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::error(err.to_string())),
    )
        .into_response()
}

/// POST /webhook
///
/// Receives a provider webhook delivery and runs the inbound pipeline.
pub async fn post_webhook(State(state): State<GatewayState>, body: Bytes) -> Response {
    let data: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => {
            warn!("webhook request without a JSON body");
            return (StatusCode::BAD_REQUEST, Json(Envelope::error(MISSING_JSON_MSG)))
                .into_response();
        }
        Ok(data) => data,
    };

    let Some(normalized) = extract_webhook_data(&data) else {
        warn!("could not extract a message from the webhook payload");
        return (StatusCode::OK, Json(Envelope::success(NOT_PROCESSED_MSG))).into_response();
    };

    let numero = normalized.numero;
    let mensagem_atual = normalized.mensagem;

    if !is_valid_numero(&numero) {
        warn!(numero = %numero, "invalid sender number");
        return (StatusCode::BAD_REQUEST, Json(Envelope::error(INVALID_NUMBER_MSG)))
            .into_response();
    }

    info!(numero = %numero, "inbound message");

    if state.admin_numero.as_deref() == Some(numero.as_str()) {
        if let Some(response) = handle_admin_command(&state, &numero, &mensagem_atual).await {
            return response;
        }
    }

    match process_message(&state, &numero, &mensagem_atual).await {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, numero = %numero, "webhook processing failed");
            internal_error(&e)
        }
    }
}

/// The normal pipeline: persist, replay, complete, persist, relay.
async fn process_message(
    state: &GatewayState,
    numero: &str,
    mensagem_atual: &str,
) -> Result<Response, LidiaError> {
    state
        .store
        .append_turn(numero, mensagem_atual, Speaker::Aluno)
        .await?;
    info!(numero = %numero, "student turn persisted");

    let turns = state.store.turns_for_numero(numero).await?;
    let document = state
        .store
        .read_document()
        .await?
        .map(|d| d.documentacao)
        .unwrap_or_else(|| MISSING_DOCUMENT_PLACEHOLDER.to_string());

    match state
        .completion
        .complete(&turns, &document, mensagem_atual)
        .await
    {
        Ok(reply) => {
            state.store.append_turn(numero, &reply, Speaker::Bot).await?;
            info!(numero = %numero, "bot turn persisted");

            if let Err(e) = state.outbound.send(numero, &reply).await {
                error!(error = %e, numero = %numero, "outbound send failed");
            }

            Ok((
                StatusCode::OK,
                Json(Envelope::success(reply).with_numero(numero)),
            )
                .into_response())
        }
        Err(e) => {
            error!(error = %e, numero = %numero, "completion provider failed");

            // The student gets a fixed apology; the raw error never leaves
            // the process through the chat channel.
            state
                .store
                .append_turn(numero, SERVICE_UNAVAILABLE_REPLY, Speaker::Bot)
                .await?;
            if let Err(e) = state.outbound.send(numero, SERVICE_UNAVAILABLE_REPLY).await {
                error!(error = %e, numero = %numero, "outbound send of apology failed");
            }

            if let Some(admin) = state.admin_numero.as_deref() {
                if let Err(e) = state.outbound.send(admin, ADMIN_OUTAGE_ALERT).await {
                    error!(error = %e, "outbound send of admin alert failed");
                }
            }

            Ok((
                StatusCode::OK,
                Json(Envelope::error(SERVICE_UNAVAILABLE_REPLY).with_numero(numero)),
            )
                .into_response())
        }
    }
}

/// In-band admin commands. Returns `Some(response)` when `mensagem` was a
/// recognized command, `None` to fall through to the normal pipeline.
///
/// The replace command goes through the same store operation and the same
/// non-blank rule as `POST /atualizar-contexto`; only the reply texts differ.
async fn handle_admin_command(
    state: &GatewayState,
    numero: &str,
    mensagem: &str,
) -> Option<Response> {
    let command = mensagem.trim().to_lowercase();

    if command == ADMIN_READ_COMMAND {
        info!("admin command: read current document");
        let documentacao = match state.store.read_document().await {
            Ok(Some(doc)) => doc.documentacao,
            Ok(None) => MISSING_DOCUMENT_PLACEHOLDER.to_string(),
            Err(e) => return Some(internal_error(&e)),
        };
        if let Err(e) = state.outbound.send(numero, &documentacao).await {
            error!(error = %e, "outbound send of current document failed");
        }
        return Some(
            (
                StatusCode::OK,
                Json(Envelope::success(documentacao).with_numero(numero)),
            )
                .into_response(),
        );
    }

    if command.starts_with(ADMIN_REPLACE_PREFIX) {
        info!("admin command: replace document");
        // Everything after the first ':' of the original message.
        let remainder = mensagem.splitn(2, ':').nth(1).unwrap_or_default();
        let Some(documentacao) = validate_documentacao(remainder) else {
            warn!("admin replace command with blank document");
            let _ = state
                .outbound
                .send(numero, "❌ O novo contexto não pode estar vazio")
                .await;
            return Some(
                (StatusCode::BAD_REQUEST, Json(Envelope::error("Contexto vazio")))
                    .into_response(),
            );
        };

        return Some(match state.store.replace_document(&documentacao).await {
            Ok(_) => {
                info!("document replaced via admin command");
                let _ = state
                    .outbound
                    .send(numero, "✅ Contexto atualizado com sucesso!")
                    .await;
                (
                    StatusCode::OK,
                    Json(Envelope::success("Contexto atualizado").with_numero(numero)),
                )
                    .into_response()
            }
            Err(e) => {
                error!(error = %e, "admin document replace failed");
                let _ = state
                    .outbound
                    .send(numero, "❌ Erro ao atualizar contexto no banco de dados")
                    .await;
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Envelope::error("Erro ao atualizar contexto")),
                )
                    .into_response()
            }
        });
    }

    None
}

/// The one non-blank rule shared by the HTTP endpoint and the admin command.
fn validate_documentacao(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// POST /atualizar-contexto
///
/// Replaces the knowledge document wholesale.
pub async fn post_atualizar_contexto(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Response {
    info!("context update requested");

    let data: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) | Err(_) => {
            warn!("context update without a JSON body");
            return (StatusCode::BAD_REQUEST, Json(Envelope::error(MISSING_JSON_MSG)))
                .into_response();
        }
        Ok(data) => data,
    };

    let Some(raw) = data.get("documentacao") else {
        warn!("context update without the 'documentacao' field");
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::error("Campo 'documentacao' é obrigatório")),
        )
            .into_response();
    };

    let Some(documentacao) = validate_documentacao(raw.as_str().unwrap_or_default()) else {
        warn!("context update with a blank document");
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::error("Documentação não pode estar vazia")),
        )
            .into_response();
    };

    match state.store.replace_document(&documentacao).await {
        Ok(id) => {
            info!(id, "document replaced");
            (
                StatusCode::OK,
                Json(ContextUpdateResponse {
                    status: "success",
                    message: "Documentação atualizada com sucesso".to_string(),
                    id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "document replace failed");
            internal_error(&e)
        }
    }
}

/// GET /contexto
///
/// Returns the current document text and row count.
pub async fn get_contexto(State(state): State<GatewayState>) -> Response {
    let document = match state.store.read_document().await {
        Ok(doc) => doc,
        Err(e) => return internal_error(&e),
    };
    let total_registros = match state.store.document_count().await {
        Ok(count) => count,
        Err(e) => return internal_error(&e),
    };

    let body = match document {
        Some(doc) => ContextResponse {
            status: "success",
            documentacao: doc.documentacao,
            total_registros,
            message: None,
        },
        None => ContextResponse {
            status: "success",
            documentacao: String::new(),
            total_registros: 0,
            message: Some("Nenhuma documentação encontrada".to_string()),
        },
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// GET /historico/{numero}
///
/// All turns for one number, newest first, plus the flattened display form.
pub async fn get_historico_por_numero(
    State(state): State<GatewayState>,
    Path(numero): Path<String>,
) -> Response {
    match state.store.turns_for_numero(&numero).await {
        Ok(turns) => {
            let historico = format_history(&turns);
            (
                StatusCode::OK,
                Json(NumberHistoryResponse {
                    status: "success",
                    numero,
                    total: turns.len(),
                    turns,
                    historico,
                }),
            )
                .into_response()
        }
        Err(e) => internal_error(&e),
    }
}

/// GET /historico
///
/// All turns across every number, newest first.
pub async fn get_historico(State(state): State<GatewayState>) -> Response {
    match state.store.all_turns().await {
        Ok(turns) => (
            StatusCode::OK,
            Json(HistoryResponse {
                status: "success",
                total: turns.len(),
                turns,
            }),
        )
            .into_response(),
        Err(e) => internal_error(&e),
    }
}
