// src/common/error.rs

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

// Todos os erros que os serviços podem devolver para a camada de apresentação.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Rua e bairro são obrigatórios")]
    MissingAddress,

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    #[error("Falha de comunicação com o backend: {0}")]
    Http(#[from] reqwest::Error),

    // O backend mudou o formato da resposta
    #[error("Resposta do backend fora do formato esperado: {0}")]
    Schema(String),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro no armazenamento local: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Erro interno: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Status HTTP devolvido pelo backend, quando o erro veio de uma resposta.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Backend { status, .. } => Some(*status),
            AppError::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            AppError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }

    /// Erros de validação local: nenhuma requisição foi feita.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AppError::ValidationError(_) | AppError::MissingAddress | AppError::InvalidDate(_)
        )
    }

    /// Mensagens de validação achatadas numa única linha, para exibir ao usuário.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .values()
                    .flat_map(|field_errors| field_errors.iter())
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                messages.sort();
                messages.dedup();
                if messages.is_empty() {
                    "Um ou mais campos são inválidos.".to_string()
                } else {
                    messages.join(" ")
                }
            }
            other => other.to_string(),
        }
    }
}

// Corpo de erro padrão do backend: `{ "detail": "..." }`.
// O FastAPI devolve `detail` como lista quando a validação do pydantic falha.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ApiError {
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if parts.is_empty() { None } else { Some(parts.join("; ")) }
            }
            _ => None,
        }
    }

    /// Extrai a mensagem do corpo bruto; corpo vazio ou inválido cai no `fallback`.
    pub fn detail_or(body: &str, fallback: &str) -> String {
        serde_json::from_str::<ApiError>(body)
            .ok()
            .and_then(|e| e.message())
            .unwrap_or_else(|| fallback.to_string())
    }
}
