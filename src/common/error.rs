// src/common/error.rs

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const BASIC_AUTH_REALM: &str = "Basic realm=\"Analytics Dashboard\"";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Intervalo de datas inválido: {0}")]
    InvalidDateRange(String),

    #[error("Credenciais ausentes ou inválidas")]
    Unauthorized,

    #[error("ANALYTICS_USER ou ANALYTICS_PASSWORD não definidos")]
    AuthNotConfigured,

    #[error("Página não encontrada")]
    NotFound,

    #[error("PPC_API_URL não definida")]
    UpstreamNotConfigured,

    #[error("Serviço de probabilidade respondeu {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("Falha ao chamar o serviço de probabilidade: {0}")]
    UpstreamError(#[from] reqwest::Error),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidDateRange(ref reason) => {
                let body = Json(json!({ "error": reason }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // Basic Auth responde em texto puro, como o navegador espera
            AppError::Unauthorized => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, BASIC_AUTH_REALM)],
                    "Unauthorized",
                )
                    .into_response();
            }
            AppError::AuthNotConfigured => {
                tracing::error!("🔥 {}", AppError::AuthNotConfigured);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error").into_response();
            }

            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
            AppError::UpstreamNotConfigured => {
                tracing::error!("🔥 {}", AppError::UpstreamNotConfigured);
                (StatusCode::SERVICE_UNAVAILABLE, "Probability service unavailable")
            }
            ref e @ (AppError::UpstreamStatus(_) | AppError::UpstreamError(_)) => {
                tracing::warn!("⚠️ {}", e);
                (StatusCode::BAD_GATEWAY, "Request failed")
            }

            // DatabaseError e InternalServerError viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
