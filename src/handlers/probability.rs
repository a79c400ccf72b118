// src/handlers/probability.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::probability::ProbabilityRequest};

// POST /api/probability
#[utoipa::path(
    post,
    path = "/api/probability",
    tag = "Calculator",
    request_body = ProbabilityRequest,
    responses(
        (status = 200, description = "Resposta do serviço de probabilidade, sem alterações"),
        (status = 400, description = "Jogadores inválidos (precisa de 4, com nível e confiabilidade > 0)"),
        (status = 502, description = "O serviço de probabilidade falhou"),
        (status = 503, description = "Serviço de probabilidade não configurado")
    )
)]
pub async fn get_probability(
    State(app_state): State<AppState>,
    Json(payload): Json<ProbabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let result = app_state.probability_client.get_probability(&payload).await?;

    Ok((StatusCode::OK, Json(result)))
}
