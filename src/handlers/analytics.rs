// src/handlers/analytics.rs

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::analytics::{
        AnalyticsStats, CleanupPreview, CleanupReport, DailyViewsResponse, DateRangeQuery,
        NewPageView, TrackPayload, TrackResponse,
    },
    services::analytics_service::detect_browser,
};

// Visitas ao próprio dashboard não entram nas estatísticas
const DASHBOARD_PATH_MARKER: &str = "/analytics";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// POST /api/track
#[utoipa::path(
    post,
    path = "/api/track",
    tag = "Analytics",
    request_body = TrackPayload,
    responses(
        (status = 200, description = "Page view registrada (ou ignorada)", body = TrackResponse),
        (status = 400, description = "path ou sessionId ausentes")
    )
)]
pub async fn track(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    Json(payload): Json<TrackPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.path.contains(DASHBOARD_PATH_MARKER) {
        return Ok((StatusCode::OK, Json(TrackResponse { success: true, tracked: false })));
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    // Script antigo sem detecção: deduz pelo user agent
    let browser = non_empty(payload.browser)
        .or_else(|| user_agent.as_deref().map(|ua| detect_browser(ua).to_string()));

    let view = NewPageView {
        path: payload.path,
        referrer: non_empty(payload.referrer),
        user_agent,
        browser,
        session_id: payload.session_id,
        screen_size: non_empty(payload.screen_size),
        language: non_empty(payload.language).or_else(|| Some(locale.0.to_string())),
    };

    app_state.analytics_service.track(view).await?;

    Ok((StatusCode::OK, Json(TrackResponse { success: true, tracked: true })))
}

// GET /api/analytics/stats
#[utoipa::path(
    get,
    path = "/api/analytics/stats",
    tag = "Analytics",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Totais e rankings do período", body = AnalyticsStats),
        (status = 400, description = "Intervalo de datas inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("basic_auth" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.analytics_service.get_stats(&query).await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/analytics/views
#[utoipa::path(
    get,
    path = "/api/analytics/views",
    tag = "Analytics",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Visualizações e visitantes únicos por dia", body = DailyViewsResponse),
        (status = 400, description = "Intervalo de datas inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("basic_auth" = []))
)]
pub async fn get_daily_views(
    State(app_state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let data = app_state.analytics_service.get_daily_views(&query).await?;

    Ok((StatusCode::OK, Json(DailyViewsResponse { data })))
}

// GET /api/analytics/cleanup
#[utoipa::path(
    get,
    path = "/api/analytics/cleanup",
    tag = "Analytics",
    responses(
        (status = 200, description = "O que a limpeza removeria agora", body = CleanupPreview),
        (status = 401, description = "Não autorizado")
    ),
    security(("basic_auth" = []))
)]
pub async fn cleanup_preview(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let preview = app_state.analytics_service.cleanup_preview().await?;

    Ok((StatusCode::OK, Json(preview)))
}

// POST /api/analytics/cleanup
#[utoipa::path(
    post,
    path = "/api/analytics/cleanup",
    tag = "Analytics",
    responses(
        (status = 200, description = "Registros antigos removidos", body = CleanupReport),
        (status = 401, description = "Não autorizado")
    ),
    security(("basic_auth" = []))
)]
pub async fn run_cleanup(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.analytics_service.cleanup().await?;

    Ok((StatusCode::OK, Json(report)))
}
