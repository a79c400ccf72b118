// src/models/analytics.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// Já resolvido pelo handler (user agent, browser e idioma preenchidos)
#[derive(Debug, Clone)]
pub struct NewPageView {
    pub path: String,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub browser: Option<String>,
    pub session_id: String,
    pub screen_size: Option<String>,
    pub language: Option<String>,
}

// O que o script de tracking envia
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "path is required."))]
    #[schema(example = "/es/")]
    pub path: String,

    #[schema(example = "https://www.google.com/")]
    pub referrer: Option<String>,

    #[schema(example = "1920x1080")]
    pub screen_size: Option<String>,

    #[schema(example = "es-ES")]
    pub language: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, message = "sessionId is required."))]
    #[schema(example = "4f1c2a8e-6a53-4b8e-9a0c-2d1b0c9e7f11")]
    pub session_id: String,

    #[schema(example = "Firefox")]
    pub browser: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackResponse {
    pub success: bool,
    pub tracked: bool,
}

// ?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    #[param(value_type = Option<String>, example = "2025-01-01")]
    pub start_date: Option<NaiveDate>,
    #[param(value_type = Option<String>, example = "2025-01-31")]
    pub end_date: Option<NaiveDate>,
}

// Intervalo semiaberto [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PathCount {
    pub path: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ReferrerCount {
    pub referrer: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BrowserCount {
    pub browser: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAgentCount {
    pub user_agent: String,
    pub count: i64,
}

// Cards e rankings do dashboard
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub total_views: i64,
    pub unique_sessions: i64,
    pub today_views: i64,
    pub week_views: i64,
    pub top_pages: Vec<PathCount>,
    pub top_referrers: Vec<ReferrerCount>,
    pub browsers: Vec<BrowserCount>,
    pub user_agents: Vec<UserAgentCount>,
}

// Linha agregada por dia vinda do banco
#[derive(Debug, Clone, FromRow)]
pub struct DailyCountRow {
    pub day: NaiveDate,
    pub views: i64,
    pub unique_visitors: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyViews {
    #[schema(value_type = String, example = "2025-01-15")]
    pub date: NaiveDate,
    pub views: i64,
    pub unique_visitors: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyViewsResponse {
    pub data: Vec<DailyViews>,
}

// GET /api/analytics/cleanup
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupPreview {
    pub retention_months: u32,
    pub cutoff_date: DateTime<Utc>,
    pub total_records: i64,
    pub records_to_delete: i64,
    pub records_to_keep: i64,
    pub oldest_record: Option<DateTime<Utc>>,
    pub newest_record: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupDetails {
    pub cutoff_date: DateTime<Utc>,
    pub deleted_count: u64,
    pub records_before: i64,
    pub records_after: i64,
}

// POST /api/analytics/cleanup
#[derive(Debug, Serialize, ToSchema)]
pub struct CleanupReport {
    pub success: bool,
    pub message: String,
    pub details: CleanupDetails,
}
