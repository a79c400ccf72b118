// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Calculator ---
        handlers::probability::get_probability,

        // --- Analytics ---
        handlers::analytics::track,
        handlers::analytics::get_stats,
        handlers::analytics::get_daily_views,
        handlers::analytics::cleanup_preview,
        handlers::analytics::run_cleanup,
    ),
    components(
        schemas(
            // --- Calculator ---
            models::probability::PlayerInput,
            models::probability::ProbabilityRequest,

            // --- Analytics ---
            models::analytics::TrackPayload,
            models::analytics::TrackResponse,
            models::analytics::PathCount,
            models::analytics::ReferrerCount,
            models::analytics::BrowserCount,
            models::analytics::UserAgentCount,
            models::analytics::AnalyticsStats,
            models::analytics::DailyViews,
            models::analytics::DailyViewsResponse,
            models::analytics::CleanupPreview,
            models::analytics::CleanupDetails,
            models::analytics::CleanupReport,
        )
    ),
    tags(
        (name = "Calculator", description = "Probabilidade de vitória de um jogo de casais"),
        (name = "Analytics", description = "Tracking de page views e dashboard (Basic Auth)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Basic)
            ),
        );
    }
}
