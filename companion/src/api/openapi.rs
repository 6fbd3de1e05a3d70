use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Browsing Companion AI Service",
        version = "1.0.0",
        description = "Shopping assistant chat with page-aware prompts and product filter directives.",
    ),
    paths(
        handlers::health::root,
        handlers::health::health,
        handlers::chat::process_chat,
        handlers::history::get_history,
        handlers::preferences::get_preferences,
        handlers::preferences::update_preferences,
        handlers::health::analyze_preferences,
    ),
    components(schemas(
        dto::ChatRequest,
        dto::ChatResponse,
        dto::PreferencesRequest,
        dto::PreferencesResponse,
        dto::HistoryResponse,
        dto::TurnResponse,
        models::DomSnapshot,
        models::ProductSnapshotEntry,
        models::FilterDirective,
        models::CustomerType,
        models::TurnRole,
        handlers::health::ServiceInfo,
        handlers::health::HealthStatus,
        handlers::health::PreferenceAnalysis,
    )),
    tags(
        (name = "health", description = "Service identity and liveness"),
        (name = "chat", description = "Shopping assistant conversation"),
        (name = "preferences", description = "Per-user shopping preferences"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/redoc", ApiDoc::openapi()).into()
}
