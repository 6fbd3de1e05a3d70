use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::extractors::AppJson;
use crate::api::AppState;

pub const SERVICE_NAME: &str = "Browsing Companion AI Service";

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    /// `healthy`, or `degraded` when the store cannot be synced.
    pub status: String,
    pub database: String,
    /// Configured chat model, absent when none is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PreferenceAnalysis {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// `GET /`
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service identity", body = ServiceInfo))
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "healthy".to_string(),
    })
}

/// `GET /health`
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Liveness and store status", body = HealthStatus))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let (status, database) = match state.db.sync().await {
        Ok(()) => ("healthy", "ok"),
        Err(error) => {
            tracing::warn!(error = %error, "Health check: store sync failed");
            ("degraded", "error")
        }
    };

    Json(HealthStatus {
        status: status.to_string(),
        database: database.to_string(),
        llm_model: state.config.llm.as_ref().map(|llm| llm.model.clone()),
    })
}

/// `POST /analyze-preferences`
///
/// Accepts any JSON object. Behavioural analysis is not implemented, so the
/// answer never carries suggestions.
#[utoipa::path(
    post,
    path = "/analyze-preferences",
    tag = "preferences",
    responses((status = 200, description = "Analysis result", body = PreferenceAnalysis))
)]
pub async fn analyze_preferences(
    AppJson(_request): AppJson<serde_json::Map<String, serde_json::Value>>,
) -> Json<PreferenceAnalysis> {
    Json(PreferenceAnalysis {
        message: "Preference analysis not yet implemented".to_string(),
        suggestions: Vec::new(),
    })
}
