use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::dto::{PreferencesRequest, PreferencesResponse};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::Result;

/// `GET /preferences/{user_id}`
#[utoipa::path(
    get,
    path = "/preferences/{user_id}",
    tag = "preferences",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Stored or default preferences", body = PreferencesResponse),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PreferencesResponse>> {
    let preferences = state.preferences.get(&user_id).await?;
    Ok(Json(preferences.into()))
}

/// `POST /preferences/{user_id}`
///
/// Replaces the whole record; there is no partial merge.
#[utoipa::path(
    post,
    path = "/preferences/{user_id}",
    tag = "preferences",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = PreferencesRequest,
    responses(
        (status = 200, description = "Stored preferences", body = PreferencesResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    AppJson(req): AppJson<PreferencesRequest>,
) -> Result<Json<PreferencesResponse>> {
    let stored = state
        .preferences
        .update(req.into_preferences(&user_id))
        .await?;
    Ok(Json(stored.into()))
}
