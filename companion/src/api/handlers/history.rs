use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::dto::{HistoryResponse, TurnResponse};
use crate::api::AppState;
use crate::error::Result;

/// `GET /history/{session_id}`
#[utoipa::path(
    get,
    path = "/history/{session_id}",
    tag = "chat",
    params(("session_id" = String, Path, description = "Chat session identifier")),
    responses(
        (status = 200, description = "Stored turns, oldest first", body = HistoryResponse),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>> {
    let turns = state.chat.session_history(&session_id).await?;

    Ok(Json(HistoryResponse {
        session_id,
        messages: turns.into_iter().map(TurnResponse::from).collect(),
    }))
}
