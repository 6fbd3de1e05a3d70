use axum::{extract::State, Json};
use validator::Validate;

use crate::api::dto::{ChatRequest, ChatResponse};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::Result;

/// `POST /process-chat`
///
/// Answers a chat message using the user's preferences, the optional
/// on-screen product snapshot and the recent session history.
#[utoipa::path(
    post,
    path = "/process-chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Model call or pipeline failure"),
    )
)]
pub async fn process_chat(
    State(state): State<AppState>,
    AppJson(req): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    req.validate()?;

    let outcome = state.chat.process_chat(req.into()).await?;

    if !outcome.persistence.is_complete() {
        tracing::warn!(session_id = %outcome.session_id, "Chat answered but history was not fully stored");
    }

    Ok(Json(outcome.into()))
}
