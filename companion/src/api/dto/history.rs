use chrono::SecondsFormat;
use serde::Serialize;

use crate::models::{ConversationTurn, TurnRole};

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub role: TurnRole,
    pub content: String,
    pub timestamp: String,
}

impl From<ConversationTurn> for TurnResponse {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            id: turn.id,
            session_id: turn.session_id,
            user_id: turn.user_id,
            role: turn.role,
            content: turn.content,
            timestamp: turn.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Response for `GET /history/{session_id}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HistoryResponse {
    pub session_id: String,
    /// Oldest first.
    pub messages: Vec<TurnResponse>,
}
