use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DomSnapshot, FilterDirective};
use crate::services::{ChatInput, ChatOutcome};

/// Request body for `POST /process-chat`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "user_id cannot be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: String,
    /// Products the user can currently see, split by viewport position.
    #[serde(default)]
    #[validate(nested)]
    pub dom_snapshot: Option<DomSnapshot>,
    /// Continue an existing conversation. A new id is minted when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

impl From<ChatRequest> for ChatInput {
    fn from(req: ChatRequest) -> Self {
        Self {
            user_id: req.user_id,
            message: req.message,
            context: req.dom_snapshot.map(Into::into),
            session_id: req.session_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ChatResponse {
    /// Reply text, Markdown, with any filter block removed.
    pub response: String,
    pub session_id: String,
    /// ISO-8601 UTC.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterDirective>,
}

impl From<ChatOutcome> for ChatResponse {
    fn from(outcome: ChatOutcome) -> Self {
        let filters = outcome.filters().cloned();
        Self {
            response: outcome.response,
            session_id: outcome.session_id,
            timestamp: outcome.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            filters,
        }
    }
}
