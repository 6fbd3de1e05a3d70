use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::context::PageContext;
use crate::db::DatabaseBackend;
use crate::error::{CompanionError, Result};
use crate::intelligence::{extract_filter_directive, DirectiveOutcome};
use crate::llm::prompts::compose_system_prompt;
use crate::llm::{ChatCompletion, CompletionOptions};
use crate::models::{ChatMessage, ConversationTurn, FilterDirective, TurnRole, UserPreferences};

/// One incoming chat message.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub user_id: String,
    pub message: String,
    pub context: Option<PageContext>,
    /// Existing session to continue. Blank or absent starts a new one.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPersistence {
    Stored,
    Failed { reason: String },
}

impl TurnPersistence {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}

/// Result of the best-effort history writes for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceReport {
    pub user_turn: TurnPersistence,
    pub assistant_turn: TurnPersistence,
}

impl PersistenceReport {
    pub fn is_complete(&self) -> bool {
        self.user_turn.is_stored() && self.assistant_turn.is_stored()
    }
}

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Reply text with any filter block removed.
    pub response: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub directive: DirectiveOutcome,
    pub persistence: PersistenceReport,
}

impl ChatOutcome {
    pub fn filters(&self) -> Option<&FilterDirective> {
        match &self.directive {
            DirectiveOutcome::Found(directive) => Some(directive),
            _ => None,
        }
    }
}

pub struct ChatService {
    db: Arc<dyn DatabaseBackend>,
    llm: Arc<dyn ChatCompletion>,
    options: CompletionOptions,
    history_limit: usize,
}

impl ChatService {
    pub fn new(
        db: Arc<dyn DatabaseBackend>,
        llm: Arc<dyn ChatCompletion>,
        options: CompletionOptions,
        config: &ChatConfig,
    ) -> Self {
        Self {
            db,
            llm,
            options,
            history_limit: config.history_limit,
        }
    }

    /// Answer one chat message.
    ///
    /// Store reads and history writes are best-effort; only a failed model
    /// call or an unsupported page context fails the request.
    pub async fn process_chat(&self, input: ChatInput) -> Result<ChatOutcome> {
        let ChatInput {
            user_id,
            message,
            context,
            session_id,
        } = input;
        let session_id = session_id.filter(|id| !id.trim().is_empty());

        let preferences = self.load_preferences(&user_id).await;

        let context_block = match &context {
            Some(context) => context.render()?,
            None => String::new(),
        };

        let system_prompt = compose_system_prompt(&preferences, &context_block);

        let history = match &session_id {
            Some(session_id) => self.recent_history(session_id).await,
            None => Vec::new(),
        };

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(message.clone()));

        tracing::debug!(
            user_id = %user_id,
            history_turns = history.len(),
            context_chars = context_block.len(),
            "Calling chat model"
        );

        let reply = self
            .llm
            .complete_chat(&messages, &self.options)
            .await
            .map_err(|e| CompanionError::ModelInvocation(e.to_string()))?;

        let extraction = extract_filter_directive(&reply);

        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let user_turn = ConversationTurn::new(&session_id, &user_id, TurnRole::User, message);
        let assistant_turn = ConversationTurn::new(
            &session_id,
            &user_id,
            TurnRole::Assistant,
            extraction.clean_text.clone(),
        );

        let persistence = PersistenceReport {
            user_turn: self.store_turn(&user_turn).await,
            assistant_turn: self.store_turn(&assistant_turn).await,
        };

        Ok(ChatOutcome {
            response: extraction.clean_text,
            session_id,
            timestamp: Utc::now(),
            directive: extraction.outcome,
            persistence,
        })
    }

    /// Every stored turn of a session, oldest first.
    pub async fn session_history(&self, session_id: &str) -> Result<Vec<ConversationTurn>> {
        self.db.get_session_turns(session_id).await
    }

    async fn load_preferences(&self, user_id: &str) -> UserPreferences {
        match self.db.get_preferences(user_id).await {
            Ok(Some(preferences)) => preferences,
            Ok(None) => UserPreferences::default_for(user_id),
            Err(error) => {
                tracing::warn!(user_id = %user_id, error = %error, "Failed to load preferences, using defaults");
                UserPreferences::default_for(user_id)
            }
        }
    }

    /// The most recent `history_limit` turns, oldest first.
    async fn recent_history(&self, session_id: &str) -> Vec<ConversationTurn> {
        match self.db.get_session_turns(session_id).await {
            Ok(mut turns) => {
                let excess = turns.len().saturating_sub(self.history_limit);
                turns.drain(..excess);
                turns
            }
            Err(error) => {
                tracing::warn!(session_id = %session_id, error = %error, "Failed to load history, continuing without it");
                Vec::new()
            }
        }
    }

    async fn store_turn(&self, turn: &ConversationTurn) -> TurnPersistence {
        match self.db.append_turn(turn).await {
            Ok(()) => TurnPersistence::Stored,
            Err(error) => {
                tracing::warn!(
                    session_id = %turn.session_id,
                    role = %turn.role,
                    error = %error,
                    "Failed to store chat turn"
                );
                TurnPersistence::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }
}
