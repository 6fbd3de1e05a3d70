use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ConversationTurn, UserPreferences};

/// Per-user preference records.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// `None` when the user has never saved preferences.
    async fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>>;

    /// Replace the whole record for `preferences.user_id`. Last writer wins.
    async fn upsert_preferences(&self, preferences: &UserPreferences) -> Result<()>;
}

/// Append-only chat history.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append_turn(&self, turn: &ConversationTurn) -> Result<()>;

    /// All turns of a session, oldest first.
    async fn get_session_turns(&self, session_id: &str) -> Result<Vec<ConversationTurn>>;
}

/// Composite trait covering every store the service uses.
#[async_trait]
pub trait DatabaseBackend: PreferenceStore + ConversationStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}
