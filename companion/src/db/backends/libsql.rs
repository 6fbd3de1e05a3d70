use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{PreferencesRepository, TurnRepository};
use crate::db::traits::{ConversationStore, DatabaseBackend, PreferenceStore};
use crate::error::Result;
use crate::models::{ConversationTurn, UserPreferences};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PreferenceStore for LibSqlBackend {
    async fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        let conn = self.db.connect()?;
        PreferencesRepository::get(&conn, user_id).await
    }

    async fn upsert_preferences(&self, preferences: &UserPreferences) -> Result<()> {
        let conn = self.db.connect()?;
        PreferencesRepository::upsert(&conn, preferences).await
    }
}

#[async_trait]
impl ConversationStore for LibSqlBackend {
    async fn append_turn(&self, turn: &ConversationTurn) -> Result<()> {
        let conn = self.db.connect()?;
        TurnRepository::create(&conn, turn).await
    }

    async fn get_session_turns(&self, session_id: &str) -> Result<Vec<ConversationTurn>> {
        let conn = self.db.connect()?;
        TurnRepository::get_by_session(&conn, session_id).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}
