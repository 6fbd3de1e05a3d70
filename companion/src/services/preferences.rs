use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::error::{CompanionError, Result};
use crate::models::UserPreferences;

pub struct PreferencesService {
    db: Arc<dyn DatabaseBackend>,
}

impl PreferencesService {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    /// Stored preferences, or the synthesized default when none exist.
    ///
    /// The default is not written back.
    pub async fn get(&self, user_id: &str) -> Result<UserPreferences> {
        let stored = self.db.get_preferences(user_id).await?;
        Ok(stored.unwrap_or_else(|| UserPreferences::default_for(user_id)))
    }

    /// Replace the whole record for `preferences.user_id` and echo it back.
    pub async fn update(&self, preferences: UserPreferences) -> Result<UserPreferences> {
        if preferences.user_id.trim().is_empty() {
            return Err(CompanionError::Validation(
                "user_id cannot be empty".to_string(),
            ));
        }

        self.db.upsert_preferences(&preferences).await?;

        tracing::info!(
            user_id = %preferences.user_id,
            is_b2b = preferences.is_b2b,
            preferred = preferences.preferred_categories.len(),
            hidden = preferences.hidden_categories.len(),
            "Preferences updated"
        );

        Ok(preferences)
    }
}
