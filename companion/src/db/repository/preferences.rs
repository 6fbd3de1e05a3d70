use chrono::Utc;
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::UserPreferences;

pub struct PreferencesRepository;

impl PreferencesRepository {
    pub async fn get(conn: &Connection, user_id: &str) -> Result<Option<UserPreferences>> {
        let mut rows = conn
            .query(
                r#"
                SELECT user_id, is_b2b, preferred_categories, hidden_categories
                FROM preferences
                WHERE user_id = ?1
                "#,
                params![user_id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::row_to_preferences(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert or fully replace the record for `preferences.user_id`.
    pub async fn upsert(conn: &Connection, preferences: &UserPreferences) -> Result<()> {
        let preferred = serde_json::to_string(&preferences.preferred_categories)?;
        let hidden = serde_json::to_string(&preferences.hidden_categories)?;

        conn.execute(
            r#"
            INSERT INTO preferences (
                user_id, is_b2b, preferred_categories, hidden_categories, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5
            )
            ON CONFLICT(user_id) DO UPDATE SET
                is_b2b = excluded.is_b2b,
                preferred_categories = excluded.preferred_categories,
                hidden_categories = excluded.hidden_categories,
                updated_at = excluded.updated_at
            "#,
            params![
                preferences.user_id.clone(),
                preferences.is_b2b as i32,
                preferred,
                hidden,
                Utc::now().to_rfc3339(),
            ],
        )
        .await?;

        Ok(())
    }

    fn row_to_preferences(row: &libsql::Row) -> Result<UserPreferences> {
        let preferred: String = row.get(2)?;
        let hidden: String = row.get(3)?;

        Ok(UserPreferences {
            user_id: row.get(0)?,
            is_b2b: row.get::<i32>(1)? != 0,
            preferred_categories: serde_json::from_str(&preferred).unwrap_or_default(),
            hidden_categories: serde_json::from_str(&hidden).unwrap_or_default(),
        })
    }
}
