use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{params, Connection};

use crate::error::{CompanionError, Result};
use crate::models::{ConversationTurn, TurnRole};

pub struct TurnRepository;

impl TurnRepository {
    pub async fn create(conn: &Connection, turn: &ConversationTurn) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO chat_sessions (
                id, session_id, user_id, role, content, timestamp
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6
            )
            "#,
            params![
                turn.id.clone(),
                turn.session_id.clone(),
                turn.user_id.clone(),
                turn.role.to_string(),
                turn.content.clone(),
                turn.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn get_by_session(
        conn: &Connection,
        session_id: &str,
    ) -> Result<Vec<ConversationTurn>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, session_id, user_id, role, content, timestamp
                FROM chat_sessions
                WHERE session_id = ?1
                ORDER BY timestamp ASC, rowid ASC
                "#,
                params![session_id],
            )
            .await?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_turn(&row)?);
        }

        Ok(results)
    }

    fn row_to_turn(row: &libsql::Row) -> Result<ConversationTurn> {
        let role: String = row.get(3)?;

        Ok(ConversationTurn {
            id: row.get(0)?,
            session_id: row.get(1)?,
            user_id: row.get(2)?,
            role: role
                .parse::<TurnRole>()
                .map_err(CompanionError::Internal)?,
            content: row.get(4)?,
            timestamp: DateTime::parse_from_rfc3339(&row.get::<String>(5)?)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
