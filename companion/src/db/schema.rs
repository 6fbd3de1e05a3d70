use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- One row per stored chat message
        CREATE TABLE IF NOT EXISTS chat_sessions (
            id TEXT PRIMARY KEY,
            session_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_chat_sessions_session_ts
            ON chat_sessions(session_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_chat_sessions_user_id ON chat_sessions(user_id);

        -- One record per user, replaced wholesale on update
        CREATE TABLE IF NOT EXISTS preferences (
            user_id TEXT PRIMARY KEY,
            is_b2b INTEGER NOT NULL DEFAULT 0,
            preferred_categories TEXT NOT NULL DEFAULT '[]',
            hidden_categories TEXT NOT NULL DEFAULT '[]',
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .await?;

    Ok(())
}
