use libsql::{Builder, Connection};
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::Result;

use super::schema;

#[derive(Clone)]
pub struct Database {
    pub(crate) db: Arc<libsql::Database>,
    is_remote: bool,
    is_replica: bool,
    busy_timeout_ms: u64,
    journal_mode: &'static str,
    synchronous: &'static str,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let is_remote = config.url.starts_with("libsql://") || config.url.starts_with("https://");
        let is_replica = is_remote && config.local_path.is_some();

        let db = if is_remote {
            if let Some(ref local_path) = config.local_path {
                Builder::new_remote_replica(
                    local_path,
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            } else {
                Builder::new_remote(
                    config.url.clone(),
                    config.auth_token.clone().unwrap_or_default(),
                )
                .build()
                .await?
            }
        } else {
            let path = config.url.strip_prefix("file:").unwrap_or(&config.url);
            Builder::new_local(path).build().await?
        };

        let database = Self {
            db: Arc::new(db),
            is_remote,
            is_replica,
            busy_timeout_ms: config.busy_timeout_ms,
            journal_mode: normalize_journal_mode(&config.journal_mode),
            synchronous: normalize_synchronous(&config.synchronous),
        };

        if !database.is_remote {
            database.configure_pragmas().await?;
        }
        database.init_schema().await?;

        tracing::info!(url = %config.url, remote = is_remote, "Database ready");

        Ok(database)
    }

    pub fn connect(&self) -> Result<Connection> {
        Ok(self.db.connect()?)
    }

    async fn configure_pragmas(&self) -> Result<()> {
        let conn = self.connect()?;

        let pragmas = [
            ("busy_timeout", self.busy_timeout_ms.to_string()),
            ("journal_mode", self.journal_mode.to_string()),
            ("synchronous", self.synchronous.to_string()),
        ];

        for (name, value) in pragmas {
            let sql = format!("PRAGMA {name} = {value}");
            if let Err(error) = conn.execute_batch(&sql).await {
                tracing::warn!(pragma = name, value = %value, error = %error, "Failed to set SQLite pragma");
            }
        }

        Ok(())
    }

    async fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        schema::init_schema(&conn).await
    }

    /// Pull remote changes into an embedded replica. No-op for local files
    /// and plain remote connections.
    pub async fn sync(&self) -> Result<()> {
        if !self.is_replica {
            return Ok(());
        }

        let replicated = self.db.sync().await?;
        tracing::debug!("Database synced: {:?}", replicated);
        Ok(())
    }
}

fn normalize_journal_mode(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "DELETE" => "DELETE",
        "TRUNCATE" => "TRUNCATE",
        "PERSIST" => "PERSIST",
        "MEMORY" => "MEMORY",
        "OFF" => "OFF",
        _ => "WAL",
    }
}

fn normalize_synchronous(value: &str) -> &'static str {
    match value.trim().to_uppercase().as_str() {
        "OFF" => "OFF",
        "FULL" => "FULL",
        "EXTRA" => "EXTRA",
        _ => "NORMAL",
    }
}
