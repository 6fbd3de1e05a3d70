// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use tempfile::TempDir;

use companion::config::{ChatConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig};
use companion::db::{
    ConversationStore, Database, DatabaseBackend, LibSqlBackend, PreferenceStore,
};
use companion::error::{CompanionError, Result};
use companion::llm::{ChatCompletion, CompletionOptions};
use companion::models::{ChatMessage, ConversationTurn, UserPreferences};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Fresh on-disk database inside a temp dir. Keep the `TempDir` alive.
pub async fn temp_backend() -> (TempDir, Arc<LibSqlBackend>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("file:{}", dir.path().join("companion.db").display());
    let db = Database::new(&DatabaseConfig::with_url(url))
        .await
        .expect("database opens");
    (dir, Arc::new(LibSqlBackend::new(db)))
}

pub fn test_config(database_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig::with_url(database_url),
        chat: ChatConfig::default(),
        logging: LoggingConfig::default(),
        llm: None,
    }
}

/// Chat model that answers from a script and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedModel {
    pub fn replying(replies: &[&str]) -> Arc<Self> {
        let model = Self::default();
        {
            let mut queue = model.replies.lock().unwrap();
            queue.extend(replies.iter().map(|r| Ok(r.to_string())));
        }
        Arc::new(model)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let model = Self::default();
        model
            .replies
            .lock()
            .unwrap()
            .push_back(Err(CompanionError::Llm(message.to_string())));
        Arc::new(model)
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Vec<ChatMessage> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("model was called")
    }
}

#[async_trait]
impl ChatCompletion for ScriptedModel {
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Happy to help! 👟".to_string()))
    }
}

/// Backend wrapper that can be told to fail reads or writes.
pub struct FlakyStore {
    inner: Arc<LibSqlBackend>,
    pub fail_reads: AtomicBool,
    pub fail_appends: AtomicBool,
    pub fail_upserts: AtomicBool,
    pub fail_sync: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: Arc<LibSqlBackend>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_appends: AtomicBool::new(false),
            fail_upserts: AtomicBool::new(false),
            fail_sync: AtomicBool::new(false),
        })
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(CompanionError::Internal(format!("{what} unavailable")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PreferenceStore for FlakyStore {
    async fn get_preferences(&self, user_id: &str) -> Result<Option<UserPreferences>> {
        Self::check(&self.fail_reads, "preference store")?;
        self.inner.get_preferences(user_id).await
    }

    async fn upsert_preferences(&self, preferences: &UserPreferences) -> Result<()> {
        Self::check(&self.fail_upserts, "preference store")?;
        self.inner.upsert_preferences(preferences).await
    }
}

#[async_trait]
impl ConversationStore for FlakyStore {
    async fn append_turn(&self, turn: &ConversationTurn) -> Result<()> {
        Self::check(&self.fail_appends, "history store")?;
        self.inner.append_turn(turn).await
    }

    async fn get_session_turns(&self, session_id: &str) -> Result<Vec<ConversationTurn>> {
        Self::check(&self.fail_reads, "history store")?;
        self.inner.get_session_turns(session_id).await
    }
}

#[async_trait]
impl DatabaseBackend for FlakyStore {
    async fn sync(&self) -> Result<()> {
        Self::check(&self.fail_sync, "replica")?;
        self.inner.sync().await
    }
}

pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}
