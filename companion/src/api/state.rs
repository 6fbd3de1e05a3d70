use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::llm::{ChatCompletion, CompletionOptions, LlmProvider};
use crate::services::{ChatService, PreferencesService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub chat: Arc<ChatService>,
    pub preferences: Arc<PreferencesService>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>, llm: LlmProvider) -> Self {
        let options = llm.completion_options();
        Self::with_chat_model(config, db, Arc::new(llm), options)
    }

    /// Build state around any chat model, e.g. a scripted one in tests.
    pub fn with_chat_model(
        config: Config,
        db: Arc<dyn DatabaseBackend>,
        model: Arc<dyn ChatCompletion>,
        options: CompletionOptions,
    ) -> Self {
        let config = Arc::new(config);
        let chat = ChatService::new(db.clone(), model, options, &config.chat);
        let preferences = PreferencesService::new(db.clone());

        Self {
            config,
            db,
            chat: Arc::new(chat),
            preferences: Arc::new(preferences),
        }
    }
}
