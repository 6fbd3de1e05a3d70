mod chat;
mod preferences;

pub use chat::{ChatInput, ChatOutcome, ChatService, PersistenceReport, TurnPersistence};
pub use preferences::PreferencesService;
