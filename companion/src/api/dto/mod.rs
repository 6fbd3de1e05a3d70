//! Wire types for the HTTP API.
//!
//! Field names follow what existing browser clients send and read, so most
//! of these are snake_case while a few preference fields keep `userId`.

pub mod chat;
pub mod history;
pub mod preferences;

pub use chat::*;
pub use history::*;
pub use preferences::*;
