use serde::{Deserialize, Serialize};

/// Per-user shopping preferences, keyed by `user_id`.
///
/// A record that has never been written reads back as [`UserPreferences::default_for`];
/// that default is synthesized and only persisted by an explicit update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub user_id: String,
    pub is_b2b: bool,
    pub preferred_categories: Vec<String>,
    pub hidden_categories: Vec<String>,
}

impl UserPreferences {
    pub fn default_for(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_b2b: false,
            preferred_categories: Vec::new(),
            hidden_categories: Vec::new(),
        }
    }

    pub fn customer_type_label(&self) -> &'static str {
        if self.is_b2b {
            "B2B business customer"
        } else {
            "individual retail customer"
        }
    }
}
