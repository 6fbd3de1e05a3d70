use serde::{Deserialize, Serialize};

use crate::models::UserPreferences;

/// Request body for `POST /preferences/{user_id}`.
///
/// The whole record is replaced; omitted fields reset to their defaults.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct PreferencesRequest {
    #[serde(default)]
    pub is_b2b: bool,
    #[serde(default)]
    pub preferred_categories: Vec<String>,
    #[serde(default)]
    pub hidden_categories: Vec<String>,
}

impl PreferencesRequest {
    pub fn into_preferences(self, user_id: &str) -> UserPreferences {
        UserPreferences {
            user_id: user_id.to_string(),
            is_b2b: self.is_b2b,
            preferred_categories: self.preferred_categories,
            hidden_categories: self.hidden_categories,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PreferencesResponse {
    /// Record id; always equal to the user id.
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub is_b2b: bool,
    pub preferred_categories: Vec<String>,
    pub hidden_categories: Vec<String>,
}

impl From<UserPreferences> for PreferencesResponse {
    fn from(prefs: UserPreferences) -> Self {
        Self {
            id: prefs.user_id.clone(),
            user_id: prefs.user_id,
            is_b2b: prefs.is_b2b,
            preferred_categories: prefs.preferred_categories,
            hidden_categories: prefs.hidden_categories,
        }
    }
}
