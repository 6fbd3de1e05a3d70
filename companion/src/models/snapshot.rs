use serde::{Deserialize, Serialize};
use validator::Validate;

/// Name shown for a product the client sent without one.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";

/// One product as seen by the client at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct ProductSnapshotEntry {
    /// Product ID, used for `#product-id` links in replies.
    #[validate(length(min = 1, message = "product id cannot be empty"))]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: Option<f64>,
    /// Percentage, 0–100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0, message = "discount must be between 0 and 100"))]
    pub discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProductSnapshotEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            category: None,
            price: None,
            discount: None,
            description: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PRODUCT_NAME)
    }
}

/// Client-side view of the product grid split into visibility tiers.
///
/// Tier membership is decided by the client; nothing here re-derives it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct DomSnapshot {
    #[serde(default)]
    #[validate(nested)]
    pub visible_products: Vec<ProductSnapshotEntry>,
    #[serde(default)]
    #[validate(nested)]
    pub above_fold_products: Vec<ProductSnapshotEntry>,
    #[serde(default)]
    #[validate(nested)]
    pub below_fold_products: Vec<ProductSnapshotEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

impl DomSnapshot {
    pub fn total_products(&self) -> usize {
        self.visible_products.len() + self.above_fold_products.len() + self.below_fold_products.len()
    }
}
