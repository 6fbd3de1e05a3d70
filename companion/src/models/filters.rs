use serde::{Deserialize, Serialize};

/// Category values the assistant is told it may put in a filter block.
pub const PRODUCT_CATEGORIES: &[&str] = &["formal", "athletic", "casual", "outdoor", "work"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    All,
    B2b,
    B2c,
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::B2b => write!(f, "b2b"),
            Self::B2c => write!(f, "b2c"),
        }
    }
}

impl std::str::FromStr for CustomerType {
    type Err = String;

    /// Exact match only; model output such as `"B2B"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "b2b" => Ok(Self::B2b),
            "b2c" => Ok(Self::B2c),
            _ => Err(format!("Unknown customer type: {s}")),
        }
    }
}

/// Structured product-filter intent recovered from a model reply.
///
/// Every field is independent; `None` means "no constraint", never "false".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FilterDirective {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_discount: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<CustomerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl FilterDirective {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
