//! Recovery of the ```` ```filters ```` block a model may embed in its reply.
//!
//! Parsing is lenient: a malformed block is reported as a soft outcome and
//! never fails the request. The user-facing text always has the block removed.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{CustomerType, FilterDirective};

/// Category values that mean "no category constraint".
const EMPTY_CATEGORY_MARKERS: &[&str] = &["", "empty", "null"];

fn block_capture_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```filters\s*\n(.*?)\n```").expect("valid filters block pattern")
    })
}

fn block_strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```filters\s*\n.*?\n```\s*").expect("valid filters strip pattern")
    })
}

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank line pattern"))
}

/// What the parser made of the reply's filter block.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveOutcome {
    /// A block was present and at least one field survived validation.
    Found(FilterDirective),
    /// The reply carried no filter block.
    NotPresent,
    /// A block was present but its body was not a JSON object.
    Malformed { reason: String },
    /// A block was present and valid JSON, but no field survived validation.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveExtraction {
    pub clean_text: String,
    pub outcome: DirectiveOutcome,
}

impl DirectiveExtraction {
    pub fn directive(&self) -> Option<&FilterDirective> {
        match &self.outcome {
            DirectiveOutcome::Found(directive) => Some(directive),
            _ => None,
        }
    }

    pub fn into_directive(self) -> Option<FilterDirective> {
        match self.outcome {
            DirectiveOutcome::Found(directive) => Some(directive),
            _ => None,
        }
    }
}

/// Split a raw model reply into user-facing text and an optional filter directive.
///
/// Only the first ```` ```filters ```` block is parsed, but every such block is
/// stripped from the text. A reply without a block is returned untouched.
pub fn extract_filter_directive(reply: &str) -> DirectiveExtraction {
    let Some(captures) = block_capture_regex().captures(reply) else {
        return DirectiveExtraction {
            clean_text: reply.to_string(),
            outcome: DirectiveOutcome::NotPresent,
        };
    };

    let body = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

    let outcome = match parse_block(body) {
        Ok(directive) if directive.is_empty() => {
            tracing::debug!("Filter block contained no usable fields");
            DirectiveOutcome::Empty
        }
        Ok(directive) => DirectiveOutcome::Found(directive),
        Err(reason) => {
            tracing::warn!(reason = %reason, "Ignoring malformed filter block");
            DirectiveOutcome::Malformed { reason }
        }
    };

    DirectiveExtraction {
        clean_text: strip_filter_blocks(reply),
        outcome,
    }
}

fn strip_filter_blocks(reply: &str) -> String {
    let stripped = block_strip_regex().replace_all(reply, "");
    let collapsed = blank_run_regex().replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}

fn parse_block(body: &str) -> std::result::Result<FilterDirective, String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("invalid filter JSON: {e}"))?;

    let Value::Object(fields) = value else {
        return Err("filter block is not a JSON object".to_string());
    };

    Ok(FilterDirective {
        category: category_field(&fields),
        min_price: number_field(&fields, "min_price"),
        max_price: number_field(&fields, "max_price"),
        has_discount: bool_field(&fields, "has_discount"),
        min_discount: number_field(&fields, "min_discount"),
        customer_type: customer_type_field(&fields),
        in_stock: bool_field(&fields, "in_stock"),
    })
}

fn category_field(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("category") {
        Some(Value::String(category)) if !EMPTY_CATEGORY_MARKERS.contains(&category.as_str()) => {
            Some(category.clone())
        }
        _ => None,
    }
}

/// Numbers, numeric strings and booleans (as 1 or 0) are accepted; anything
/// else is dropped.
fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let number = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;

    number.is_finite().then_some(number)
}

/// Truthiness of the JSON value; `null` means the field is unset.
fn bool_field(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(items) => Some(!items.is_empty()),
        Value::Object(map) => Some(!map.is_empty()),
    }
}

fn customer_type_field(fields: &Map<String, Value>) -> Option<CustomerType> {
    fields.get("customer_type")?.as_str()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extracts_directive_and_cleans_text() {
        let reply = "Here are some shoes.\n```filters\n{\"category\":\"casual\",\"min_price\":50}\n```\n";
        let extraction = extract_filter_directive(reply);

        assert_eq!(extraction.clean_text, "Here are some shoes.");
        assert_eq!(
            extraction.directive(),
            Some(&FilterDirective {
                category: Some("casual".to_string()),
                min_price: Some(50.0),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_reply_without_block_is_untouched() {
        let reply = "  Nothing to filter here.\n\n\n\nJust chatting.  ";
        let extraction = extract_filter_directive(reply);

        assert_eq!(extraction.clean_text, reply);
        assert_eq!(extraction.outcome, DirectiveOutcome::NotPresent);
        assert!(extraction.directive().is_none());
    }

    #[test]
    fn test_athletic_category_is_kept() {
        let reply = "## 👟 Athletic picks\n\n```filters\n{\"category\": \"athletic\"}\n```\n\nEnjoy!";
        let extraction = extract_filter_directive(reply);

        assert_eq!(
            extraction.directive().and_then(|d| d.category.as_deref()),
            Some("athletic")
        );
        assert!(!extraction.clean_text.contains("```"));
        assert_eq!(extraction.clean_text, "## 👟 Athletic picks\n\nEnjoy!");
    }

    #[test]
    fn test_invalid_json_degrades_to_no_directive() {
        let reply = "Some shoes.\n```filters\n{category: casual,\n```\nMore text.";
        let extraction = extract_filter_directive(reply);

        assert!(matches!(
            extraction.outcome,
            DirectiveOutcome::Malformed { .. }
        ));
        assert!(extraction.directive().is_none());
        assert_eq!(extraction.clean_text, "Some shoes.\nMore text.");
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        let extraction = extract_filter_directive("```filters\n[1, 2]\n```");
        assert!(matches!(
            extraction.outcome,
            DirectiveOutcome::Malformed { .. }
        ));
        assert_eq!(extraction.clean_text, "");
    }

    #[test]
    fn test_empty_category_markers_are_dropped() {
        for marker in ["empty", "null", ""] {
            let reply =
                format!("ok\n```filters\n{{\"category\": \"{marker}\", \"in_stock\": true}}\n```");
            let extraction = extract_filter_directive(&reply);
            let directive = extraction.directive().expect("in_stock survives");

            assert_eq!(directive.category, None);
            assert_eq!(directive.in_stock, Some(true));
        }
    }

    #[test]
    fn test_non_numeric_price_is_dropped_not_zeroed() {
        let reply = "ok\n```filters\n{\"min_price\": \"abc\", \"max_price\": \"150\", \"min_discount\": 20}\n```";
        let directive = extract_filter_directive(reply)
            .into_directive()
            .expect("directive");

        assert_eq!(directive.min_price, None);
        assert_eq!(directive.max_price, Some(150.0));
        assert_eq!(directive.min_discount, Some(20.0));
    }

    #[test]
    fn test_boolean_numbers_coerce_to_one_and_zero() {
        let reply = "ok\n```filters\n{\"min_price\": true, \"max_price\": false, \"min_discount\": null}\n```";
        let directive = extract_filter_directive(reply)
            .into_directive()
            .expect("directive");

        assert_eq!(directive.min_price, Some(1.0));
        assert_eq!(directive.max_price, Some(0.0));
        assert_eq!(directive.min_discount, None);
    }

    #[test]
    fn test_customer_type_requires_exact_value() {
        let reply = "ok\n```filters\n{\"customer_type\": \"B2B\", \"has_discount\": true}\n```";
        let directive = extract_filter_directive(reply)
            .into_directive()
            .expect("directive");

        assert_eq!(directive.customer_type, None);
        assert_eq!(directive.has_discount, Some(true));

        let reply = "ok\n```filters\n{\"customer_type\": \"b2c\"}\n```";
        let directive = extract_filter_directive(reply)
            .into_directive()
            .expect("directive");
        assert_eq!(directive.customer_type, Some(CustomerType::B2c));
    }

    #[test]
    fn test_booleans_use_truthiness_and_null_is_unset() {
        let reply = "ok\n```filters\n{\"has_discount\": 0, \"in_stock\": null, \"mood\": \"happy\"}\n```";
        let directive = extract_filter_directive(reply)
            .into_directive()
            .expect("directive");

        assert_eq!(directive.has_discount, Some(false));
        assert_eq!(directive.in_stock, None);
    }

    #[test]
    fn test_block_with_no_surviving_fields_is_empty() {
        let reply = "Sure!\n\n```filters\n{\"category\": \"empty\", \"customer_type\": \"everyone\"}\n```";
        let extraction = extract_filter_directive(reply);

        assert_eq!(extraction.outcome, DirectiveOutcome::Empty);
        assert!(extraction.directive().is_none());
        assert_eq!(extraction.clean_text, "Sure!");
    }

    #[test]
    fn test_every_block_is_stripped_but_first_is_parsed() {
        let reply = "A\n```filters\n{\"category\": \"formal\"}\n```\n\n\n\nB\n```filters\n{\"category\": \"work\"}\n```\nC";
        let extraction = extract_filter_directive(reply);

        assert_eq!(
            extraction.directive().and_then(|d| d.category.as_deref()),
            Some("formal")
        );
        assert_eq!(extraction.clean_text, "A\nB\nC");
    }
}
