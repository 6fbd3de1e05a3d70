//! Text rendering of a [`DomSnapshot`] for the system prompt.
//!
//! The output is a pure function of the snapshot: no model calls, no clock,
//! identical input always produces identical text.

use crate::models::{DomSnapshot, ProductSnapshotEntry};

const VISIBLE_HEADER: &str = "🔍 VISIBLE PRODUCTS (currently on screen):";
const VISIBLE_NONE: &str = "🔍 VISIBLE PRODUCTS: None currently on screen.";
const UNKNOWN_PAGE: &str = "Unknown";

/// Render the snapshot as a tiered product listing.
///
/// Tiers are emitted in a fixed order: visible, above the fold, below the fold.
/// An empty visible tier still yields a sentinel line; empty above/below tiers
/// are omitted entirely.
pub fn render_dom_snapshot(snapshot: &DomSnapshot) -> String {
    let visible = &snapshot.visible_products;
    let above = &snapshot.above_fold_products;
    let below = &snapshot.below_fold_products;

    let page_url = snapshot
        .page_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(UNKNOWN_PAGE);

    let mut lines = vec![
        format!("User is browsing page: {page_url}"),
        format!(
            "Total products tracked: {} (Visible: {}, Above fold: {}, Below fold: {})",
            snapshot.total_products(),
            visible.len(),
            above.len(),
            below.len()
        ),
    ];

    if visible.is_empty() {
        lines.push(format!("\n{VISIBLE_NONE}"));
    } else {
        lines.push(format!("\n{VISIBLE_HEADER}"));
        push_products(&mut lines, visible);
    }

    if !above.is_empty() {
        lines.push(format!(
            "\n⬆️ ABOVE THE FOLD ({} products - user scrolled past these):",
            above.len()
        ));
        push_products(&mut lines, above);
    }

    if !below.is_empty() {
        lines.push(format!(
            "\n⬇️ BELOW THE FOLD ({} products - require scrolling down):",
            below.len()
        ));
        push_products(&mut lines, below);
    }

    lines.join("\n")
}

fn push_products(lines: &mut Vec<String>, products: &[ProductSnapshotEntry]) {
    lines.extend(
        products
            .iter()
            .enumerate()
            .map(|(idx, product)| product_line(idx + 1, product)),
    );
}

/// `"{index}. {name} (ID: {id})"` followed by the optional fields that are set.
fn product_line(index: usize, product: &ProductSnapshotEntry) -> String {
    let mut parts = vec![format!(
        "{index}. {} (ID: {})",
        product.display_name(),
        product.id
    )];

    if let Some(category) = non_blank(product.category.as_deref()) {
        parts.push(format!("Category: {category}"));
    }

    if let Some(price) = product.price {
        parts.push(format!("Price: ${price:.2}"));
    }

    // A zero discount is not a discount.
    if let Some(discount) = product.discount.filter(|d| *d > 0.0) {
        parts.push(format!("Discount: {discount}% off"));
    }

    if let Some(description) = non_blank(product.description.as_deref()) {
        parts.push(format!("Description: {description}"));
    }

    parts.join(" | ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
