//! Cart line items embedded in the user record
//!
//! A cart is an ordered list of line items, each a snapshot of a catalog
//! product taken at add-to-cart time. The client always sends the full cart
//! as a replacement array; the server normalizes it before persisting.

use serde::{Deserialize, Serialize};

/// A single cart line: product reference plus denormalized product fields
/// snapshotted when the item was added.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product reference id
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub quantity: i64,
}

/// Normalize an incoming cart replacement array.
///
/// Duplicate product ids are merged by summing quantities into the
/// first-seen line (its snapshot fields win), and lines whose merged
/// quantity ends up below 1 are dropped. Original line order is preserved.
pub fn normalize_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());

    for line in lines {
        match merged.iter_mut().find(|existing| existing.id == line.id) {
            // Saturate rather than wrap; client-supplied quantities are
            // unbounded JSON numbers.
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line),
        }
    }

    merged.retain(|line| line.quantity >= 1);
    merged
}

/// Sum of price times quantity across all lines.
pub fn cart_total(lines: &[CartLine]) -> f64 {
    lines
        .iter()
        .map(|line| line.price * line.quantity as f64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: f64, quantity: i64) -> CartLine {
        CartLine {
            id: id.to_string(),
            name: format!("Product {}", id),
            price,
            image: String::new(),
            description: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_normalize_merges_duplicate_ids() {
        let lines = vec![line("a", 150.0, 1), line("b", 180.0, 2), line("a", 150.0, 3)];
        let normalized = normalize_lines(lines);

        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].id, "a");
        assert_eq!(normalized[0].quantity, 4);
        assert_eq!(normalized[1].id, "b");
        assert_eq!(normalized[1].quantity, 2);
    }

    #[test]
    fn test_normalize_drops_zero_quantity_lines() {
        let lines = vec![line("a", 150.0, 0), line("b", 180.0, 1), line("c", 200.0, -2)];
        let normalized = normalize_lines(lines);

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].id, "b");
    }

    #[test]
    fn test_normalize_drops_line_merged_to_zero() {
        let lines = vec![line("a", 150.0, 2), line("a", 150.0, -2)];
        let normalized = normalize_lines(lines);
        assert!(normalized.is_empty());
    }

    #[test]
    fn test_normalize_saturates_instead_of_overflowing() {
        let lines = vec![line("a", 1.0, i64::MAX), line("a", 1.0, 2)];
        let normalized = normalize_lines(lines);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].quantity, i64::MAX);

        let lines = vec![line("b", 1.0, i64::MIN), line("b", 1.0, -2)];
        assert!(normalize_lines(lines).is_empty());
    }

    #[test]
    fn test_normalize_preserves_order() {
        let lines = vec![line("c", 1.0, 1), line("a", 1.0, 1), line("b", 1.0, 1)];
        let ids: Vec<String> = normalize_lines(lines).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_cart_total() {
        let lines = vec![line("a", 150.0, 2), line("b", 180.5, 1)];
        assert!((cart_total(&lines) - 480.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cart_total_empty() {
        assert_eq!(cart_total(&[]), 0.0);
    }
}
