use serde::{Deserialize, Serialize};

/// A shopping result reshaped for rendering as a product card.
///
/// Built per search and discarded after render; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProduct {
    /// Zero-based position within the batch it came from. Not stable across
    /// searches.
    pub id: usize,
    pub name: String,
    /// Thumbnail URL; empty when the provider sent none.
    pub image: String,
    pub price: f64,
    /// Provider's pre-sale price, or `price * 1.1` when it sent none.
    pub original_price: f64,
    pub seller: String,
    pub rating: f64,
    /// Review count as display text, e.g. `"1000"` or `"100+"`.
    pub reviews: String,
    pub delivery: String,
    /// `round(original_price - price)`.
    pub savings: i64,
}

impl NormalizedProduct {
    /// Discount shown on the card badge: `round(savings / original_price * 100)`.
    ///
    /// Returns `0` when `original_price` is not positive.
    #[must_use]
    pub fn savings_percent(&self) -> i64 {
        if self.original_price <= 0.0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss)]
        let savings = self.savings as f64;
        round_half_up(savings / self.original_price * 100.0)
    }
}

/// Rounds to the nearest integer with halves going toward positive infinity,
/// so `-0.5` rounds to `0` and `2.5` rounds to `3`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, original_price: f64, savings: i64) -> NormalizedProduct {
        NormalizedProduct {
            id: 0,
            name: "Sony WH-1000XM5".to_string(),
            image: String::new(),
            price,
            original_price,
            seller: "Amazon".to_string(),
            rating: 4.8,
            reviews: "2.4K".to_string(),
            delivery: "2-day free".to_string(),
            savings,
        }
    }

    #[test]
    fn round_half_up_matches_expected_rounding() {
        assert_eq!(round_half_up(99.9), 100);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4), 2);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn savings_percent_rounds_ratio() {
        // 100 / 1098.9 = 9.1%
        assert_eq!(product(999.0, 1098.9, 100).savings_percent(), 9);
        // 51 / 399 = 12.78%
        assert_eq!(product(348.0, 399.0, 51).savings_percent(), 13);
    }

    #[test]
    fn savings_percent_is_zero_without_original_price() {
        assert_eq!(product(0.0, 0.0, 0).savings_percent(), 0);
    }

    #[test]
    fn serializes_with_camel_case_original_price() {
        let json = serde_json::to_value(product(999.0, 1099.0, 100)).expect("serialize");
        assert_eq!(json["originalPrice"].as_f64(), Some(1099.0));
        assert_eq!(json["savings"].as_i64(), Some(100));
        assert!(json.get("original_price").is_none());
    }
}
