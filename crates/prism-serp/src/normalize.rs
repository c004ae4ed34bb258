//! Normalization from provider results to [`prism_core::NormalizedProduct`].
//!
//! The mapping is total: any [`UpstreamResult`], however sparse, produces a
//! product. Missing fields fall back to the named defaults below.

use prism_core::{round_half_up, NormalizedProduct};
use serde_json::Value;

use crate::types::{shopping_results, UpstreamResult};

pub const DEFAULT_RATING: f64 = 4.5;
pub const DEFAULT_REVIEWS: &str = "100+";
pub const DEFAULT_DELIVERY: &str = "Free delivery";

/// Markup applied to the current price when the provider sends no pre-sale price.
pub const SYNTHESIZED_MARKUP: f64 = 1.1;

/// Normalizes a full provider payload, reading its `shopping_results` array.
///
/// Payloads without the array normalize to an empty batch.
#[must_use]
pub fn normalize_response(payload: &Value) -> Vec<NormalizedProduct> {
    normalize_results(&shopping_results(payload))
}

/// Normalizes a batch, preserving order. Each product's `id` is its index.
#[must_use]
pub fn normalize_results(results: &[UpstreamResult]) -> Vec<NormalizedProduct> {
    results
        .iter()
        .enumerate()
        .map(|(idx, result)| normalize_result(idx, result))
        .collect()
}

/// Normalizes a single result found at position `id` within its batch.
#[must_use]
pub fn normalize_result(id: usize, result: &UpstreamResult) -> NormalizedProduct {
    let price = result.price.as_deref().map_or(0.0, parse_price);

    let original_price = match non_empty(result.old_price.as_deref()) {
        Some(old) => parse_price(old),
        None => price * SYNTHESIZED_MARKUP,
    };

    // Both prices are final at this point.
    let savings = round_half_up(original_price - price);

    // Zero is a legitimate rating; only an absent one takes the default.
    let rating = result.rating.unwrap_or(DEFAULT_RATING);

    NormalizedProduct {
        id,
        name: result.title.clone(),
        image: result.thumbnail.clone().unwrap_or_default(),
        price,
        original_price,
        seller: result.source.clone().unwrap_or_default(),
        rating,
        reviews: non_empty(result.reviews.as_deref())
            .unwrap_or(DEFAULT_REVIEWS)
            .to_owned(),
        delivery: non_empty(result.delivery.as_deref())
            .unwrap_or(DEFAULT_DELIVERY)
            .to_owned(),
        savings,
    }
}

/// Parses a display price such as `"$1,199.00"` into a number.
///
/// Every character other than an ASCII digit or `.` is dropped, then the
/// longest leading `digits[.digits]` run is parsed. Text with no digits,
/// e.g. `"Free"`, parses to `0.0`.
#[must_use]
pub fn parse_price(display: &str) -> f64 {
    let stripped: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let bytes = stripped.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(end) == Some(&b'.') {
        let fraction = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if fraction > 0 {
            end += 1 + fraction;
        }
    }

    stripped[..end].parse::<f64>().unwrap_or(0.0)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
