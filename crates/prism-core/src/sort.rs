//! Ordering options offered on the results view.
//!
//! Review counts and delivery estimates arrive as display text, so the
//! helpers here scan them by hand rather than pulling in `regex`.

use std::str::FromStr;

use crate::products::NormalizedProduct;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    PriceLowToHigh,
    PriceHighToLow,
    BestRating,
    MostReviewed,
    FastestDelivery,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::PriceLowToHigh,
        SortOrder::PriceHighToLow,
        SortOrder::BestRating,
        SortOrder::MostReviewed,
        SortOrder::FastestDelivery,
    ];

    /// Label shown in the sort dropdown.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::PriceLowToHigh => "Price: Low to High",
            SortOrder::PriceHighToLow => "Price: High to Low",
            SortOrder::BestRating => "Best Rating",
            SortOrder::MostReviewed => "Most Reviewed",
            SortOrder::FastestDelivery => "Fastest Delivery",
        }
    }

    /// Short identifier accepted by [`SortOrder::from_str`].
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            SortOrder::PriceLowToHigh => "price-asc",
            SortOrder::PriceHighToLow => "price-desc",
            SortOrder::BestRating => "rating",
            SortOrder::MostReviewed => "reviews",
            SortOrder::FastestDelivery => "delivery",
        }
    }

    /// Sorts `products` in place. Ties keep their original relative order.
    pub fn sort(self, products: &mut [NormalizedProduct]) {
        match self {
            SortOrder::PriceLowToHigh => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHighToLow => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::BestRating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortOrder::MostReviewed => products.sort_by(|a, b| {
                parse_review_count(&b.reviews).cmp(&parse_review_count(&a.reviews))
            }),
            SortOrder::FastestDelivery => {
                products.sort_by_key(|p| delivery_rank(&p.delivery));
            }
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        SortOrder::ALL
            .into_iter()
            .find(|o| o.slug() == needle || o.label().to_ascii_lowercase() == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = SortOrder::ALL.iter().map(|o| o.slug()).collect();
                format!("unknown sort order \"{s}\" (expected one of: {})", known.join(", "))
            })
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Interprets a review count written in compact notation.
///
/// `"2.4K"` is 2400, `"1.1M"` is 1 100 000, `"100+"` is 100 and `"1,234"` is
/// 1234. Anything without a leading number counts as zero.
#[must_use]
pub fn parse_review_count(text: &str) -> u64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '+')
        .collect();

    let number_end = cleaned
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map_or(cleaned.len(), |(i, _)| i);

    let Ok(value) = cleaned[..number_end].parse::<f64>() else {
        return 0;
    };

    let multiplier = match cleaned[number_end..].trim_start().chars().next() {
        Some('k' | 'K') => 1_000.0,
        Some('m' | 'M') => 1_000_000.0,
        _ => 1.0,
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (value * multiplier).round() as u64;
    count
}

/// Ranks a delivery estimate so faster options sort first.
///
/// Same-day wording ranks `0`, next-day `1`, otherwise the first integer in
/// the text (`"1-3 days"` is 1, `"2-day free"` is 2). Text with no estimate
/// ranks last.
#[must_use]
pub fn delivery_rank(text: &str) -> u32 {
    let lower = text.to_lowercase();
    if lower.contains("same-day") || lower.contains("same day") || lower.contains("today") {
        return 0;
    }
    if lower.contains("next-day") || lower.contains("next day") || lower.contains("tomorrow") {
        return 1;
    }

    let bytes = lower.as_bytes();
    let Some(start) = bytes.iter().position(u8::is_ascii_digit) else {
        return u32::MAX;
    };
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |off| start + off);

    lower[start..end].parse::<u32>().unwrap_or(u32::MAX)
}
