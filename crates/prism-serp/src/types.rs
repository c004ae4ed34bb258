//! Shopping-search provider response types.
//!
//! ## Observed shape of `search.json?engine=google_shopping`
//!
//! The payload is an object whose `shopping_results` array holds one entry
//! per matched offer. Only `title` is reliably present. Everything else may be
//! missing, `null`, or carry a different JSON type than usual:
//!
//! - `price` / `old_price`: display strings with a currency prefix
//!   (`"$999.00"`). Occasionally plain numbers.
//! - `rating`: a number in `0..=5`, sometimes a numeric string.
//! - `reviews`: usually an integer, sometimes compact text such as `"2.4K"`.
//! - `thumbnail`, `source`, `delivery`: free text.
//!
//! The schema is owned by the provider, so every field here decodes
//! leniently: an unexpected JSON type becomes `None` instead of failing the
//! whole entry.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One matched offer as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpstreamResult {
    /// Offer title. Absent or non-string titles decode as an empty string.
    #[serde(default, deserialize_with = "lenient_title")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,

    /// Display price, e.g. `"$999.00"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: Option<String>,

    /// Pre-sale display price, present only when the offer is discounted.
    #[serde(default, deserialize_with = "lenient_string")]
    pub old_price: Option<String>,

    /// Seller name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,

    /// Review count in display form. Integers are converted to their decimal
    /// string (`1000` becomes `"1000"`).
    #[serde(default, deserialize_with = "lenient_string")]
    pub reviews: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub delivery: Option<String>,
}

impl UpstreamResult {
    /// Decodes a single `shopping_results` entry.
    ///
    /// Entries that are not JSON objects decode as [`UpstreamResult::default`]
    /// so a batch always keeps its length.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Extracts the `shopping_results` array from a provider payload.
///
/// A missing array, or a payload that is not an object, yields an empty batch.
#[must_use]
pub fn shopping_results(payload: &Value) -> Vec<UpstreamResult> {
    payload
        .get("shopping_results")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(UpstreamResult::from_value).collect())
        .unwrap_or_default()
}

fn lenient_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(number_to_string(&n)),
        _ => None,
    })
}

/// Whole-number floats print without a fraction (`1000.0` as `"1000"`).
#[allow(clippy::float_cmp)]
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f == 0.0 => "0".to_owned(),
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}
