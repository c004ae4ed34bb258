//! Canned provider payload served when the proxy runs in mock mode.

use serde_json::{json, Value};

/// Two-item `google_shopping` payload shaped like a live provider response.
#[must_use]
pub fn mock_shopping_response() -> Value {
    json!({
        "shopping_results": [
            {
                "title": "Mock iPhone 15 Pro",
                "thumbnail": "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is/iphone-15-pro-finish-select-202309-6-1inch-naturaltitanium?wid=5120&hei=2880&fmt=p-jpg&qlt=80&.v=1692846363027",
                "price": "$999.00",
                "old_price": "$1099.00",
                "source": "Apple",
                "rating": 4.9,
                "reviews": 1000,
                "delivery": "Free delivery"
            },
            {
                "title": "Mock iPhone 15 Pro Max",
                "thumbnail": "https://store.storeimages.cdn-apple.com/4982/as-images.apple.com/is/iphone-15-pro-finish-select-202309-6-7inch-bluetitanium?wid=5120&hei=2880&fmt=p-jpg&qlt=80&.v=1692845761595",
                "price": "$1199.00",
                "source": "Best Buy",
                "rating": 4.8,
                "reviews": 500
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize_response;

    #[test]
    fn fixture_normalizes_to_two_products() {
        let products = normalize_response(&mock_shopping_response());
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].savings, 100);
        assert_eq!(products[1].delivery, "Free delivery");
    }
}
