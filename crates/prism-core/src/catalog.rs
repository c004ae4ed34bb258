//! Built-in sample products shown before the first search.

use crate::products::NormalizedProduct;

/// Returns the three sample deals displayed when no search results exist yet.
#[must_use]
pub fn sample_products() -> Vec<NormalizedProduct> {
    vec![
        NormalizedProduct {
            id: 1,
            name: "Sony WH-1000XM5 Wireless Noise-Canceling Headphones".to_string(),
            image: "/images/products/sony-headphones.jpg".to_string(),
            price: 348.0,
            original_price: 399.0,
            seller: "Amazon".to_string(),
            rating: 4.8,
            reviews: "2.4K".to_string(),
            delivery: "2-day free".to_string(),
            savings: 51,
        },
        NormalizedProduct {
            id: 2,
            name: "MacBook Air M3 13\" - Midnight".to_string(),
            image: "/images/products/macbook-air.jpg".to_string(),
            price: 1049.0,
            original_price: 1199.0,
            seller: "Best Buy".to_string(),
            rating: 4.9,
            reviews: "8.2K".to_string(),
            delivery: "Same-day".to_string(),
            savings: 150,
        },
        NormalizedProduct {
            id: 3,
            name: "Nintendo Switch OLED Model with White Joy-Cons".to_string(),
            image: "/images/products/nintendo-switch.jpg".to_string(),
            price: 299.0,
            original_price: 349.0,
            seller: "Target".to_string(),
            rating: 4.7,
            reviews: "12K".to_string(),
            delivery: "1-3 days".to_string(),
            savings: 50,
        },
    ]
}
