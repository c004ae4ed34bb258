use std::fmt::Write as _;

use prism_client::savings_badge;
use prism_core::NormalizedProduct;

/// Renders products as plain-text cards, one blank line between each.
pub fn render_cards(products: &[NormalizedProduct]) -> String {
    let mut out = String::new();
    for (position, product) in products.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", position + 1, product.name);
        let _ = writeln!(
            out,
            "    ${:.2}  was ${:.2}  -${}  [{}]",
            product.price,
            product.original_price,
            product.savings,
            savings_badge(product)
        );
        let _ = writeln!(
            out,
            "    {} | {:.1} stars ({} reviews) | {}",
            if product.seller.is_empty() {
                "Unknown seller"
            } else {
                &product.seller
            },
            product.rating,
            product.reviews,
            product.delivery
        );
        out.push('\n');
    }
    out
}
