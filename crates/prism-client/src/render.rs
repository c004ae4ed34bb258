//! What the results view needs to draw itself.

use prism_core::{sample_products, NormalizedProduct};
use serde::Serialize;

use crate::flow::SearchState;

/// Inputs to the results view.
///
/// `products` is `None` when nothing has been searched yet (or the current
/// search has not produced a batch), in which case the view falls back to the
/// sample catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub products: Option<Vec<NormalizedProduct>>,
    pub is_searching: bool,
    pub error: Option<String>,
}

impl RenderModel {
    #[must_use]
    pub fn from_state(state: &SearchState) -> Self {
        match state {
            SearchState::Idle => Self {
                products: None,
                is_searching: false,
                error: None,
            },
            SearchState::Searching { .. } => Self {
                products: None,
                is_searching: true,
                error: None,
            },
            SearchState::Results { products, .. } => Self {
                products: Some(products.clone()),
                is_searching: false,
                error: None,
            },
            SearchState::Empty { .. } => Self {
                products: Some(Vec::new()),
                is_searching: false,
                error: None,
            },
            SearchState::Errored { message, .. } => Self {
                products: None,
                is_searching: false,
                error: Some(message.clone()),
            },
        }
    }

    /// `true` for a finished search that matched nothing.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.error.is_none() && self.products.as_ref().is_some_and(Vec::is_empty)
    }

    /// Cards to draw. Nothing while searching or after an error; the sample
    /// catalog before the first search.
    #[must_use]
    pub fn products_to_display(&self) -> Vec<NormalizedProduct> {
        if self.is_searching || self.error.is_some() {
            return Vec::new();
        }
        self.products.clone().unwrap_or_else(sample_products)
    }
}

/// Badge text shown on a product card, e.g. `"Save 9%"`.
#[must_use]
pub fn savings_badge(product: &NormalizedProduct) -> String {
    format!("Save {}%", product.savings_percent())
}
