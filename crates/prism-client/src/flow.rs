//! Client search flow: `idle -> searching -> {results | empty | errored}`.
//!
//! Every accepted search bumps a generation counter and hands out a
//! [`SearchTicket`]. Outcomes are applied only when their ticket is still the
//! current generation, so a superseded search can never overwrite a newer
//! one.

use prism_core::NormalizedProduct;

use crate::render::RenderModel;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search yet; the view shows the sample catalog.
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Results {
        query: String,
        products: Vec<NormalizedProduct>,
    },
    /// The search succeeded but matched nothing.
    Empty {
        query: String,
    },
    Errored {
        query: String,
        message: String,
    },
}

impl SearchState {
    #[must_use]
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    /// Query this state belongs to, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Searching { query }
            | SearchState::Results { query, .. }
            | SearchState::Empty { query }
            | SearchState::Errored { query, .. } => Some(query),
        }
    }
}

/// Handle for one accepted search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct SearchFlow {
    state: SearchState,
    generation: u64,
}

impl SearchFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Starts a search, discarding whatever was displayed before.
    ///
    /// Blank queries are ignored: the state is left untouched and `None` is
    /// returned.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        if query.trim().is_empty() {
            tracing::warn!("search ignored: query is empty");
            return None;
        }

        self.generation += 1;
        self.state = SearchState::Searching {
            query: query.to_owned(),
        };

        Some(SearchTicket {
            generation: self.generation,
            query: query.to_owned(),
        })
    }

    /// Applies the outcome of `ticket`'s search.
    ///
    /// Returns `false`, leaving the state untouched, when a newer search has
    /// started since `ticket` was issued.
    pub fn resolve(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<NormalizedProduct>, String>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded search outcome"
            );
            return false;
        }

        let query = ticket.query.clone();
        self.state = match outcome {
            Ok(products) if products.is_empty() => SearchState::Empty { query },
            Ok(products) => SearchState::Results { query, products },
            Err(message) => SearchState::Errored { query, message },
        };
        true
    }

    #[must_use]
    pub fn render(&self) -> RenderModel {
        RenderModel::from_state(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use prism_core::sample_products;

    use super::*;

    #[test]
    fn starts_idle() {
        let flow = SearchFlow::new();
        assert_eq!(flow.state(), &SearchState::Idle);
        assert!(flow.state().query().is_none());
    }

    #[test]
    fn blank_query_is_a_no_op() {
        let mut flow = SearchFlow::new();
        assert!(flow.begin("").is_none());
        assert!(flow.begin("   \t").is_none());
        assert_eq!(flow.state(), &SearchState::Idle);
    }

    #[test]
    fn blank_query_does_not_disturb_results() {
        let mut flow = SearchFlow::new();
        let ticket = flow.begin("tv").expect("ticket");
        flow.resolve(&ticket, Ok(sample_products()));
        assert!(flow.begin(" ").is_none());
        assert!(matches!(flow.state(), SearchState::Results { .. }));
    }

    #[test]
    fn results_transition() {
        let mut flow = SearchFlow::new();
        let ticket = flow.begin("headphones").expect("ticket");
        assert!(flow.state().is_searching());
        assert!(flow.resolve(&ticket, Ok(sample_products())));
        match flow.state() {
            SearchState::Results { query, products } => {
                assert_eq!(query, "headphones");
                assert_eq!(products.len(), 3);
            }
            other => panic!("expected results, got {other:?}"),
        }
    }

    #[test]
    fn empty_transition_is_distinct_from_error() {
        let mut flow = SearchFlow::new();
        let ticket = flow.begin("nothing matches").expect("ticket");
        flow.resolve(&ticket, Ok(vec![]));
        assert_eq!(
            flow.state(),
            &SearchState::Empty {
                query: "nothing matches".to_string()
            }
        );
    }

    #[test]
    fn errored_transition_keeps_message() {
        let mut flow = SearchFlow::new();
        let ticket = flow.begin("iphone").expect("ticket");
        flow.resolve(&ticket, Err("Search failed".to_string()));
        assert_eq!(
            flow.state(),
            &SearchState::Errored {
                query: "iphone".to_string(),
                message: "Search failed".to_string()
            }
        );
    }

    #[test]
    fn new_search_discards_previous_results_immediately() {
        let mut flow = SearchFlow::new();
        let first = flow.begin("tv").expect("ticket");
        flow.resolve(&first, Ok(sample_products()));
        flow.begin("laptop").expect("ticket");
        assert_eq!(
            flow.state(),
            &SearchState::Searching {
                query: "laptop".to_string()
            }
        );
        assert!(flow.render().products.is_none());
    }

    #[test]
    fn stale_outcome_is_ignored() {
        let mut flow = SearchFlow::new();
        let first = flow.begin("tv").expect("ticket");
        let second = flow.begin("laptop").expect("ticket");
        assert!(second.generation() > first.generation());

        assert!(!flow.resolve(&first, Ok(sample_products())));
        assert!(flow.state().is_searching());

        assert!(flow.resolve(&second, Ok(vec![])));
        assert!(matches!(flow.state(), SearchState::Empty { query } if query == "laptop"));
    }

    #[test]
    fn outcome_resolves_only_once_per_generation_change() {
        let mut flow = SearchFlow::new();
        let first = flow.begin("tv").expect("ticket");
        flow.resolve(&first, Err("boom".to_string()));
        let second = flow.begin("tv").expect("ticket");
        assert!(!flow.resolve(&first, Ok(sample_products())));
        assert_eq!(second.query(), "tv");
    }
}
