use prism_serp::SerpError;
use serde_json::Value;

/// What a probe learned from one provider payload.
#[derive(Debug, PartialEq, Eq)]
pub enum ProbeSummary {
    /// The payload carried an `error` message.
    ApiError(String),
    Results {
        count: usize,
        first_title: Option<String>,
    },
    /// No error and no `shopping_results`; lists the keys that were present.
    NoResults { keys: Vec<String> },
}

impl std::fmt::Display for ProbeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeSummary::ApiError(message) => write!(f, "API error: {message}"),
            ProbeSummary::Results { count, first_title } => {
                write!(f, "Success! Found {count} results.")?;
                if let Some(title) = first_title {
                    write!(f, "\nSample item: {title}")?;
                }
                Ok(())
            }
            ProbeSummary::NoResults { keys } => write!(
                f,
                "No error, but no shopping_results found.\nResponse keys: {}",
                keys.join(", ")
            ),
        }
    }
}

pub fn summarize(payload: &Value) -> ProbeSummary {
    if let Some(error) = payload.get("error") {
        let message = error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_owned);
        return ProbeSummary::ApiError(message);
    }

    if let Some(results) = payload.get("shopping_results").and_then(Value::as_array) {
        return ProbeSummary::Results {
            count: results.len(),
            first_title: results
                .first()
                .and_then(|r| r.get("title"))
                .and_then(Value::as_str)
                .map(str::to_owned),
        };
    }

    let keys = payload
        .as_object()
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default();
    ProbeSummary::NoResults { keys }
}

/// The provider's own message for a rejected request, e.g. a bad key.
pub fn summarize_error(error: &SerpError) -> Option<ProbeSummary> {
    match error {
        SerpError::UpstreamStatus {
            message: Some(message),
            ..
        } => Some(ProbeSummary::ApiError(message.clone())),
        _ => None,
    }
}
