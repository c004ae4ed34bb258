pub mod client;
pub mod error;
pub mod fixture;
pub mod normalize;
pub mod redact;
pub mod types;

pub use client::{SerpClient, PROXY_RESULT_LIMIT};
pub use error::SerpError;
pub use fixture::mock_shopping_response;
pub use normalize::{normalize_response, normalize_result, normalize_results, parse_price};
pub use redact::{redact, REDACTED};
pub use types::{shopping_results, UpstreamResult};
