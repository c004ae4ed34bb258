pub mod app_config;
pub mod catalog;
pub mod config;
pub mod products;
pub mod sort;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, UpstreamMode};
pub use catalog::sample_products;
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{round_half_up, NormalizedProduct};
pub use sort::SortOrder;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
