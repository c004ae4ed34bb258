use crate::app_config::{AppConfig, Environment, UpstreamMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("PRISM_ENV", "development"));

    let bind_addr = or_default("PRISM_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRISM_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("PRISM_LOG_LEVEL", "info");

    let upstream_mode = parse_upstream_mode(&or_default("PRISM_UPSTREAM_MODE", "live"))
        .ok_or_else(|| invalid("PRISM_UPSTREAM_MODE", "expected \"live\" or \"mock\"".into()))?;

    let serpapi_api_key = lookup("SERPAPI_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    if upstream_mode == UpstreamMode::Live && serpapi_api_key.is_none() {
        return Err(ConfigError::MissingEnvVar("SERPAPI_API_KEY".to_string()));
    }

    let upstream_base_url = or_default("PRISM_UPSTREAM_BASE_URL", "https://serpapi.com/");

    let upstream_timeout_secs = or_default("PRISM_UPSTREAM_TIMEOUT_SECS", "10")
        .parse::<u64>()
        .map_err(|e| invalid("PRISM_UPSTREAM_TIMEOUT_SECS", e.to_string()))?;
    if upstream_timeout_secs == 0 {
        return Err(invalid(
            "PRISM_UPSTREAM_TIMEOUT_SECS",
            "must be greater than zero".into(),
        ));
    }

    let user_agent = or_default("PRISM_USER_AGENT", "prism/0.1 (shopping-search)");
    let proxy_url = or_default("PRISM_PROXY_URL", "http://127.0.0.1:3000");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_mode,
        serpapi_api_key,
        upstream_base_url,
        upstream_timeout_secs,
        user_agent,
        proxy_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_upstream_mode(s: &str) -> Option<UpstreamMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "live" => Some(UpstreamMode::Live),
        "mock" => Some(UpstreamMode::Mock),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
