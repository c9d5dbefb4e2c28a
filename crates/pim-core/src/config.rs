use crate::app_config::{AppConfig, Environment};
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
/// Decoupled from the process environment so tests can drive it from a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_base_url = require("PIM_API_BASE_URL")?;
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "PIM_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{api_base_url}'"),
        });
    }

    let env = parse_environment(&or_default("PIM_ENV", "development"))?;
    let log_level = or_default("PIM_LOG_LEVEL", "info");
    let user_email = optional("PIM_USER_EMAIL");
    let cache_dir = PathBuf::from(or_default("PIM_CACHE_DIR", "./.pim-cache"));
    let categorizer_url = optional("PIM_CATEGORIZER_URL");

    let request_timeout_secs = parse_u64("PIM_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PIM_USER_AGENT", "pim-console/0.1 (data-cleaning)");
    let max_concurrent_rows = parse_usize("PIM_MAX_CONCURRENT_ROWS", "4")?;
    if max_concurrent_rows == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PIM_MAX_CONCURRENT_ROWS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let max_retries = parse_u32("PIM_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("PIM_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        user_email,
        cache_dir,
        categorizer_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_rows,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse `PIM_ENV` into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PIM_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
