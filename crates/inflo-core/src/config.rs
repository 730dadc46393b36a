use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// development configuration pointed at a local backend.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(None),
        }
    };

    let api_base_url =
        parse_base_url(&or_default("INFLO_API_BASE_URL", "http://127.0.0.1:5000"))?;
    let env = parse_environment(&or_default("INFLO_ENV", "development"))?;
    let log_level = or_default("INFLO_LOG_LEVEL", "warn");
    let session_path = PathBuf::from(or_default("INFLO_SESSION_PATH", ".inflo/session.json"));
    let user_agent = or_default("INFLO_USER_AGENT", "inflo/0.1 (campaign-workflow)");

    let request_timeout_secs = optional_u64("INFLO_REQUEST_TIMEOUT_SECS")?;
    let search_timeout_secs = parse_u64("INFLO_SEARCH_TIMEOUT_SECS", "45")?;
    let navigate_delay_ms = parse_u64("INFLO_NAVIGATE_DELAY_MS", "800")?;
    let overlay_failsafe_secs = parse_u64("INFLO_OVERLAY_FAILSAFE_SECS", "60")?;
    let toast_ttl_secs = parse_u64("INFLO_TOAST_TTL_SECS", "5")?;

    if search_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "INFLO_SEARCH_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        session_path,
        user_agent,
        request_timeout_secs,
        search_timeout_secs,
        navigate_delay_ms,
        overlay_failsafe_secs,
        toast_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "INFLO_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Accepts absolute `http`/`https` URLs and strips trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let has_host = trimmed
        .split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty());
    if !has_scheme || !has_host {
        return Err(ConfigError::InvalidEnvVar {
            var: "INFLO_API_BASE_URL".to_string(),
            reason: format!("'{raw}' is not an absolute http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
