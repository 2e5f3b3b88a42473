use std::time::Duration;

use crate::app_config::{AppConfig, Environment, OpenAiSettings, PollIntervals};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from the variables already in the process.
///
/// Does not read `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration from an arbitrary env-var lookup so tests can feed a
/// plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_interval = |var: &str, default: Duration| -> Result<Duration, ConfigError> {
        let ms = match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => return Ok(default),
        };
        if ms == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "poll interval must be greater than zero".to_string(),
            });
        }
        Ok(Duration::from_millis(ms))
    };

    let env = parse_environment(&or_default("REELPULSE_ENV", "development"));

    let raw_addr = or_default("REELPULSE_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = raw_addr
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "REELPULSE_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let log_level = or_default("REELPULSE_LOG_LEVEL", "info");
    let dashboard_api_url = or_default("REELPULSE_DASHBOARD_API_URL", "http://localhost:5000");

    let defaults = PollIntervals::default();
    let poll = PollIntervals {
        analytics: parse_interval("REELPULSE_ANALYTICS_POLL_MS", defaults.analytics)?,
        accounts: parse_interval("REELPULSE_ACCOUNTS_POLL_MS", defaults.accounts)?,
        history: parse_interval("REELPULSE_HISTORY_POLL_MS", defaults.history)?,
    };
    let http_timeout_secs = parse_u64("REELPULSE_HTTP_TIMEOUT_SECS", "30")?;

    let openai = OpenAiSettings {
        api_key: lookup("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty()),
        base_url: or_default("OPENAI_BASE_URL", "https://api.openai.com"),
        model: or_default("OPENAI_MODEL", "gpt-4o"),
        timeout_secs: parse_u64("OPENAI_TIMEOUT_SECS", "120")?,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        dashboard_api_url,
        poll,
        http_timeout_secs,
        openai,
    })
}

/// Unrecognized values fall back to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
