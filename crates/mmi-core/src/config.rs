use std::path::PathBuf;

use crate::app_config::{AppConfig, DirectoryConfig, Environment, UnknownLabelPolicy};
use crate::ConfigError;

const DEFAULT_SENTIMENT_URL: &str =
    "https://flowise.codesm.xyz/api/v1/prediction/2702a14a-10b7-4bba-b7a4-aad5ddef2647";
const DEFAULT_INSIGHTS_URL: &str =
    "https://flowise.codesm.xyz/api/v1/prediction/5923f507-b119-401a-9e0c-65a53e6666bf";

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

/// Load only the log level and symbol file path.
///
/// Unlike [`load_app_config`] this never requires `FLOWISE_API_KEY`, so
/// commands that only read the local directory work without credentials.
/// Calls `dotenvy::dotenv().ok()` first.
#[must_use]
pub fn load_directory_config() -> DirectoryConfig {
    dotenvy::dotenv().ok();
    build_directory_config(|key| std::env::var(key))
}

fn build_directory_config<F>(lookup: F) -> DirectoryConfig
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    DirectoryConfig {
        log_level: lookup("MMI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        symbols_path: PathBuf::from(
            lookup("MMI_SYMBOLS_PATH").unwrap_or_else(|_| "./data/us_symbols.csv".to_string()),
        ),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let flowise_api_key = require("FLOWISE_API_KEY")?;

    let env = parse_environment(&or_default("MMI_ENV", "development"))?;

    let bind_addr = parse_addr("MMI_BIND_ADDR", "0.0.0.0:3000")?;
    let DirectoryConfig {
        log_level,
        symbols_path,
    } = build_directory_config(&lookup);

    let sentiment_url = or_default("MMI_SENTIMENT_URL", DEFAULT_SENTIMENT_URL);
    let insights_url = or_default("MMI_INSIGHTS_URL", DEFAULT_INSIGHTS_URL);
    let quote_base_url = or_default("MMI_QUOTE_BASE_URL", "https://query2.finance.yahoo.com");
    let quote_cookie_url = or_default("MMI_QUOTE_COOKIE_URL", "https://fc.yahoo.com");
    let feed_url = or_default(
        "MMI_FEED_URL",
        "https://feeds.finance.yahoo.com/rss/2.0/headline",
    );

    let request_timeout_secs = parse_u64("MMI_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MMI_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("MMI_USER_AGENT", "Mozilla/5.0 (compatible; mmi/0.1)");
    let unknown_label_policy =
        parse_unknown_label_policy(&or_default("MMI_UNKNOWN_LABEL_POLICY", "exclude"))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        symbols_path,
        flowise_api_key,
        sentiment_url,
        insights_url,
        quote_base_url,
        quote_cookie_url,
        feed_url,
        request_timeout_secs,
        user_agent,
        unknown_label_policy,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MMI_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

fn parse_unknown_label_policy(s: &str) -> Result<UnknownLabelPolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "exclude" => Ok(UnknownLabelPolicy::Exclude),
        "neutral" | "count_as_neutral" => Ok(UnknownLabelPolicy::CountAsNeutral),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MMI_UNKNOWN_LABEL_POLICY".to_string(),
            reason: format!("expected exclude or neutral; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
