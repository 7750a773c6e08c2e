use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::pricing::DEFAULT_MARKET_FEE_RATE;
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
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
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

    let api_url = require("BREWMART_API_URL")?;
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWMART_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_url}\""),
        });
    }

    let env = parse_environment(&or_default("BREWMART_ENV", "development"))?;
    let log_level = or_default("BREWMART_LOG_LEVEL", "info");
    let ipfs_gateway = or_default("BREWMART_IPFS_GATEWAY", "https://ipfs.io")
        .trim_end_matches('/')
        .to_string();

    let page_size = parse_u32("BREWMART_PAGE_SIZE", "3")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWMART_PAGE_SIZE".to_string(),
            reason: "page size must be at least 1".to_string(),
        });
    }

    let market_fee_rate = match lookup("BREWMART_MARKET_FEE_RATE") {
        Ok(raw) => parse_fee_rate(&raw)?,
        Err(_) => DEFAULT_MARKET_FEE_RATE,
    };

    let api_timeout_secs = parse_u64("BREWMART_API_TIMEOUT_SECS", "30")?;
    let api_user_agent = or_default("BREWMART_API_USER_AGENT", "brewmart/0.1 (storefront)");
    let api_max_retries = parse_u32("BREWMART_API_MAX_RETRIES", "0")?;
    let api_retry_backoff_base_ms = parse_u64("BREWMART_API_RETRY_BACKOFF_BASE_MS", "500")?;
    let api_token = lookup("BREWMART_API_TOKEN").ok().filter(|t| !t.is_empty());
    let locale_path = lookup("BREWMART_LOCALE_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        api_url,
        env,
        log_level,
        ipfs_gateway,
        page_size,
        market_fee_rate,
        api_timeout_secs,
        api_user_agent,
        api_max_retries,
        api_retry_backoff_base_ms,
        api_token,
        locale_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BREWMART_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Parse the market fee rate. Negative rates are rejected.
fn parse_fee_rate(raw: &str) -> Result<Decimal, ConfigError> {
    let rate = Decimal::from_str(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar {
        var: "BREWMART_MARKET_FEE_RATE".to_string(),
        reason: e.to_string(),
    })?;
    if rate.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar {
            var: "BREWMART_MARKET_FEE_RATE".to_string(),
            reason: format!("fee rate must not be negative, got {rate}"),
        });
    }
    Ok(rate)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
