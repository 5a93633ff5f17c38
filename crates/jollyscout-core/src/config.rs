use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable carries an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable carries an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed. Every variable has a default; there are no required vars.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got {other:?}"),
            }),
        }
    };

    let base_url = or_default("JOLLYSCOUT_BASE_URL", "https://www.jollytur.com/");
    let log_level = or_default("JOLLYSCOUT_LOG_LEVEL", "info");
    let roster_path = PathBuf::from(or_default("JOLLYSCOUT_ROSTER_PATH", "./config/agents.yaml"));
    let output_dir = PathBuf::from(or_default("JOLLYSCOUT_OUTPUT_DIR", "./output"));

    let headless = parse_bool("JOLLYSCOUT_HEADLESS", "true")?;
    let proxy_enabled = parse_bool("JOLLYSCOUT_PROXY_ENABLED", "false")?;
    let window_width = parse_u32("JOLLYSCOUT_WINDOW_WIDTH", "1300")?;
    let window_height = parse_u32("JOLLYSCOUT_WINDOW_HEIGHT", "1000")?;

    let nav_timeout_secs = parse_u64("JOLLYSCOUT_NAV_TIMEOUT_SECS", "20")?;
    let nav_poll_ms = parse_u64("JOLLYSCOUT_NAV_POLL_MS", "500")?;
    let nav_max_retries = parse_u32("JOLLYSCOUT_NAV_MAX_RETRIES", "2")?;
    let nav_retry_backoff_base_secs = parse_u64("JOLLYSCOUT_NAV_RETRY_BACKOFF_BASE_SECS", "2")?;

    let settle_ms = parse_u64("JOLLYSCOUT_SETTLE_MS", "1000")?;
    let month_hop_limit = parse_u32("JOLLYSCOUT_MONTH_HOP_LIMIT", "18")?;
    let load_more_max_rounds = parse_u32("JOLLYSCOUT_LOAD_MORE_MAX_ROUNDS", "40")?;

    Ok(AppConfig {
        base_url,
        log_level,
        roster_path,
        output_dir,
        headless,
        proxy_enabled,
        window_width,
        window_height,
        nav_timeout_secs,
        nav_poll_ms,
        nav_max_retries,
        nav_retry_backoff_base_secs,
        settle_ms,
        month_hop_limit,
        load_more_max_rounds,
    })
}
