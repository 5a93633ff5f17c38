//! User-Agent and proxy roster, loaded from a YAML file.
//!
//! The scraper picks one User-Agent (and optionally one proxy) per browser
//! session from these lists. The roster is plain process configuration —
//! loaded once at startup and passed down, never read from global state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Fallback User-Agent used when no roster file is configured.
pub const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Candidate pools for per-session header and proxy assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub user_agents: Vec<String>,
    /// Proxy endpoints (e.g. `https://13.36.113.81:3128`). Only used when
    /// proxy rotation is enabled in the app config.
    #[serde(default)]
    pub proxies: Vec<String>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            user_agents: vec![FALLBACK_USER_AGENT.to_owned()],
            proxies: Vec::new(),
        }
    }
}

/// Load and validate the roster from a YAML file.
///
/// A missing file is not an error: the built-in single-UA roster is
/// returned so a fresh checkout works without any config.
///
/// # Errors
///
/// Returns `ConfigError` if an existing file cannot be read, parsed, or
/// fails validation.
pub fn load_roster(path: &Path) -> Result<Roster, ConfigError> {
    if !path.exists() {
        return Ok(Roster::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RosterFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let roster: Roster = serde_yaml::from_str(&content)?;
    validate_roster(&roster)?;

    Ok(roster)
}

fn validate_roster(roster: &Roster) -> Result<(), ConfigError> {
    if roster.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "roster must list at least one user agent".to_string(),
        ));
    }

    for ua in &roster.user_agents {
        if ua.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user agent entries must be non-empty".to_string(),
            ));
        }
    }

    for proxy in &roster.proxies {
        if proxy.trim().is_empty() {
            return Err(ConfigError::Validation(
                "proxy entries must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}
