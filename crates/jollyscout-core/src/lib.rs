//! Shared configuration and domain types for jollyscout.
//!
//! Holds the env-driven [`AppConfig`], the User-Agent/proxy [`Roster`],
//! and the listing data model passed between the scraper, the scoring
//! engine, and the CLI.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod listing;
pub mod roster;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{RawListing, ResultSet, ScoredListing, SearchQuery};
pub use roster::{load_roster, Roster};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read roster file {path}: {source}")]
    RosterFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster file: {0}")]
    RosterFileParse(#[from] serde_yaml::Error),

    #[error("roster validation failed: {0}")]
    Validation(String),
}
