use std::path::PathBuf;

/// Process-wide configuration, loaded from `JOLLYSCOUT_*` env vars.
///
/// Every field has a default; see [`crate::config`] for the variable names
/// and parsing rules.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Search site entry point.
    pub base_url: String,
    /// `tracing` env-filter directive (e.g. `info`, `jollyscout=debug`).
    pub log_level: String,
    /// Path to the YAML User-Agent/proxy roster.
    pub roster_path: PathBuf,
    /// Directory the JSON result artifacts are written into.
    pub output_dir: PathBuf,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Route the browser session through a roster proxy. Off by default.
    pub proxy_enabled: bool,
    /// Browser window size; large enough that no form element is hidden.
    pub window_width: u32,
    pub window_height: u32,
    /// Upper bound on one results-marker wait.
    pub nav_timeout_secs: u64,
    /// Poll interval while waiting for the results marker.
    pub nav_poll_ms: u64,
    /// Additional attempts after the first results wait times out.
    pub nav_max_retries: u32,
    /// Base delay for exponential backoff between wait retries.
    pub nav_retry_backoff_base_secs: u64,
    /// Pause after typing/clicking so autocomplete and date-picker widgets
    /// can re-render.
    pub settle_ms: u64,
    /// Maximum date-picker "next month" steps before giving up.
    pub month_hop_limit: u32,
    /// Maximum load-more rounds while expanding the results list.
    pub load_more_max_rounds: u32,
}
