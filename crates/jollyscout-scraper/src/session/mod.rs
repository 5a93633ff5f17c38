//! The browser session capability and its per-run configuration.
//!
//! [`PageDriver`] is the seam between the search controller and the real
//! browser: everything the controller needs from a rendered page, nothing
//! more. [`ChromiumSession`] implements it over headless Chromium; tests
//! implement it with scripted fakes.

mod chromium;

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use jollyscout_core::{AppConfig, Roster};

use crate::error::SessionError;

pub use chromium::ChromiumSession;

/// An externally rendered page the search flow can drive.
///
/// Selector arguments are CSS. Implementations report a missing element as
/// [`SessionError::ElementNotFound`] and a found-but-unusable element as
/// [`SessionError::NotInteractable`].
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to `url` and wait for the load to settle.
    async fn goto(&self, url: &str) -> Result<(), SessionError>;

    /// Whether at least one element matches `selector` right now.
    async fn exists(&self, selector: &str) -> Result<bool, SessionError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), SessionError>;

    /// Click the element among `selector` matches whose trimmed text equals
    /// `text` (date-picker day cells are addressed this way).
    async fn click_by_text(&self, selector: &str, text: &str) -> Result<(), SessionError>;

    /// Focus the first `selector` match and type `text` into it.
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), SessionError>;

    /// Inner text of the first `selector` match.
    async fn text_of(&self, selector: &str) -> Result<String, SessionError>;

    /// Scroll the viewport vertically by `delta_y` pixels.
    async fn scroll_by(&self, delta_y: i64) -> Result<(), SessionError>;

    /// Full HTML of the current document.
    async fn content(&self) -> Result<String, SessionError>;
}

/// Launch parameters for one browser session.
///
/// Built per run: header and proxy assignment is a random pick from the
/// roster, independent across runs. The session owns every request the run
/// makes, so one pick covers the whole run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: Option<String>,
    pub proxy: Option<String>,
}

impl SessionConfig {
    /// Assemble the launch parameters for one run.
    ///
    /// Picks one User-Agent from the roster, and one proxy endpoint when
    /// proxy rotation is enabled and the roster lists any.
    #[must_use]
    pub fn for_run(config: &AppConfig, roster: &Roster) -> Self {
        let mut rng = rand::rng();
        let user_agent = roster.user_agents.choose(&mut rng).cloned();
        let proxy = if config.proxy_enabled {
            roster.proxies.choose(&mut rng).cloned()
        } else {
            None
        };

        Self {
            headless: config.headless,
            window_width: config.window_width,
            window_height: config.window_height,
            user_agent,
            proxy,
        }
    }
}
