use thiserror::Error;

/// Page-level failures surfaced by a [`crate::PageDriver`] implementation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("element not interactable: {selector}: {reason}")]
    NotInteractable { selector: String, reason: String },

    #[error("browser error: {0}")]
    Browser(String),
}

/// Errors raised while driving the search flow and harvesting its results.
///
/// `FieldNotFound`, `Interaction`, and `Session` are fatal to the run.
/// `NavigationTimeout` is retried with backoff a bounded number of times
/// before becoming fatal. `EmptyResult` is reported but never fatal — an
/// empty result set is a valid outcome.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("form field not found: {selector}")]
    FieldNotFound { selector: String },

    #[error("could not interact with {selector}: {reason}")]
    Interaction { selector: String, reason: String },

    #[error("results marker {marker:?} did not appear within {waited_secs}s")]
    NavigationTimeout { marker: String, waited_secs: u64 },

    #[error("search for {destination:?} rendered zero listings")]
    EmptyResult { destination: String },

    #[error("browser session error: {0}")]
    Session(#[from] SessionError),
}
