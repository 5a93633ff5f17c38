//! Search-form state machine.
//!
//! Drives the site's search flow over a [`PageDriver`]:
//! `Idle → FormFilled → Submitted → ResultsLoaded`, with `Error` reachable
//! from any non-terminal state. Modeling the flow as an explicit machine
//! keeps the retry/timeout policy testable against a scripted fake page,
//! with no browser involved.

use std::time::Duration;

use jollyscout_core::{AppConfig, SearchQuery};

use crate::error::{ScrapeError, SessionError};
use crate::retry::retry_with_backoff;
use crate::selectors;
use crate::session::PageDriver;

/// Site-imposed ceiling on the adult count selector.
const MAX_ADULTS: u8 = 9;

/// Pixels per scroll step while expanding the results list.
const SCROLL_STEP: i64 = 550;

/// Where the controller currently stands in the search flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    FormFilled,
    Submitted,
    /// Terminal success: the results container has rendered.
    ResultsLoaded,
    /// Terminal failure: the error has been propagated to the caller.
    Error,
}

/// Timing and bound knobs for the search flow, lifted out of [`AppConfig`]
/// so tests can zero them.
#[derive(Debug, Clone)]
pub struct SearchTuning {
    /// Upper bound on one marker wait.
    pub nav_timeout: Duration,
    /// Poll interval while waiting for a marker element.
    pub nav_poll: Duration,
    /// Additional attempts after the first results wait times out.
    pub nav_max_retries: u32,
    /// Base delay for exponential backoff between wait retries.
    pub nav_retry_backoff_base_secs: u64,
    /// Pause after typing/clicking so the page's widgets can re-render.
    pub settle: Duration,
    /// Maximum "next month" steps through the date picker.
    pub month_hop_limit: u32,
    /// Maximum load-more rounds while expanding the results list.
    pub load_more_max_rounds: u32,
}

impl SearchTuning {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
            nav_poll: Duration::from_millis(config.nav_poll_ms),
            nav_max_retries: config.nav_max_retries,
            nav_retry_backoff_base_secs: config.nav_retry_backoff_base_secs,
            settle: Duration::from_millis(config.settle_ms),
            month_hop_limit: config.month_hop_limit,
            load_more_max_rounds: config.load_more_max_rounds,
        }
    }
}

/// Drives one search query through the site's form and reports when the
/// results are ready for extraction.
pub struct SearchFormController<'a, P: PageDriver + ?Sized> {
    page: &'a P,
    base_url: &'a str,
    query: &'a SearchQuery,
    tuning: SearchTuning,
    phase: SearchPhase,
}

/// Maps a session failure during form filling onto the flow taxonomy: an
/// absent element is a missing form field, everything else is an
/// interaction failure.
fn form_err(e: SessionError) -> ScrapeError {
    match e {
        SessionError::ElementNotFound { selector } => ScrapeError::FieldNotFound { selector },
        SessionError::NotInteractable { selector, reason } => {
            ScrapeError::Interaction { selector, reason }
        }
        other => ScrapeError::Session(other),
    }
}

/// At submit time even an absent button counts as an interaction failure:
/// the form was filled, the trigger just cannot be used.
fn submit_err(e: SessionError) -> ScrapeError {
    match e {
        SessionError::ElementNotFound { selector } => ScrapeError::Interaction {
            selector,
            reason: "not present or not yet clickable".to_owned(),
        },
        SessionError::NotInteractable { selector, reason } => {
            ScrapeError::Interaction { selector, reason }
        }
        other => ScrapeError::Session(other),
    }
}

impl<'a, P: PageDriver + ?Sized> SearchFormController<'a, P> {
    #[must_use]
    pub fn new(
        page: &'a P,
        base_url: &'a str,
        query: &'a SearchQuery,
        tuning: SearchTuning,
    ) -> Self {
        Self {
            page,
            base_url,
            query,
            tuning,
            phase: SearchPhase::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Run the flow to `ResultsLoaded` or a terminal error.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::FieldNotFound`] — an expected form element is absent.
    /// - [`ScrapeError::Interaction`] — an element cannot be interacted with
    ///   (includes an unreachable target month and a stuck adult counter).
    /// - [`ScrapeError::NavigationTimeout`] — the results marker did not
    ///   appear within the timeout, after all retries.
    /// - [`ScrapeError::Session`] — browser-level failure mid-flow.
    pub async fn run(&mut self) -> Result<(), ScrapeError> {
        let outcome = self.drive().await;
        if outcome.is_err() {
            self.phase = SearchPhase::Error;
        }
        outcome
    }

    async fn drive(&mut self) -> Result<(), ScrapeError> {
        self.fill_form().await?;
        self.phase = SearchPhase::FormFilled;
        tracing::debug!(destination = %self.query.destination, "search form filled");

        self.submit().await?;
        self.phase = SearchPhase::Submitted;
        tracing::debug!("search submitted");

        self.await_results().await?;
        self.phase = SearchPhase::ResultsLoaded;
        tracing::info!(destination = %self.query.destination, "results loaded");

        self.expand_results().await;
        Ok(())
    }

    async fn fill_form(&self) -> Result<(), ScrapeError> {
        self.page
            .goto(self.base_url)
            .await
            .map_err(ScrapeError::Session)?;
        self.require_present(selectors::DESTINATION_INPUT).await?;

        self.page
            .type_text(selectors::DESTINATION_INPUT, &self.query.destination)
            .await
            .map_err(form_err)?;
        // Let the autocomplete layer settle before touching the calendar.
        self.settle().await;

        self.page
            .click(selectors::DATE_ROW)
            .await
            .map_err(form_err)?;
        self.settle().await;
        self.require_present(selectors::DATEPICKER_TITLE).await?;

        self.step_to_target_month().await?;

        self.page
            .click_by_text(selectors::DAY_CELLS, &self.query.checkin_day.to_string())
            .await
            .map_err(form_err)?;
        self.settle().await;
        self.page
            .click_by_text(selectors::DAY_CELLS, &self.query.checkout_day.to_string())
            .await
            .map_err(form_err)?;
        self.settle().await;

        self.set_adult_count().await
    }

    /// Step the date picker forward until its header shows the target
    /// month and year, bounded by the hop limit.
    async fn step_to_target_month(&self) -> Result<(), ScrapeError> {
        let target_year = self.query.target_year.to_string();

        for _ in 0..=self.tuning.month_hop_limit {
            let month = self
                .page
                .text_of(selectors::DATEPICKER_MONTH)
                .await
                .map_err(form_err)?;
            let year = self
                .page
                .text_of(selectors::DATEPICKER_YEAR)
                .await
                .map_err(form_err)?;

            if month.trim() == self.query.target_month && year.trim() == target_year {
                return Ok(());
            }

            self.page
                .click(selectors::DATEPICKER_NEXT)
                .await
                .map_err(form_err)?;
            self.settle().await;
        }

        Err(ScrapeError::Interaction {
            selector: selectors::DATEPICKER_NEXT.to_owned(),
            reason: format!(
                "calendar never reached {} {} within {} steps",
                self.query.target_month, self.query.target_year, self.tuning.month_hop_limit
            ),
        })
    }

    /// Bring the adult counter to the requested value: open the dropdown,
    /// decrement to the known baseline of 1, then increment up. The
    /// requested count is clamped to the site's ceiling.
    async fn set_adult_count(&self) -> Result<(), ScrapeError> {
        let target = self.query.adult_count.clamp(1, MAX_ADULTS);

        self.page
            .click(selectors::PERSON_COUNT)
            .await
            .map_err(form_err)?;
        self.settle().await;
        // The dropdown sometimes needs a second click to expand fully.
        self.page
            .click(selectors::PERSON_COUNT)
            .await
            .map_err(form_err)?;
        self.settle().await;

        let mut current = self.read_adult_count().await?;
        let mut steps = 0u8;
        while current > 1 {
            self.page
                .click(selectors::ADULT_DECREMENT)
                .await
                .map_err(form_err)?;
            self.settle().await;
            current = self.read_adult_count().await?;

            steps += 1;
            if steps > MAX_ADULTS {
                return Err(ScrapeError::Interaction {
                    selector: selectors::ADULT_DECREMENT.to_owned(),
                    reason: format!("adult counter stuck at {current}"),
                });
            }
        }

        for _ in 1..target {
            self.page
                .click(selectors::ADULT_INCREMENT)
                .await
                .map_err(form_err)?;
            self.settle().await;
        }

        Ok(())
    }

    async fn read_adult_count(&self) -> Result<u8, ScrapeError> {
        let text = self
            .page
            .text_of(selectors::ADULT_VALUE)
            .await
            .map_err(form_err)?;
        text.trim()
            .parse::<u8>()
            .map_err(|_| ScrapeError::Interaction {
                selector: selectors::ADULT_VALUE.to_owned(),
                reason: format!("unreadable adult count {text:?}"),
            })
    }

    async fn submit(&self) -> Result<(), ScrapeError> {
        self.page
            .click(selectors::SEARCH_BUTTON)
            .await
            .map_err(submit_err)
    }

    /// Wait for the results container, retrying timed-out waits with
    /// exponential backoff up to the configured retry count.
    async fn await_results(&self) -> Result<(), ScrapeError> {
        retry_with_backoff(
            self.tuning.nav_max_retries,
            self.tuning.nav_retry_backoff_base_secs,
            || self.wait_for_marker(),
        )
        .await
    }

    async fn wait_for_marker(&self) -> Result<(), ScrapeError> {
        if self
            .poll_until_present(selectors::RESULTS_CONTAINER, self.tuning.nav_timeout)
            .await?
        {
            Ok(())
        } else {
            Err(ScrapeError::NavigationTimeout {
                marker: selectors::RESULTS_CONTAINER.to_owned(),
                waited_secs: self.tuning.nav_timeout.as_secs(),
            })
        }
    }

    /// Scroll and click "load more" until the status line says every
    /// listing is displayed, the round limit is hit, or the widget stops
    /// cooperating. Best-effort: failures degrade to extracting whatever
    /// has rendered so far.
    async fn expand_results(&self) {
        for round in 0..self.tuning.load_more_max_rounds {
            if let Err(e) = self.page.scroll_by(SCROLL_STEP).await {
                tracing::warn!(error = %e, "scroll failed during load-more loop");
                return;
            }

            let status = match self.page.text_of(selectors::LOAD_MORE_STATUS).await {
                Ok(s) => s,
                Err(SessionError::ElementNotFound { .. }) => {
                    tracing::debug!("no load-more status element; list complete as rendered");
                    return;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "could not read load-more status");
                    return;
                }
            };

            if status.to_lowercase().contains(selectors::ALL_DISPLAYED_MARKER) {
                tracing::debug!(rounds = round, "all listings displayed");
                return;
            }

            if let Err(e) = self.page.click(selectors::LOAD_MORE_BUTTON).await {
                tracing::warn!(error = %e, "could not click load-more; extracting what rendered");
                return;
            }
            self.settle().await;
        }

        tracing::warn!(
            max_rounds = self.tuning.load_more_max_rounds,
            "load-more loop hit its round limit"
        );
    }

    /// Require a form marker to be present within the nav timeout, mapping
    /// its absence onto [`ScrapeError::FieldNotFound`].
    async fn require_present(&self, selector: &str) -> Result<(), ScrapeError> {
        if self
            .poll_until_present(selector, self.tuning.nav_timeout)
            .await?
        {
            Ok(())
        } else {
            Err(ScrapeError::FieldNotFound {
                selector: selector.to_owned(),
            })
        }
    }

    /// Poll for `selector` until it appears or `timeout` elapses.
    async fn poll_until_present(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<bool, ScrapeError> {
        let step = if self.tuning.nav_poll.is_zero() {
            Duration::from_millis(1)
        } else {
            self.tuning.nav_poll
        };
        let mut waited = Duration::ZERO;

        loop {
            if self.page.exists(selector).await.map_err(ScrapeError::Session)? {
                return Ok(true);
            }
            if waited >= timeout {
                return Ok(false);
            }
            tokio::time::sleep(step).await;
            waited += step;
        }
    }

    async fn settle(&self) {
        if !self.tuning.settle.is_zero() {
            tokio::time::sleep(self.tuning.settle).await;
        }
    }
}
