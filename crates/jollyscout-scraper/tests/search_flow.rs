//! Search-flow tests against a scripted fake page.
//!
//! The fake implements [`PageDriver`] with a small scripted model of the
//! site: a calendar that steps month by month, an adult counter, a results
//! container that appears after a configurable number of polls, and a
//! load-more status line. No browser is involved; backoff and settle
//! delays are zeroed so every scenario runs instantly.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use jollyscout_core::SearchQuery;
use jollyscout_scraper::{
    selectors, PageDriver, ResultsPage, ScrapeError, SearchFormController, SearchPhase,
    SearchTuning, SessionError,
};

struct FakeState {
    /// Selectors that behave as absent from the page.
    missing: HashSet<&'static str>,
    /// Selectors that exist but refuse clicks.
    not_clickable: HashSet<&'static str>,
    /// Calendar header sequence; `DATEPICKER_NEXT` advances through it.
    months: Vec<(&'static str, &'static str)>,
    month_index: usize,
    adult_count: u8,
    /// Results-marker polls before `exists` reports it; `None` = never.
    results_appear_after: Option<u32>,
    results_polls: u32,
    /// Status line per load-more round.
    load_status: Vec<&'static str>,
    load_round: usize,
    html: String,
    log: Vec<String>,
}

struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                missing: HashSet::new(),
                not_clickable: HashSet::new(),
                months: vec![("Temmuz", "2025"), ("Ağustos", "2025")],
                month_index: 0,
                adult_count: 2,
                results_appear_after: Some(0),
                results_polls: 0,
                load_status: vec!["Otellerin tamamını görüntülediniz"],
                load_round: 0,
                html: String::new(),
                log: Vec::new(),
            }),
        }
    }

    fn with_missing(self, selector: &'static str) -> Self {
        self.state.lock().unwrap().missing.insert(selector);
        self
    }

    fn with_not_clickable(self, selector: &'static str) -> Self {
        self.state.lock().unwrap().not_clickable.insert(selector);
        self
    }

    fn with_months(self, months: Vec<(&'static str, &'static str)>) -> Self {
        self.state.lock().unwrap().months = months;
        self
    }

    fn with_adults(self, count: u8) -> Self {
        self.state.lock().unwrap().adult_count = count;
        self
    }

    fn with_results_after(self, polls: Option<u32>) -> Self {
        self.state.lock().unwrap().results_appear_after = polls;
        self
    }

    fn with_load_status(self, status: Vec<&'static str>) -> Self {
        self.state.lock().unwrap().load_status = status;
        self
    }

    fn with_html(self, html: &str) -> Self {
        self.state.lock().unwrap().html = html.to_owned();
        self
    }

    fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }

    fn count_in_log(&self, entry: &str) -> usize {
        self.log().iter().filter(|l| l.as_str() == entry).count()
    }

    fn adult_count(&self) -> u8 {
        self.state.lock().unwrap().adult_count
    }

    fn results_polls(&self) -> u32 {
        self.state.lock().unwrap().results_polls
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.state.lock().unwrap().log.push(format!("goto:{url}"));
        Ok(())
    }

    async fn exists(&self, selector: &str) -> Result<bool, SessionError> {
        let mut state = self.state.lock().unwrap();
        if selector == selectors::RESULTS_CONTAINER {
            let seen = state.results_polls;
            state.results_polls += 1;
            return Ok(state.results_appear_after.is_some_and(|after| seen >= after));
        }
        Ok(!state.missing.contains(selector))
    }

    async fn click(&self, selector: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        if state.missing.contains(selector) {
            return Err(SessionError::ElementNotFound {
                selector: selector.to_owned(),
            });
        }
        if state.not_clickable.contains(selector) {
            return Err(SessionError::NotInteractable {
                selector: selector.to_owned(),
                reason: "obscured by overlay".to_owned(),
            });
        }

        match selector {
            s if s == selectors::DATEPICKER_NEXT => {
                if state.month_index + 1 < state.months.len() {
                    state.month_index += 1;
                }
            }
            s if s == selectors::ADULT_DECREMENT => {
                state.adult_count = state.adult_count.saturating_sub(1).max(1);
            }
            s if s == selectors::ADULT_INCREMENT => {
                state.adult_count += 1;
            }
            s if s == selectors::LOAD_MORE_BUTTON => {
                state.load_round += 1;
            }
            _ => {}
        }

        state.log.push(format!("click:{selector}"));
        Ok(())
    }

    async fn click_by_text(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        if state.missing.contains(selector) {
            return Err(SessionError::ElementNotFound {
                selector: selector.to_owned(),
            });
        }
        state.log.push(format!("click_text:{selector}:{text}"));
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        if state.missing.contains(selector) {
            return Err(SessionError::ElementNotFound {
                selector: selector.to_owned(),
            });
        }
        state.log.push(format!("type:{selector}:{text}"));
        Ok(())
    }

    async fn text_of(&self, selector: &str) -> Result<String, SessionError> {
        let state = self.state.lock().unwrap();
        match selector {
            s if s == selectors::DATEPICKER_MONTH => {
                Ok(state.months[state.month_index].0.to_owned())
            }
            s if s == selectors::DATEPICKER_YEAR => {
                Ok(state.months[state.month_index].1.to_owned())
            }
            s if s == selectors::ADULT_VALUE => Ok(state.adult_count.to_string()),
            s if s == selectors::LOAD_MORE_STATUS => state
                .load_status
                .get(state.load_round)
                .map(|s| (*s).to_owned())
                .ok_or_else(|| SessionError::ElementNotFound {
                    selector: selector.to_owned(),
                }),
            _ => Ok(String::new()),
        }
    }

    async fn scroll_by(&self, delta_y: i64) -> Result<(), SessionError> {
        self.state
            .lock()
            .unwrap()
            .log
            .push(format!("scroll:{delta_y}"));
        Ok(())
    }

    async fn content(&self) -> Result<String, SessionError> {
        Ok(self.state.lock().unwrap().html.clone())
    }
}

fn query() -> SearchQuery {
    SearchQuery {
        destination: "Ölüdeniz".to_owned(),
        target_month: "Ağustos".to_owned(),
        target_year: 2025,
        checkin_day: 4,
        checkout_day: 8,
        adult_count: 3,
    }
}

/// Tuning with zeroed waits so failure scenarios do not actually sleep.
fn instant_tuning() -> SearchTuning {
    SearchTuning {
        nav_timeout: Duration::ZERO,
        nav_poll: Duration::from_millis(1),
        nav_max_retries: 2,
        nav_retry_backoff_base_secs: 0,
        settle: Duration::ZERO,
        month_hop_limit: 18,
        load_more_max_rounds: 10,
    }
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn happy_path_reaches_results_loaded() {
    let page = FakePage::new();
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());
    assert_eq!(controller.phase(), SearchPhase::Idle);

    let result = controller.run().await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert_eq!(controller.phase(), SearchPhase::ResultsLoaded);

    let log = page.log();
    assert!(log.contains(&"goto:https://www.jollytur.com/".to_owned()));
    assert!(log.contains(&format!(
        "type:{}:Ölüdeniz",
        selectors::DESTINATION_INPUT
    )));
    // Check-in before check-out, addressed by day text.
    let checkin = log
        .iter()
        .position(|l| l == &format!("click_text:{}:4", selectors::DAY_CELLS));
    let checkout = log
        .iter()
        .position(|l| l == &format!("click_text:{}:8", selectors::DAY_CELLS));
    assert!(checkin.unwrap() < checkout.unwrap());
}

#[tokio::test]
async fn calendar_steps_forward_until_target_month() {
    let page = FakePage::new().with_months(vec![
        ("Haziran", "2025"),
        ("Temmuz", "2025"),
        ("Ağustos", "2025"),
    ]);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    controller.run().await.unwrap();
    assert_eq!(
        page.count_in_log(&format!("click:{}", selectors::DATEPICKER_NEXT)),
        2
    );
}

#[tokio::test]
async fn adult_counter_resets_to_one_then_increments() {
    let page = FakePage::new().with_adults(5);
    let q = query(); // wants 3 adults
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    controller.run().await.unwrap();
    assert_eq!(page.adult_count(), 3);
    assert_eq!(
        page.count_in_log(&format!("click:{}", selectors::ADULT_DECREMENT)),
        4
    );
    assert_eq!(
        page.count_in_log(&format!("click:{}", selectors::ADULT_INCREMENT)),
        2
    );
}

#[tokio::test]
async fn adult_count_is_capped_at_site_limit() {
    let page = FakePage::new().with_adults(1);
    let mut q = query();
    q.adult_count = 14;
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    controller.run().await.unwrap();
    assert_eq!(page.adult_count(), 9);
}

#[tokio::test]
async fn load_more_clicks_until_all_displayed() {
    let page = FakePage::new().with_load_status(vec![
        "30 otelden 10 tanesini görüntülediniz",
        "30 otelden 20 tanesini görüntülediniz",
        "Otellerin tamamını görüntülediniz",
    ]);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    controller.run().await.unwrap();
    assert_eq!(controller.phase(), SearchPhase::ResultsLoaded);
    assert_eq!(
        page.count_in_log(&format!("click:{}", selectors::LOAD_MORE_BUTTON)),
        2
    );
}

// ---------------------------------------------------------------------------
// Failure classes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_destination_field_is_field_not_found() {
    let page = FakePage::new().with_missing(selectors::DESTINATION_INPUT);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    let err = controller.run().await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::FieldNotFound { ref selector } if selector == selectors::DESTINATION_INPUT),
        "got: {err:?}"
    );
    assert_eq!(controller.phase(), SearchPhase::Error);
}

#[tokio::test]
async fn missing_date_row_is_field_not_found() {
    let page = FakePage::new().with_missing(selectors::DATE_ROW);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    let err = controller.run().await.unwrap_err();
    assert!(matches!(err, ScrapeError::FieldNotFound { .. }), "got: {err:?}");
}

#[tokio::test]
async fn unclickable_search_button_is_interaction_error() {
    let page = FakePage::new().with_not_clickable(selectors::SEARCH_BUTTON);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    let err = controller.run().await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::Interaction { ref selector, .. } if selector == selectors::SEARCH_BUTTON),
        "got: {err:?}"
    );
    assert_eq!(controller.phase(), SearchPhase::Error);
}

#[tokio::test]
async fn missing_search_button_is_interaction_error_not_field_error() {
    let page = FakePage::new().with_missing(selectors::SEARCH_BUTTON);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    let err = controller.run().await.unwrap_err();
    assert!(matches!(err, ScrapeError::Interaction { .. }), "got: {err:?}");
}

#[tokio::test]
async fn unreachable_target_month_is_interaction_error() {
    let page = FakePage::new().with_months(vec![("Ocak", "2025")]);
    let q = query();
    let mut tuning = instant_tuning();
    tuning.month_hop_limit = 3;
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, tuning);

    let err = controller.run().await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::Interaction { ref reason, .. } if reason.contains("Ağustos")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn results_never_rendering_times_out_after_retries() {
    let page = FakePage::new().with_results_after(None);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    let err = controller.run().await.unwrap_err();
    assert!(
        matches!(err, ScrapeError::NavigationTimeout { .. }),
        "got: {err:?}"
    );
    assert_eq!(controller.phase(), SearchPhase::Error);
    // nav_max_retries=2 → 3 total wait attempts, one poll each with a zero timeout.
    assert_eq!(page.results_polls(), 3);
}

#[tokio::test]
async fn results_rendering_on_second_attempt_succeeds() {
    let page = FakePage::new().with_results_after(Some(1));
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    controller.run().await.unwrap();
    assert_eq!(controller.phase(), SearchPhase::ResultsLoaded);
    assert_eq!(page.results_polls(), 2);
}

// ---------------------------------------------------------------------------
// Flow + extraction together
// ---------------------------------------------------------------------------

#[tokio::test]
async fn loaded_page_content_extracts_listings() {
    let html = r##"<html><body><div class="search-list">
        <div class="list" data-url="/hotel-a">
            <span class="hotel-name">Hotel A</span>
            <div class="total-price"><span class="current-price">10.000,00 TL</span></div>
            <div class="meal-type-info"><div class="info">Her Şey Dahil</div></div>
        </div>
        <div class="list" data-url="/hotel-b">
            <span class="hotel-name">Hotel B</span>
            <div class="total-price"><span class="current-price">8.500,00 TL</span></div>
        </div>
    </div></body></html>"##;
    let page = FakePage::new().with_html(html);
    let q = query();
    let mut controller =
        SearchFormController::new(&page, "https://www.jollytur.com/", &q, instant_tuning());

    controller.run().await.unwrap();

    let content = page.content().await.unwrap();
    let results = ResultsPage::parse(&content);
    let listings: Vec<_> = results.listings().collect::<Result<_, _>>().unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].name, "Hotel A");
    assert_eq!(
        listings[0].accommodation_type.as_deref(),
        Some("Her Şey Dahil")
    );
    assert_eq!(listings[1].name, "Hotel B");
}
