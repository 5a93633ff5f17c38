//! One-run orchestration: drive the search, extract the rendered
//! listings, score each one, rank the scored subset.
//!
//! Per-listing failures (extraction, price normalization) are counted and
//! logged, never fatal. Flow-level failures abort the run before any
//! output exists.

use jollyscout_core::{RawListing, ResultSet, ScoredListing, SearchQuery};
use jollyscout_scraper::{
    PageDriver, ResultsPage, ScrapeError, SearchFormController, SearchTuning,
};

/// What one run produced, with per-listing skip accounting for the final
/// summary.
#[derive(Debug)]
pub struct RunReport {
    pub result: ResultSet,
    /// Listings that made it into `result.all`.
    pub extracted: usize,
    /// Cards dropped for missing required fields.
    pub skipped_extraction: usize,
    /// Listings present in `result.all` but excluded from ranking.
    pub unscored: usize,
}

/// Run the full pipeline for one query against an already-acquired page.
///
/// # Errors
///
/// Propagates [`ScrapeError`] from the search flow (missing form fields,
/// interaction failures, navigation timeout after retries, browser
/// failures). Once the results have rendered, nothing here fails the run.
pub async fn run_pipeline<P: PageDriver + ?Sized>(
    page: &P,
    base_url: &str,
    query: &SearchQuery,
    tuning: SearchTuning,
) -> Result<RunReport, ScrapeError> {
    let mut controller = SearchFormController::new(page, base_url, query, tuning);
    controller.run().await?;

    let html = page.content().await?;
    let results = ResultsPage::parse(&html);

    let mut raw: Vec<RawListing> = Vec::new();
    let mut skipped_extraction = 0usize;
    for item in results.listings() {
        match item {
            Ok(listing) => raw.push(listing),
            Err(e) => {
                skipped_extraction += 1;
                tracing::warn!(error = %e, "skipping listing — extraction failed");
            }
        }
    }

    if raw.is_empty() {
        let empty = ScrapeError::EmptyResult {
            destination: query.destination.clone(),
        };
        tracing::warn!(error = %empty, "continuing with an empty result set");
    }

    let mut unscored = 0usize;
    let mut all: Vec<ScoredListing> = Vec::with_capacity(raw.len());
    for listing in raw {
        let base = jollyscout_scoring::base_score(&listing);
        let (price, final_score) = match jollyscout_scoring::parse_price(&listing.price_text) {
            Ok(price) => (Some(price), jollyscout_scoring::final_score(base, price)),
            Err(e) => {
                tracing::warn!(
                    hotel = %listing.name,
                    error = %e,
                    "price did not normalize; listing excluded from ranking"
                );
                (None, None)
            }
        };
        if final_score.is_none() {
            unscored += 1;
        }
        all.push(ScoredListing {
            listing,
            price,
            base_score: base,
            final_score,
        });
    }

    let top_k = jollyscout_scoring::top_k(&all, jollyscout_scoring::DEFAULT_TOP_K);
    let extracted = all.len();

    tracing::info!(
        destination = %query.destination,
        extracted,
        skipped_extraction,
        unscored,
        top_k = top_k.len(),
        "pipeline finished"
    );

    Ok(RunReport {
        result: ResultSet { all, top_k },
        extracted,
        skipped_extraction,
        unscored,
    })
}
