//! Top-K selection over scored listings.

use std::cmp::Ordering;

use jollyscout_core::ScoredListing;

/// How many listings the ranked output artifact carries.
pub const DEFAULT_TOP_K: usize = 10;

/// Select the `k` highest-`final_score` listings.
///
/// Unranked listings (no final score) are dropped first. The sort is
/// descending by final score and stable, so listings with equal scores keep
/// their crawl order — applying this twice to the same input yields the
/// same output. Fewer than `k` ranked listings is not an error; all of
/// them are returned.
#[must_use]
pub fn top_k(listings: &[ScoredListing], k: usize) -> Vec<ScoredListing> {
    let mut ranked: Vec<ScoredListing> = listings
        .iter()
        .filter(|l| l.is_ranked())
        .cloned()
        .collect();

    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    ranked
}
