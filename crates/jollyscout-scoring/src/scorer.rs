//! Additive value scoring for hotel listings.

use jollyscout_core::RawListing;

/// Substring marking a risk-free cancellation policy on the card popover.
pub(crate) const RISK_FREE_MARKER: &str = "Risksiz rezervasyon";

/// Board-type score tiers, checked in order against the lowercased
/// accommodation text; the first matching substring wins. "Ultra her şey
/// dahil" must precede "her şey dahil" — the latter is a substring of the
/// former.
pub(crate) const BOARD_TIERS: &[(&str, f64)] = &[
    ("ultra her şey dahil", 2.0),
    ("her şey dahil", 1.5),
    ("yarım pansiyon", 1.0),
    ("oda kahvaltı", 0.5),
    ("sadece oda", 0.3),
];

/// Per-amenity contribution to the base score.
const FEATURE_WEIGHT: f64 = 0.05;

/// Compute the additive base score for a listing.
///
/// Starts at 0.0 and adds: +1.0 for a risk-free cancellation policy, +1.0
/// when the recommendation badge is present, +0.05 per listed amenity, and
/// the board-tier weight from [`BOARD_TIERS`]. Unrecognized board types
/// add nothing. Pure and reproducible.
#[must_use]
pub fn base_score(listing: &RawListing) -> f64 {
    let mut score = 0.0_f64;

    if listing
        .cancel_policy
        .as_deref()
        .is_some_and(|policy| policy.contains(RISK_FREE_MARKER))
    {
        score += 1.0;
    }

    if listing.recommended_hotel.is_some() {
        score += 1.0;
    }

    #[allow(clippy::cast_precision_loss)]
    {
        score += FEATURE_WEIGHT * listing.hotel_features.len() as f64;
    }

    if let Some(board) = listing.accommodation_type.as_deref() {
        let board = board.trim().to_lowercase();
        for &(tier, weight) in BOARD_TIERS {
            if board.contains(tier) {
                score += weight;
                break;
            }
        }
    }

    score
}

/// Derive the value-for-money final score: `base / price`.
///
/// Returns `None` when the price is not a finite positive number — such
/// listings are excluded from ranking rather than scored against a
/// placeholder price.
#[must_use]
pub fn final_score(base: f64, price: f64) -> Option<f64> {
    if price.is_finite() && price > 0.0 {
        Some(base / price)
    } else {
        None
    }
}
