//! Domain types for one search run: the query, extracted listings, scored
//! listings, and the final result set.

use serde::{Deserialize, Serialize};

/// One hotel search: destination, stay window, and party size.
///
/// `target_month` is the month name exactly as the site's date picker
/// displays it (localized, e.g. `"Ağustos"`). Day ordering is assumed
/// valid; a nonsensical window surfaces as a form-interaction failure, not
/// a validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub destination: String,
    pub target_month: String,
    pub target_year: i32,
    pub checkin_day: u8,
    pub checkout_day: u8,
    pub adult_count: u8,
}

/// A single listing card as extracted from the rendered results page.
///
/// `name` and `price_text` are required at extraction time; everything else
/// defaults to absent/empty when the card does not render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    /// Hotel display name.
    pub name: String,
    /// Price exactly as rendered, locale-formatted (e.g. `"43.990,00 TL"`).
    pub price_text: String,
    /// Cancellation policy text, tag-stripped from the card's popover.
    #[serde(default)]
    pub cancel_policy: Option<String>,
    /// Recommendation badge content; presence alone carries scoring weight.
    #[serde(default)]
    pub recommended_hotel: Option<String>,
    /// Amenity labels listed on the card. Possibly empty.
    #[serde(default)]
    pub hotel_features: Vec<String>,
    /// Board type as displayed (e.g. `"Ultra Her Şey Dahil"`).
    #[serde(default)]
    pub accommodation_type: Option<String>,
    /// Relative or absolute URL of the hotel detail page.
    #[serde(default)]
    pub detail_url: Option<String>,
    /// Location label from the card.
    #[serde(default)]
    pub location: Option<String>,
}

/// A [`RawListing`] with its derived pricing and score fields.
///
/// Created once per listing and never mutated. `price` and `final_score`
/// are absent when the price text did not normalize to a positive number;
/// such listings stay in the full result set but are excluded from ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: RawListing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub base_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

impl ScoredListing {
    /// Whether this listing participates in ranking.
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.final_score.is_some()
    }
}

/// Everything one run produces: all scored listings in crawl order, plus
/// the top-K subset in rank order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub all: Vec<ScoredListing>,
    pub top_k: Vec<ScoredListing>,
}
