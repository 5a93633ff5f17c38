//! Listing extraction from the rendered results page.
//!
//! Turns the results document into a lazy sequence of [`RawListing`]
//! records. A card missing a required field (`name`, `price_text`) yields
//! a per-card [`ExtractError`] instead of aborting the sequence; optional
//! fields default to absent/empty. Cards flagged unavailable are skipped
//! outright.

use jollyscout_core::RawListing;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::selectors;

/// A single listing card could not be extracted. Never fatal to the run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("listing card {index} is missing required field {field}")]
    MissingField { index: usize, field: &'static str },
}

/// A parsed results document, ready to yield listing records.
pub struct ResultsPage {
    doc: Html,
    sel: CardSelectors,
}

struct CardSelectors {
    card: Selector,
    unavailable: Selector,
    name: Selector,
    price: Selector,
    cancel_policy: Selector,
    recommended: Selector,
    features: Selector,
    board_type: Selector,
    location: Selector,
    /// Strips markup from HTML-bearing data attributes (cancel policy
    /// popover content).
    tag_re: Regex,
}

impl CardSelectors {
    fn new() -> Self {
        Self {
            card: Selector::parse(selectors::LISTING_CARD).expect("valid selector"),
            unavailable: Selector::parse(selectors::LISTING_UNAVAILABLE).expect("valid selector"),
            name: Selector::parse(selectors::LISTING_NAME).expect("valid selector"),
            price: Selector::parse(selectors::LISTING_PRICE).expect("valid selector"),
            cancel_policy: Selector::parse(selectors::LISTING_CANCEL_POLICY)
                .expect("valid selector"),
            recommended: Selector::parse(selectors::LISTING_RECOMMENDED).expect("valid selector"),
            features: Selector::parse(selectors::LISTING_FEATURES).expect("valid selector"),
            board_type: Selector::parse(selectors::LISTING_BOARD_TYPE).expect("valid selector"),
            location: Selector::parse(selectors::LISTING_LOCATION).expect("valid selector"),
            tag_re: Regex::new(r"<[^>]*>").expect("valid regex"),
        }
    }
}

/// Whitespace-normalized text content of an element.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl ResultsPage {
    /// Parse the rendered results document.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
            sel: CardSelectors::new(),
        }
    }

    /// Lazily yield one record per available listing card, in document
    /// order. The sequence is finite and single-pass; each card is read
    /// exactly once as the iterator advances.
    pub fn listings(&self) -> impl Iterator<Item = Result<RawListing, ExtractError>> + '_ {
        self.doc
            .select(&self.sel.card)
            .filter(|card| card.select(&self.sel.unavailable).next().is_none())
            .enumerate()
            .map(move |(index, card)| self.extract_card(index, card))
    }

    fn extract_card(
        &self,
        index: usize,
        card: ElementRef<'_>,
    ) -> Result<RawListing, ExtractError> {
        let name = card
            .select(&self.sel.name)
            .next()
            .map(text_of)
            .filter(|s| !s.is_empty())
            .ok_or(ExtractError::MissingField {
                index,
                field: "name",
            })?;

        let price_text = card
            .select(&self.sel.price)
            .next()
            .map(text_of)
            .filter(|s| !s.is_empty())
            .ok_or(ExtractError::MissingField {
                index,
                field: "price_text",
            })?;

        // The cancellation policy lives in the badge's popover attribute as
        // an HTML fragment; strip the markup down to plain text.
        let cancel_policy = card
            .select(&self.sel.cancel_policy)
            .next()
            .and_then(|el| el.value().attr("data-content"))
            .map(|html| self.sel.tag_re.replace_all(html, "").trim().to_owned())
            .filter(|s| !s.is_empty());

        let recommended_hotel = card.select(&self.sel.recommended).next().map(|el| {
            el.value()
                .attr("data-content")
                .map_or_else(|| text_of(el), str::to_owned)
        });

        let hotel_features: Vec<String> = card
            .select(&self.sel.features)
            .map(text_of)
            .filter(|s| !s.is_empty())
            .collect();

        let accommodation_type = card
            .select(&self.sel.board_type)
            .next()
            .map(text_of)
            .filter(|s| !s.is_empty());

        let detail_url = card.value().attr("data-url").map(str::to_owned);

        let location = card
            .select(&self.sel.location)
            .next()
            .map(text_of)
            .filter(|s| !s.is_empty());

        Ok(RawListing {
            name,
            price_text,
            cancel_policy,
            recommended_hotel,
            hotel_features,
            accommodation_type,
            detail_url,
            location,
        })
    }
}
