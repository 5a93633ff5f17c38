//! Value scoring for extracted hotel listings.
//!
//! Normalizes Turkish-locale price strings, computes an additive base
//! score from listing attributes, derives the price-weighted final score,
//! and selects the top-K listings by final score. Everything in this crate
//! is pure and browser-free.

pub mod price;
pub mod rank;
pub mod scorer;

pub use price::{parse_price, PriceParseError};
pub use rank::{top_k, DEFAULT_TOP_K};
pub use scorer::{base_score, final_score};
