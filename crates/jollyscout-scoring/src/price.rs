//! Turkish-locale price string normalization.
//!
//! The site renders prices as `"43.990,00 TL"`: `.` is the thousands
//! separator, `,` the decimal separator, with a trailing currency marker.
//! Parsing is plain string scanning; no locale library is involved.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceParseError {
    #[error("empty price string {raw:?}")]
    Empty { raw: String },

    #[error("multiple decimal separators in {raw:?}")]
    MultipleDecimalSeparators { raw: String },

    #[error("price body {normalized:?} (from {raw:?}) is not a valid non-negative number")]
    Invalid { raw: String, normalized: String },
}

/// Parse a locale-formatted price string into a numeric value.
///
/// Steps, in order:
/// 1. Trim and strip a trailing `"TL"` currency marker.
/// 2. Drop all `.` characters (thousands separators).
/// 3. Replace the single `,` (decimal separator) with `.`.
/// 4. Parse the remainder as `f64`; it must be finite and non-negative.
///
/// `"43.990,00 TL"` → `43990.0`. Larger rendered prices always normalize
/// to larger numbers.
///
/// # Errors
///
/// Returns [`PriceParseError`] when the input has no numeric body, carries
/// more than one decimal separator, or leaves anything but digits and one
/// decimal point after normalization.
pub fn parse_price(raw: &str) -> Result<f64, PriceParseError> {
    let body = raw.trim();
    let body = body.strip_suffix("TL").unwrap_or(body).trim();

    if body.is_empty() {
        return Err(PriceParseError::Empty {
            raw: raw.to_owned(),
        });
    }

    if body.matches(',').count() > 1 {
        return Err(PriceParseError::MultipleDecimalSeparators {
            raw: raw.to_owned(),
        });
    }

    let normalized: String = body
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    // Reject any leftover non-numeric characters up front: `f64::from_str`
    // would otherwise accept forms like "inf", "nan", or exponents that a
    // rendered price never contains.
    let digits_only = normalized
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.');
    if !digits_only || normalized.is_empty() {
        return Err(PriceParseError::Invalid {
            raw: raw.to_owned(),
            normalized,
        });
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(PriceParseError::Invalid {
            raw: raw.to_owned(),
            normalized,
        }),
    }
}
