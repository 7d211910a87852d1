//! Numeric coercion for catalog fields and user input
//!
//! Two flavours live here: the lenient `parse_numeric` used for anything a
//! user types, which turns bad input into `None`, and the strict coercions
//! used when parsing catalog lines, which reject non-numeric text.

use crate::{Error, Result};

/// Parse text as a float, returning `None` for missing, blank or non-numeric input
pub fn parse_numeric(text: Option<&str>) -> Option<f64> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Whether the text reads as a number
pub fn is_numeric(text: &str) -> bool {
    parse_numeric(Some(text)).is_some()
}

/// Coerce a raw mass field; absent or blank stays absent
pub fn coerce_mass(raw: Option<&str>) -> Result<Option<f64>> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => value.parse::<f64>().map(Some).map_err(|e| {
            Error::parse(format!("Invalid mass value '{}' ({})", value, e))
        }),
    }
}

/// Coerce a raw year field; fractional text such as "1990.0" is rejected
pub fn coerce_year(raw: Option<&str>) -> Result<Option<i32>> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => value.parse::<i32>().map(Some).map_err(|e| {
            Error::parse(format!("Invalid year value '{}' ({})", value, e))
        }),
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
