//! W3CDTF creation-timestamp normalisation.

use biomodels_common::error::{BioModelsError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a `dcterms:W3CDTF` value into a calendar date.
///
/// Accepts RFC 3339 timestamps (`2005-02-02T14:56:11Z`), naive timestamps
/// with or without fractional seconds, and bare `YYYY-MM-DD` dates. The date
/// is taken as written; no timezone conversion is applied.
pub fn parse_w3cdtf(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| BioModelsError::Date(raw.to_string()))
}

/// Render a date the way node attributes carry it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
