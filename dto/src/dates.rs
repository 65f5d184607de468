use crate::error::DtoError::InvalidDate;
use crate::error::Result;
use chrono::NaiveDate;

const INPUT_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parse a calendar date typed by a user or read from a cache.
/// Malformed dates are rejected rather than being treated as missing.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_FORMAT).map_err(|_| InvalidDate(value.to_owned()))
}

/// Format a date the way it is shown to gym staff (`dd/mm/yyyy`).
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}
