//! Calendar-day helpers.
//!
//! All streak rules compare dates, never instants. Callers should pick one
//! calendar (normally the local one) and stick to it for a whole run.

use chrono::{Local, NaiveDate};

use crate::error::ValidationError;

/// Today's date on the local calendar, with the time of day dropped.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The calendar day before `date`, saturating at the earliest representable date.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        ValidationError::InvalidValue {
            field: "date".to_string(),
            message: format!("'{input}' is not a YYYY-MM-DD date: {e}"),
        }
    })
}
