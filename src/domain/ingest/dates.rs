//! Flexible parsing of export date cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::foundation::{Timestamp, ValidationError};

enum DateLayout {
    DateTime(&'static str),
    DateOnly(&'static str),
    Rfc3339,
}

/// Layouts seen in DraftKings and FanDuel exports, tried in order.
const LAYOUTS: &[DateLayout] = &[
    DateLayout::DateTime("%Y-%m-%d %H:%M:%S"),
    DateLayout::DateTime("%Y-%m-%dT%H:%M:%S"),
    DateLayout::Rfc3339,
    DateLayout::DateOnly("%Y-%m-%d"),
    DateLayout::DateTime("%m/%d/%Y %I:%M %p"),
    DateLayout::DateOnly("%m/%d/%Y"),
    DateLayout::DateTime("%b %d, %Y %I:%M%p"),
    DateLayout::DateTime("%b %d, %Y %I:%M %p"),
    DateLayout::DateOnly("%B %d, %Y"),
    DateLayout::DateOnly("%d-%b-%Y"),
];

/// Parses a date cell into a UTC timestamp.
///
/// Values without an offset are taken to be UTC already; date-only values
/// land on midnight.
pub fn parse_entry_date(raw: &str) -> Result<Timestamp, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field("entered_at"));
    }

    LAYOUTS
        .iter()
        .find_map(|layout| try_layout(layout, value))
        .ok_or_else(|| {
            ValidationError::invalid_format("entered_at", format!("unrecognized date '{}'", value))
        })
}

fn try_layout(layout: &DateLayout, value: &str) -> Option<Timestamp> {
    match layout {
        DateLayout::DateTime(fmt) => NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .map(Timestamp::from_naive_utc),
        DateLayout::DateOnly(fmt) => NaiveDate::parse_from_str(value, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Timestamp::from_naive_utc),
        DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Timestamp::from_datetime(dt.with_timezone(&Utc))),
    }
}
