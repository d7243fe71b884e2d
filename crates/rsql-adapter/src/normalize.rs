use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rsql_model::Scalar;

/// Coerces ISO-8601-like date/time text into a date value; anything else
/// passes through unchanged. Applied only to range-comparison operands so
/// that equality and pattern matching keep their textual semantics.
pub fn normalize(raw: &str) -> Scalar {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Scalar::Timestamp(ts.to_utc());
    }

    // Offset-less datetime, with or without seconds/fraction; read as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Scalar::Timestamp(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Scalar::Date(date);
    }

    Scalar::Text(raw.to_string())
}
