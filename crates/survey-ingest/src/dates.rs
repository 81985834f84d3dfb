//! Submission date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

/// Calendar date of a submission timestamp.
///
/// Accepts RFC 3339 timestamps (the offset is ignored, the local date is
/// kept), naive date-times and plain dates.
pub fn parse_submission_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Kobo-style "2025-07-24T10:11:12.000+01:00" without a colon in the offset.
    trimmed
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn parses_common_shapes() {
        assert_eq!(parse_submission_date("2025-07-24"), date(2025, 7, 24));
        assert_eq!(parse_submission_date("2025-07-24T10:11:12.345+01:00"), date(2025, 7, 24));
        assert_eq!(parse_submission_date("2025-07-24 08:00:00"), date(2025, 7, 24));
        assert_eq!(parse_submission_date("24/07/2025"), date(2025, 7, 24));
        assert_eq!(parse_submission_date("2025-07-24T10:11:12.000+0100"), date(2025, 7, 24));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_submission_date(""), None);
        assert_eq!(parse_submission_date("yesterday"), None);
    }
}
