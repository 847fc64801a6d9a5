//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a post date in the formats authors actually write
///
/// Date-time values are truncated to their date.
pub fn parse_post_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Midnight UTC of the post date, falling back to now for unparseable dates
pub fn post_timestamp(s: &str) -> DateTime<Utc> {
    parse_post_date(s)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

/// Format a post date for display (like "January 15, 2024"); unparseable
/// dates are shown as written
pub fn format_post_date(s: &str, format: &str) -> String {
    match parse_post_date(s) {
        Some(d) => d.format(format).to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_date() {
        let expected = NaiveDate::from_ymd_opt(2023, 10, 24);
        assert_eq!(parse_post_date("2023-10-24"), expected);
        assert_eq!(parse_post_date("24/10/2023"), expected);
        assert_eq!(parse_post_date("2023-10-24 10:30:00"), expected);
        assert_eq!(parse_post_date("2023-10-24T10:30:00Z"), expected);
        assert_eq!(parse_post_date("yesterday"), None);
    }

    #[test]
    fn test_post_timestamp() {
        let ts = post_timestamp("2024-01-15");
        assert_eq!(ts.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_format_post_date() {
        assert_eq!(format_post_date("2024-01-15", "%B %d, %Y"), "January 15, 2024");
        assert_eq!(format_post_date("soon", "%B %d, %Y"), "soon");
    }
}
