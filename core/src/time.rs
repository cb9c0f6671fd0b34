//! Time related utils.

use crate::{Error, Result};

/// The date and time type used across signing, always in UTC.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Get the current time in UTC.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format the date portion: `20220313`.
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format as compact ISO 8601: `20220313T072004Z`.
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Format as HTTP date: `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Format as RFC 3339 with second precision: `2022-03-01T08:12:34Z`.
pub fn format_rfc3339(t: DateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse an RFC 3339 timestamp like `2022-03-01T08:12:34Z`.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| Error::unexpected(format!("invalid rfc3339 time: {s}")).with_source(e))?;
    Ok(t.with_timezone(&chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime {
        parse_rfc3339("2022-03-13T07:20:04Z").expect("time must be valid")
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(test_time()), "20220313");
    }

    #[test]
    fn test_format_iso8601() {
        assert_eq!(format_iso8601(test_time()), "20220313T072004Z");
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(test_time()), "Sun, 13 Mar 2022 07:20:04 GMT");
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_rfc3339(test_time()), "2022-03-13T07:20:04Z");
    }

    #[test]
    fn test_parse_rfc3339_roundtrip() {
        let t = parse_rfc3339("2019-11-09T13:34:41Z").expect("must parse");
        assert_eq!(format_rfc3339(t), "2019-11-09T13:34:41Z");
        assert!(parse_rfc3339("not-a-time").is_err());
    }
}
