//! Date formatting for timestamps coming from the API.

use chrono::{DateTime, NaiveDate};

fn parse_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value.split('T').next()?, "%Y-%m-%d").ok())
}

/// Format an ISO date or datetime as "Mar 15, 2024".
/// Unparseable input is returned unchanged.
pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Same as [`format_date`] for optional fields, with a dash for missing values.
pub fn format_optional_date(value: Option<&str>) -> String {
    value.map(format_date).unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "Mar 15, 2024");
        assert_eq!(format_date("2024-03-05T14:02:26.123Z"), "Mar 5, 2024");
        assert_eq!(format_date("2024-12-31T23:59:59+03:00"), "Dec 31, 2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_optional_date(None), "—");
    }
}
