//! Shared utility functions for the clinical dashboard crates.

pub mod date_range;

pub use date_range::DateRange;

/// Date utility functions
pub mod dates {
    use crate::error::DateRangeError;
    use chrono::{Local, NaiveDate, TimeDelta};

    /// ISO calendar date format used by every dashboard endpoint: "YYYY-MM-DD"
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// Today's date in the local timezone of the host (browser or OS).
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// The date `days` calendar days before `today`, or an error when that
    /// falls outside the calendar chrono can represent.
    pub fn days_ago(today: NaiveDate, days: i64) -> Result<NaiveDate, DateRangeError> {
        TimeDelta::try_days(days)
            .and_then(|delta| today.checked_sub_signed(delta))
            .ok_or(DateRangeError::OutOfRange { days })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_other_formats() {
            assert!(parse_date("15/06/2023").is_err());
            assert!(parse_date("").is_err());
        }

        #[test]
        fn test_days_ago_crosses_month_boundary() {
            let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
            assert_eq!(
                days_ago(today, 2),
                Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
            );
            assert_eq!(days_ago(today, 0), Ok(today));
        }

        #[test]
        fn test_days_ago_beyond_calendar_is_an_error() {
            let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
            assert_eq!(
                days_ago(today, 200_000_000),
                Err(DateRangeError::OutOfRange { days: 200_000_000 })
            );
            assert!(days_ago(today, i64::MAX).is_err());
        }
    }
}

/// Locale-style number formatting for KPI display slots.
pub mod format {
    /// Format a count with a thousands separator, e.g. `1234567` -> `"1.234.567"`
    /// for an Italian-style `'.'` separator.
    pub fn format_count(value: u64, separator: char) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(separator);
            }
            out.push(ch);
        }
        out
    }

    /// Percentage of `part` over `total` with one decimal, e.g. `"52.0 %"`.
    /// A zero total yields `"0.0 %"`.
    pub fn format_percent(part: u64, total: u64) -> String {
        if total == 0 {
            return "0.0 %".to_string();
        }
        format!("{:.1} %", part as f64 * 100.0 / total as f64)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_count() {
            assert_eq!(format_count(0, '.'), "0");
            assert_eq!(format_count(999, '.'), "999");
            assert_eq!(format_count(1000, '.'), "1.000");
            assert_eq!(format_count(1234567, ','), "1,234,567");
            assert_eq!(format_count(100000, '.'), "100.000");
        }

        #[test]
        fn test_format_percent() {
            assert_eq!(format_percent(130, 250), "52.0 %");
            assert_eq!(format_percent(120, 250), "48.0 %");
            assert_eq!(format_percent(1, 3), "33.3 %");
            assert_eq!(format_percent(5, 0), "0.0 %");
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DateRangeError {
        /// The start falls after the end.
        Inverted { start: String, end: String },
        /// Stepping back `days` days leaves the representable calendar.
        OutOfRange { days: i64 },
    }

    impl fmt::Display for DateRangeError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                DateRangeError::Inverted { start, end } => {
                    write!(f, "Date range error: start {} is after end {}", start, end)
                }
                DateRangeError::OutOfRange { days } => {
                    write!(f, "Date range error: {} days back is outside the calendar", days)
                }
            }
        }
    }

    impl std::error::Error for DateRangeError {}
}
