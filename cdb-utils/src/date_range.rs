use crate::dates::{days_ago, format_date};
use crate::error::DateRangeError;
use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use std::mem::replace;

/// An inclusive pair of calendar dates with `start <= end`.
/// Built only through [`DateRange::new`] and the windows derived from it.
#[derive(Clone, Eq, PartialEq, Copy, Debug, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted {
                start: format_date(&start),
                end: format_date(&end),
            });
        }
        Ok(Self { start, end })
    }

    /// The last `days` days ending at `today`: `[today - (days - 1), today]`.
    /// A zero-day window is widened to a single day.
    pub fn ending_at(today: NaiveDate, days: u32) -> Result<Self, DateRangeError> {
        let span = i64::from(days.max(1)) - 1;
        Ok(Self {
            start: days_ago(today, span)?,
            end: today,
        })
    }

    /// The range from `from` days ago through `to` days ago.
    pub fn days_ago(today: NaiveDate, from: i64, to: i64) -> Result<Self, DateRangeError> {
        Self::new(days_ago(today, from)?, days_ago(today, to)?)
    }

    pub fn start_iso(&self) -> String {
        format_date(&self.start)
    }

    pub fn end_iso(&self) -> String {
        format_date(&self.end)
    }

    /// Human-readable label used on comparison charts.
    pub fn label(&self) -> String {
        format!("{} → {}", self.start_iso(), self.end_iso())
    }

    /// Number of calendar days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every date from start through end.
    pub fn days(&self) -> Days {
        Days(self.start, self.end)
    }
}

/// Iterator yielding each date of a [`DateRange`] in order.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct Days(NaiveDate, NaiveDate);

impl Iterator for Days {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::try_days(1)?;
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use crate::error::DateRangeError;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_iteration() {
        let range = DateRange::new(ymd(2022, 1, 1), ymd(2022, 1, 5)).unwrap();
        let dates: Vec<NaiveDate> = range.days().collect();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], ymd(2022, 1, 1));
        assert_eq!(dates[4], ymd(2022, 1, 5));
        assert_eq!(range.len_days(), 5);
    }

    #[test]
    fn test_date_range_single_day() {
        let start = ymd(2022, 3, 15);
        let range = DateRange::new(start, start).unwrap();
        let dates: Vec<NaiveDate> = range.days().collect();
        assert_eq!(dates, vec![start]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(ymd(2022, 3, 15), ymd(2022, 3, 14)).unwrap_err();
        assert_eq!(
            err,
            DateRangeError::Inverted {
                start: "2022-03-15".to_string(),
                end: "2022-03-14".to_string(),
            }
        );
    }

    #[test]
    fn test_window_ending_today() {
        let today = ymd(2026, 10, 16);
        let week = DateRange::ending_at(today, 7).unwrap();
        assert_eq!(week.start_iso(), "2026-10-10");
        assert_eq!(week.end_iso(), "2026-10-16");
        assert_eq!(week.len_days(), 7);

        let zero = DateRange::ending_at(today, 0).unwrap();
        assert_eq!(zero.start, today);
        assert_eq!(zero.end, today);
    }

    #[test]
    fn test_huge_window_is_an_error() {
        let today = ymd(2026, 10, 16);
        assert_eq!(
            DateRange::ending_at(today, 200_000_000),
            Err(DateRangeError::OutOfRange { days: 199_999_999 })
        );
        assert!(DateRange::ending_at(today, u32::MAX).is_err());
    }

    #[test]
    fn test_days_ago_range_and_label() {
        let today = ymd(2026, 10, 16);
        let range = DateRange::days_ago(today, 14, 7).unwrap();
        assert_eq!(range.label(), "2026-10-02 → 2026-10-09");
        assert!(DateRange::days_ago(today, 0, 7).is_err());
    }
}
