//! Labelled points for the time-series and category charts.

use cdb_api::models::{DailyIncidence, PeriodComparison, ProvinceCount};
use cdb_utils::DateRange;

/// Shown in place of a missing category name.
pub const MISSING_LABEL: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u64,
}

impl From<&DailyIncidence> for SeriesPoint {
    fn from(day: &DailyIncidence) -> Self {
        SeriesPoint {
            label: day.date.clone(),
            value: day.value,
        }
    }
}

impl From<&ProvinceCount> for SeriesPoint {
    fn from(row: &ProvinceCount) -> Self {
        let label = match row.province.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => MISSING_LABEL.to_string(),
        };
        SeriesPoint {
            label,
            value: row.value,
        }
    }
}

pub fn incidence_points(days: &[DailyIncidence]) -> Vec<SeriesPoint> {
    days.iter().map(SeriesPoint::from).collect()
}

pub fn province_points(rows: &[ProvinceCount]) -> Vec<SeriesPoint> {
    rows.iter().map(SeriesPoint::from).collect()
}

/// The two compared periods, labelled with their literal date ranges.
pub fn comparison_points(
    periods: &[PeriodComparison; 2],
    first: &DateRange,
    second: &DateRange,
) -> Vec<SeriesPoint> {
    vec![
        SeriesPoint {
            label: first.label(),
            value: periods[0].value,
        },
        SeriesPoint {
            label: second.label(),
            value: periods[1].value,
        },
    ]
}
