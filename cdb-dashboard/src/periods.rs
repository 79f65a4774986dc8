//! The four date inputs of the period comparison chart.

use cdb_utils::dates::{days_ago, format_date, parse_date};
use cdb_utils::error::DateRangeError;
use cdb_utils::DateRange;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PeriodError {
    #[error("'{value}' is not a valid date for {field}")]
    Unparseable { field: &'static str, value: String },
    #[error(transparent)]
    Range(#[from] DateRangeError),
}

/// Raw contents of the `start1`, `end1`, `start2`, `end2` inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodInputs {
    pub start1: String,
    pub end1: String,
    pub start2: String,
    pub end2: String,
}

/// What a comparison request should do with the current inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum PeriodRequest {
    /// Some inputs are blank: do nothing, keep the current chart.
    Skip,
    Compare {
        first: DateRange,
        second: DateRange,
        /// The inputs actually used, auto-filled when all were blank.
        inputs: PeriodInputs,
    },
}

impl PeriodInputs {
    /// Previous week against the current one: `today-14 .. today-7` and `today-7 .. today`.
    pub fn defaults(today: NaiveDate) -> Result<Self, DateRangeError> {
        let week_ago = format_date(&days_ago(today, 7)?);
        Ok(Self {
            start1: format_date(&days_ago(today, 14)?),
            end1: week_ago.clone(),
            start2: week_ago,
            end2: format_date(&today),
        })
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("start1", self.start1.as_str()),
            ("end1", self.end1.as_str()),
            ("start2", self.start2.as_str()),
            ("end2", self.end2.as_str()),
        ]
    }

    pub fn all_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.trim().is_empty())
    }

    pub fn any_empty(&self) -> bool {
        self.fields().iter().any(|(_, v)| v.trim().is_empty())
    }

    pub fn resolve(&self, today: NaiveDate) -> Result<PeriodRequest, PeriodError> {
        let inputs = if self.all_empty() {
            Self::defaults(today)?
        } else if self.any_empty() {
            return Ok(PeriodRequest::Skip);
        } else {
            self.clone()
        };

        let [start1, end1, start2, end2] = inputs.fields().map(|(field, value)| {
            parse_date(value).map_err(|_| PeriodError::Unparseable {
                field,
                value: value.to_string(),
            })
        });
        let first = DateRange::new(start1?, end1?)?;
        let second = DateRange::new(start2?, end2?)?;
        Ok(PeriodRequest::Compare {
            first,
            second,
            inputs,
        })
    }
}
