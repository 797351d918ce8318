//! Inclusive calendar-date windows used to scope aggregation.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::common::{first_of_month, last_of_month};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Closed interval `[start, end]` of calendar dates.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end < start {
            return Err(DateWindowError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the whole month that contains `reference`.
    pub fn month_of(reference: NaiveDate) -> Self {
        Self {
            start: first_of_month(reference),
            end: last_of_month(reference),
        }
    }

    /// Window covering 1 January to 31 December of the reference year.
    pub fn year_of(reference: NaiveDate) -> Self {
        let year = reference.year();
        Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(reference),
            end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(reference),
        }
    }

    /// Both boundaries are included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange { start, end } => {
                write!(f, "date window end {end} is before start {start}")
            }
        }
    }
}

impl std::error::Error for DateWindowError {}
