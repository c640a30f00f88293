use std::fmt;

use chrono::{
    Datelike,
    NaiveDate
};
use serde::{
    Deserialize,
    Serialize
};

use crate::holiday::holidayerror::HolidayError;
use crate::time::utility::days_of_month;

/// A calendar month of a specific year, e.g. `2024-02`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<YearMonth, HolidayError> {
        if !(1..=12).contains(&month) {
            return Err(HolidayError::InvalidArgument(format!("month {} is not in 1..=12", month)));
        }
        // both ends of the month must be representable
        if NaiveDate::from_ymd_opt(year, month, days_of_month(year, month)).is_none() {
            return Err(HolidayError::InvalidArgument(format!("year {} is out of range", year)));
        }
        Ok(YearMonth { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn len(&self) -> u32 {
        days_of_month(self.year, self.month)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.len()).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, d: NaiveDate) -> bool {
        d.year() == self.year && d.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
