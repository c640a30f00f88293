use chrono::NaiveDate;

use super::holiday::{
    Holiday,
    validate_name
};
use super::holidayerror::HolidayError;
use super::recurrencerule::roll_forward;

/// A holiday on the same month and day every year.
#[derive(Debug, Clone)]
pub struct FixedHoliday {
    name: String,
    month: u32,
    day: u32
}

impl FixedHoliday {
    /// February 29 is rejected since it does not occur every year.
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Result<FixedHoliday, HolidayError> {
        let name = validate_name(name.into())?;
        if month == 2 && day == 29 {
            return Err(HolidayError::InvalidArgument(
                "February 29 cannot be a fixed holiday".to_owned()));
        }
        if NaiveDate::from_ymd_opt(2001, month, day).is_none() {
            return Err(HolidayError::InvalidArgument(format!("{:02}-{:02} is not a calendar day", month, day)));
        }
        Ok(FixedHoliday { name, month, day })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    fn get_holiday_impl(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

impl Holiday for FixedHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        Ok(roll_forward(reference, |year| self.get_holiday_impl(year)))
    }
}
