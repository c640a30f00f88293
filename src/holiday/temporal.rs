use chrono::{
    NaiveDate,
    NaiveDateTime,
    NaiveTime
};

use crate::time::yearmonth::YearMonth;

use super::holiday::Holiday;
use super::holidayerror::HolidayError;

/// A temporal value a holiday can be applied to.
///
/// Values that do not pin down a calendar day (a bare time of day, a whole
/// month) are rejected with `InvalidArgument`. The adjusted value keeps the
/// precision of the input.
pub trait Temporal: Sized + Copy {
    fn adjust_with<H: Holiday + ?Sized>(self, holiday: &H) -> Result<Option<Self>, HolidayError>;
}

impl Temporal for NaiveDate {
    fn adjust_with<H: Holiday + ?Sized>(self, holiday: &H) -> Result<Option<Self>, HolidayError> {
        holiday.next_date(self)
    }
}

impl Temporal for NaiveDateTime {
    fn adjust_with<H: Holiday + ?Sized>(self, holiday: &H) -> Result<Option<Self>, HolidayError> {
        holiday.next_date_time(self)
    }
}

impl Temporal for NaiveTime {
    fn adjust_with<H: Holiday + ?Sized>(self, _holiday: &H) -> Result<Option<Self>, HolidayError> {
        Err(HolidayError::no_day_precision("NaiveTime"))
    }
}

impl Temporal for YearMonth {
    fn adjust_with<H: Holiday + ?Sized>(self, _holiday: &H) -> Result<Option<Self>, HolidayError> {
        Err(HolidayError::no_day_precision("YearMonth"))
    }
}
