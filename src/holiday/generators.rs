//! Factories for the recurrence rules behind floating holidays.
//!
//! Every rule is stateless and yields a date strictly after the reference
//! it is given.

use std::sync::Arc;

use chrono::{
    Days,
    NaiveDate,
    Weekday
};

use crate::time::utility::{
    previous,
    previous_or_same,
    shift_days
};

use super::holidayerror::HolidayError;
use super::recurrencerule::{
    RecurrenceRule,
    roll_forward,
    roll_forward_within
};

/// How many years ahead `february_29` looks for a leap year.
pub const LEAP_DAY_SEARCH_YEARS: i32 = 10;

const ONE_WEEK_DAYS: u64 = 7;

fn check_month(month: u32) -> Result<(), HolidayError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(HolidayError::InvalidArgument(format!("month {} is not in 1..=12", month)))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeekdayInMonth {
    month: u32,
    weekday: Weekday,
    ordinal: u8
}

impl WeekdayInMonth {
    pub fn new(month: u32, weekday: Weekday, ordinal: u8) -> Result<WeekdayInMonth, HolidayError> {
        check_month(month)?;
        if !(1..=5).contains(&ordinal) {
            return Err(HolidayError::InvalidArgument(format!("ordinal {} is not in 1..=5", ordinal)));
        }
        Ok(WeekdayInMonth { month, weekday, ordinal })
    }

    fn in_year(&self, year: i32) -> Option<NaiveDate> {
        let first = NaiveDate::from_weekday_of_month_opt(year, self.month, self.weekday, 1)?;
        first.checked_add_days(Days::new(ONE_WEEK_DAYS * (self.ordinal as u64 - 1)))
    }
}

impl RecurrenceRule for WeekdayInMonth {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        roll_forward(reference, |year| self.in_year(year))
    }
}

/// The given weekday on or before the day preceding `month`/`day`.
#[derive(Debug, Clone, Copy)]
pub struct WeekdayBeforeDate {
    weekday: Weekday,
    month: u32,
    day: u32
}

impl WeekdayBeforeDate {
    pub fn new(weekday: Weekday, month: u32, day: u32) -> Result<WeekdayBeforeDate, HolidayError> {
        check_month(month)?;
        // 2000 is a leap year, so every month/day that ever exists is accepted
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(HolidayError::InvalidArgument(format!("{:02}-{:02} is not a calendar day", month, day)));
        }
        Ok(WeekdayBeforeDate { weekday, month, day })
    }

    fn in_year(&self, year: i32) -> Option<NaiveDate> {
        let first_of_month = NaiveDate::from_ymd_opt(year, self.month, 1)?;
        let day_before = shift_days(first_of_month, self.day as i64 - 2)?;
        previous_or_same(day_before, self.weekday)
    }
}

impl RecurrenceRule for WeekdayBeforeDate {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        roll_forward(reference, |year| self.in_year(year))
    }
}

/// The `n`th day of the year. Day 366 only exists in leap years, so it is
/// looked for over the same span of years as February 29.
#[derive(Debug, Clone, Copy)]
pub struct DayOfYear {
    n: u32
}

impl DayOfYear {
    pub fn new(n: u32) -> Result<DayOfYear, HolidayError> {
        if !(1..=366).contains(&n) {
            return Err(HolidayError::InvalidArgument(format!("day of year {} is not in 1..=366", n)));
        }
        Ok(DayOfYear { n })
    }

    fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_yo_opt(year, self.n)
    }
}

impl RecurrenceRule for DayOfYear {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        if self.n == 366 {
            roll_forward_within(reference, LEAP_DAY_SEARCH_YEARS + 1, |year| self.in_year(year))
        } else {
            roll_forward(reference, |year| self.in_year(year))
        }
    }
}

/// Western Easter Sunday by the Gauss congruence.
pub fn easter_sunday_of(year: i32) -> Option<NaiveDate> {
    let k = year.div_euclid(100);
    let m = 15 + (3 * k + 3) / 4 - (8 * k + 13) / 25;
    let s = 2 - (3 * k + 3) / 4;
    let a = year.rem_euclid(19);
    let d = (19 * a + m).rem_euclid(30);
    let r = d / 29 + (d / 28 - d / 29) * (a / 11);
    let og = 21 + d - r;
    let sz = 7 - (year + year.div_euclid(4) + s).rem_euclid(7);
    let oe = 7 - (og - sz).rem_euclid(7);
    // days counted from the first of March, 32 meaning April 1
    let os = og + oe;
    if os <= 31 {
        NaiveDate::from_ymd_opt(year, 3, os as u32)
    } else {
        NaiveDate::from_ymd_opt(year, 4, (os - 31) as u32)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EasterSunday;

impl RecurrenceRule for EasterSunday {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        roll_forward(reference, easter_sunday_of)
    }
}

/// First Sunday of Advent: the fourth Sunday before December 25.
pub fn first_advent_of(year: i32) -> Option<NaiveDate> {
    let christmas_eve = NaiveDate::from_ymd_opt(year, 12, 24)?;
    let fourth = previous_or_same(christmas_eve, Weekday::Sun)?;
    let third = previous(fourth, Weekday::Sun)?;
    let second = previous(third, Weekday::Sun)?;
    previous(second, Weekday::Sun)
}

#[derive(Debug, Clone, Copy)]
pub struct FirstAdvent;

impl RecurrenceRule for FirstAdvent {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        roll_forward(reference, first_advent_of)
    }
}

/// February 29 of the nearest leap year, looking at most
/// `LEAP_DAY_SEARCH_YEARS` years past the reference's year.
#[derive(Debug, Clone, Copy)]
pub struct February29;

impl RecurrenceRule for February29 {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        roll_forward_within(reference, LEAP_DAY_SEARCH_YEARS + 1, |year| NaiveDate::from_ymd_opt(year, 2, 29))
    }
}

pub fn by_weekday_in_month(month: u32, weekday: Weekday, ordinal: u8) -> Result<Arc<dyn RecurrenceRule>, HolidayError> {
    Ok(Arc::new(WeekdayInMonth::new(month, weekday, ordinal)?))
}

pub fn by_weekday_before_date(weekday: Weekday, month: u32, day: u32) -> Result<Arc<dyn RecurrenceRule>, HolidayError> {
    Ok(Arc::new(WeekdayBeforeDate::new(weekday, month, day)?))
}

pub fn by_day_of_year(n: u32) -> Result<Arc<dyn RecurrenceRule>, HolidayError> {
    Ok(Arc::new(DayOfYear::new(n)?))
}

pub fn easter_sunday() -> Arc<dyn RecurrenceRule> {
    Arc::new(EasterSunday)
}

pub fn first_advent() -> Arc<dyn RecurrenceRule> {
    Arc::new(FirstAdvent)
}

pub fn february_29() -> Arc<dyn RecurrenceRule> {
    Arc::new(February29)
}
