use chrono::NaiveDate;

use crate::time::utility::ONE_DAY;

/// Inclusive range `[start_date, end_date]` of civil dates.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RangeOfDates {
    start_date: NaiveDate,
    end_date: NaiveDate
}

impl RangeOfDates {
    pub fn new(d1: NaiveDate, d2: NaiveDate) -> RangeOfDates {
        if d1 > d2 {
            RangeOfDates {start_date: d2, end_date: d1}
        } else {
            RangeOfDates {start_date: d1, end_date: d2}
        }
    }

    /// `[from, to)`; `None` when the range is empty.
    pub fn half_open(from: NaiveDate, to: NaiveDate) -> Option<RangeOfDates> {
        if to <= from {
            return None;
        }
        to.checked_sub_days(ONE_DAY).map(|end_date| RangeOfDates { start_date: from, end_date })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contain(&self, d: NaiveDate) -> bool {
        (d >= self.start_date) && (d <= self.end_date)
    }

    /// The same range widened by one day on each side, clamped to chrono's range.
    pub fn padded(&self) -> RangeOfDates {
        RangeOfDates {
            start_date: self.start_date.checked_sub_days(ONE_DAY).unwrap_or(self.start_date),
            end_date: self.end_date.checked_add_days(ONE_DAY).unwrap_or(self.end_date)
        }
    }
}
