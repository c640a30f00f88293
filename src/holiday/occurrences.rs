use chrono::NaiveDate;
use tracing::warn;

use super::holiday::Holiday;
use super::holidayerror::HolidayError;

/// Successive occurrences of a holiday after `origin` up to and including
/// `until`, produced by re-applying the holiday to its own last occurrence.
///
/// Stops at the first occurrence past `until` or when the holiday reports no
/// further occurrence. A rule that fails to advance ends the walk with an
/// `InvalidArgument` error rather than looping.
pub struct Occurrences<'a, H: Holiday + ?Sized> {
    holiday: &'a H,
    cursor: NaiveDate,
    until: NaiveDate,
    done: bool
}

impl<'a, H: Holiday + ?Sized> Occurrences<'a, H> {
    pub fn new(holiday: &'a H, origin: NaiveDate, until: NaiveDate) -> Occurrences<'a, H> {
        Occurrences { holiday, cursor: origin, until, done: false }
    }
}

impl<'a, H: Holiday + ?Sized> Iterator for Occurrences<'a, H> {
    type Item = Result<NaiveDate, HolidayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.holiday.next_date(self.cursor) {
            Err(error) => {
                self.done = true;
                Some(Err(error))
            },
            Ok(None) => {
                self.done = true;
                None
            },
            Ok(Some(d)) if d <= self.cursor => {
                self.done = true;
                warn!(holiday = self.holiday.name(), from = %self.cursor, to = %d, "rule did not advance");
                Some(Err(HolidayError::InvalidArgument(format!(
                    "'{}' did not advance past {}", self.holiday.name(), self.cursor))))
            },
            Ok(Some(d)) if d > self.until => {
                self.done = true;
                None
            },
            Ok(Some(d)) => {
                self.cursor = d;
                Some(Ok(d))
            }
        }
    }
}

/// Occurrences of `holiday` strictly after `origin` and no later than `until`.
pub fn occurrences<H: Holiday + ?Sized>(holiday: &H, origin: NaiveDate, until: NaiveDate) -> Occurrences<'_, H> {
    Occurrences::new(holiday, origin, until)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::holiday::fixedholiday::FixedHoliday;
    use crate::holiday::floatingholiday::FloatingHoliday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn walks_yearly_occurrences() {
        let christmas = FixedHoliday::new("Christmas", 12, 25).unwrap();
        let dates: Vec<NaiveDate> = occurrences(&christmas, ymd(2020, 12, 25), ymd(2023, 12, 25))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(dates, vec![ymd(2021, 12, 25), ymd(2022, 12, 25), ymd(2023, 12, 25)]);
    }

    #[test]
    fn stuck_rule_is_an_error() {
        let stuck = FloatingHoliday::new("Stuck", Arc::new(|d: NaiveDate| Some(d))).unwrap();
        let mut walk = occurrences(&stuck, ymd(2024, 1, 1), ymd(2024, 12, 31));
        assert!(matches!(walk.next(), Some(Err(HolidayError::InvalidArgument(_)))));
        assert!(walk.next().is_none());
    }
}
