use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{
    Datelike,
    Months,
    NaiveDate,
    Weekday
};
use tracing::{
    debug,
    trace,
    warn
};

use crate::time::rangeofdates::RangeOfDates;
use crate::time::utility::ONE_DAY;

use super::holiday::{
    Holiday,
    HolidayKey
};
use super::holidayerror::HolidayError;
use super::occurrences::occurrences;
use super::searchlimits::SearchLimits;

pub const BRIDGE_DAY_NAME: &str = "4 Day Weekend";

/// A day that, taken off, yields four consecutive days off: a non-holiday
/// Friday after a Thursday holiday, or a non-holiday Monday before a Tuesday
/// holiday.
///
/// The holiday set is copied at construction. The search keeps all of its
/// scratch state on the stack of the calling thread, so one `BridgeDay` can
/// serve concurrent queries.
#[derive(Debug, Clone)]
pub struct BridgeDay {
    holidays: Vec<Arc<dyn Holiday>>,
    limits: SearchLimits
}

impl BridgeDay {
    pub fn new(holidays: &[Arc<dyn Holiday>]) -> Result<BridgeDay, HolidayError> {
        BridgeDay::with_limits(holidays, SearchLimits::default())
    }

    pub fn with_limits(holidays: &[Arc<dyn Holiday>], limits: SearchLimits) -> Result<BridgeDay, HolidayError> {
        if holidays.is_empty() {
            return Err(HolidayError::MissingArgument(
                "a bridge day needs at least one holiday".to_owned()));
        }
        Ok(BridgeDay { holidays: holidays.to_vec(), limits })
    }

    pub fn holidays(&self) -> &[Arc<dyn Holiday>] {
        &self.holidays
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// A holiday landing back on `reference` after one or two steps would
    /// keep the scan from ever moving forward.
    fn has_stuck_rule(&self, reference: NaiveDate) -> Result<bool, HolidayError> {
        for holiday in self.holidays.iter() {
            let once = holiday.next_date(reference)?;
            if once == Some(reference) {
                return Ok(true);
            }
            if let Some(d) = once {
                if holiday.next_date(d)? == Some(reference) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Fills `scratch` with every occurrence of every holiday in `range`.
    fn collect_occurrences(&self, range: RangeOfDates, scratch: &mut BTreeSet<NaiveDate>) -> Result<(), HolidayError> {
        let origin = range.start_date().checked_sub_days(ONE_DAY).unwrap_or(NaiveDate::MIN);
        for holiday in self.holidays.iter() {
            for occurrence in occurrences(holiday.as_ref(), origin, range.end_date()) {
                scratch.insert(occurrence?);
            }
        }
        Ok(())
    }

    /// Scans forward window by window until a bridge day turns up or the
    /// horizon is passed.
    fn next_bridge_day(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        if self.has_stuck_rule(reference)? {
            warn!(%reference, "holiday rule does not advance, no bridge day");
            return Ok(None);
        }

        let horizon = self.limits.horizon_from(reference);
        let window_length = Months::new(self.limits.window_months());
        let mut scratch: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut window_start = reference;

        while window_start <= horizon {
            let window_end = window_start
                .checked_add_months(window_length)
                .and_then(|d| d.checked_sub_days(ONE_DAY))
                .unwrap_or(NaiveDate::MAX)
                .min(horizon);
            let window = RangeOfDates::new(window_start, window_end);

            scratch.clear();
            // one extra day on each side so neighbours of the window's
            // Thursdays and Tuesdays are known
            self.collect_occurrences(window.padded(), &mut scratch)?;
            trace!(start = %window_start, end = %window_end, n_occurrences = scratch.len(), "bridge day window");

            if let Some(bridge_day) = find_bridge_day(&scratch, window, reference) {
                debug!(%reference, %bridge_day, "bridge day found");
                return Ok(Some(bridge_day));
            }

            match window_end.checked_add_days(ONE_DAY) {
                Some(next_start) if next_start > window_start => window_start = next_start,
                _ => break
            }
        }

        warn!(%reference, horizon_years = self.limits.horizon_years(), "no bridge day within horizon");
        Ok(None)
    }
}

/// Earliest bridge day produced by a holiday inside `window`, given every
/// holiday date in and around it.
fn find_bridge_day(holiday_dates: &BTreeSet<NaiveDate>, window: RangeOfDates, reference: NaiveDate) -> Option<NaiveDate> {
    holiday_dates
        .range(window.start_date()..=window.end_date())
        .filter_map(|t| match t.weekday() {
            Weekday::Thu => t
                .succ_opt()
                .filter(|friday| *friday > reference && !holiday_dates.contains(friday)),
            Weekday::Tue => t
                .pred_opt()
                .filter(|monday| *monday > reference && !holiday_dates.contains(monday)),
            _ => None
        })
        .min()
}

impl Holiday for BridgeDay {
    fn name(&self) -> &str {
        BRIDGE_DAY_NAME
    }

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        self.next_bridge_day(reference)
    }

    /// Two bridge days are the same when derived from the same holidays,
    /// regardless of order.
    fn key(&self) -> HolidayKey {
        let mut keys: Vec<HolidayKey> = self.holidays.iter().map(|h| h.key()).collect();
        keys.sort();
        HolidayKey::BridgeDay(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::fixedholiday::FixedHoliday;
    use crate::holiday::floatingholiday::FloatingHoliday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed(name: &str, month: u32, day: u32) -> Arc<dyn Holiday> {
        Arc::new(FixedHoliday::new(name, month, day).unwrap())
    }

    #[test]
    fn friday_after_thursday_holiday() {
        // 2024-08-15 is a Thursday
        let bridge = BridgeDay::new(&[fixed("Assumption", 8, 15)]).unwrap();
        assert_eq!(bridge.next_date(ymd(2024, 1, 1)).unwrap(), Some(ymd(2024, 8, 16)));
    }

    #[test]
    fn monday_before_tuesday_holiday() {
        // 2024-10-01 is a Tuesday
        let bridge = BridgeDay::new(&[fixed("Tuesday Feast", 10, 1)]).unwrap();
        assert_eq!(bridge.next_date(ymd(2024, 1, 1)).unwrap(), Some(ymd(2024, 9, 30)));
    }

    #[test]
    fn thursday_reference_yields_its_friday() {
        let bridge = BridgeDay::new(&[fixed("Assumption", 8, 15)]).unwrap();
        assert_eq!(bridge.next_date(ymd(2024, 8, 14)).unwrap(), Some(ymd(2024, 8, 16)));
        assert_eq!(bridge.next_date(ymd(2024, 8, 15)).unwrap(), Some(ymd(2024, 8, 16)));
    }

    #[test]
    fn monday_equal_to_reference_is_not_returned() {
        let bridge = BridgeDay::new(&[fixed("Tuesday Feast", 10, 1)]).unwrap();
        // October 1st 2025 is a Wednesday, 2026 a Thursday
        assert_eq!(bridge.next_date(ymd(2024, 9, 30)).unwrap(), Some(ymd(2026, 10, 2)));
    }

    #[test]
    fn friday_that_is_a_holiday_is_no_bridge_day() {
        // Christmas 2025: Thursday 25th and Friday 26th are both holidays
        let bridge = BridgeDay::new(&[fixed("Christmas Day", 12, 25), fixed("St. Stephen's Day", 12, 26)]).unwrap();
        let next = bridge.next_date(ymd(2025, 12, 1)).unwrap().unwrap();
        assert_ne!(next, ymd(2025, 12, 26));
        assert!(next > ymd(2025, 12, 26));
    }

    #[test]
    fn bridge_day_across_a_window_boundary() {
        // 2026-12-31 is a Thursday, the Friday is January 1st
        let bridge = BridgeDay::new(&[fixed("Sylvester", 12, 31)]).unwrap();
        assert_eq!(bridge.next_date(ymd(2026, 12, 1)).unwrap(), Some(ymd(2027, 1, 1)));
        let with_new_year = BridgeDay::new(&[fixed("Sylvester", 12, 31), fixed("New Year", 1, 1)]).unwrap();
        assert_ne!(with_new_year.next_date(ymd(2026, 12, 1)).unwrap(), Some(ymd(2027, 1, 1)));
    }

    #[test]
    fn no_bridge_day_within_a_short_horizon() {
        let limits = SearchLimits::new(1, 1).unwrap();
        // 2027-08-15 is a Sunday and 2028-08-15 a Tuesday
        let bridge = BridgeDay::with_limits(&[fixed("Assumption", 8, 15)], limits).unwrap();
        assert_eq!(bridge.next_date(ymd(2027, 1, 1)).unwrap(), None);
    }

    #[test]
    fn configured_limits_always_make_progress() {
        let limits: SearchLimits = serde_json::from_str(r#"{"horizon_years": 1, "window_months": 12}"#).unwrap();
        let bridge = BridgeDay::with_limits(&[fixed("Assumption", 8, 15)], limits).unwrap();
        assert_eq!(bridge.next_date(ymd(2027, 1, 1)).unwrap(), None);
        assert!(serde_json::from_str::<SearchLimits>(r#"{"horizon_years": 1, "window_months": 0}"#).is_err());
    }

    #[test]
    fn stuck_rule_yields_no_occurrence() {
        let stuck: Arc<dyn Holiday> = Arc::new(FloatingHoliday::new("Stuck", Arc::new(|d: NaiveDate| Some(d))).unwrap());
        let bridge = BridgeDay::new(&[stuck]).unwrap();
        assert_eq!(bridge.next_date(ymd(2024, 1, 1)).unwrap(), None);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(BridgeDay::new(&[]), Err(HolidayError::MissingArgument(_))));
    }

    #[test]
    fn identity_ignores_order() {
        let a = BridgeDay::new(&[fixed("A", 1, 1), fixed("B", 1, 6)]).unwrap();
        let b = BridgeDay::new(&[fixed("B", 1, 6), fixed("A", 1, 1)]).unwrap();
        let c = BridgeDay::new(&[fixed("A", 1, 1)]).unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_eq!(a.name(), "4 Day Weekend");
    }

    #[test]
    fn concurrent_queries_agree() {
        let bridge = Arc::new(BridgeDay::new(&[fixed("Assumption", 8, 15), fixed("Tuesday Feast", 10, 1)]).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let bridge = Arc::clone(&bridge);
                std::thread::spawn(move || bridge.next_date(ymd(2024 + i, 1, 1)).unwrap())
            })
            .collect();
        let results: Vec<Option<NaiveDate>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result, bridge.next_date(ymd(2024 + i as i32, 1, 1)).unwrap());
        }
    }
}
