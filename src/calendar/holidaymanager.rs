use std::cmp::Reverse;
use std::collections::{
    BTreeMap,
    BinaryHeap,
    HashSet
};
use std::sync::Arc;

use chrono::{
    Months,
    NaiveDate
};
use tracing::{
    debug,
    warn
};

use crate::holiday::holiday::Holiday;
use crate::holiday::holidayerror::HolidayError;
use crate::holiday::occurrences::occurrences;
use crate::holiday::searchlimits::SearchLimits;
use crate::time::rangeofdates::RangeOfDates;
use crate::time::utility::ONE_DAY;
use crate::time::yearmonth::YearMonth;

use super::calendarentry::CalendarEntry;

/// Answers calendar queries over a fixed set of holidays.
///
/// The holiday list is copied at construction; changing the caller's
/// collection afterwards has no effect on the manager.
#[derive(Debug, Clone)]
pub struct HolidayManager {
    holidays: Vec<Arc<dyn Holiday>>,
    limits: SearchLimits
}

fn day_before(d: NaiveDate) -> Result<NaiveDate, HolidayError> {
    d.checked_sub_days(ONE_DAY)
        .ok_or_else(|| HolidayError::InvalidArgument(format!("no date before {}", d)))
}

impl HolidayManager {
    pub fn new(holidays: &[Arc<dyn Holiday>]) -> Result<HolidayManager, HolidayError> {
        HolidayManager::with_limits(holidays, SearchLimits::default())
    }

    pub fn with_limits(holidays: &[Arc<dyn Holiday>], limits: SearchLimits) -> Result<HolidayManager, HolidayError> {
        if holidays.is_empty() {
            return Err(HolidayError::MissingArgument(
                "a holiday manager needs at least one holiday".to_owned()));
        }
        Ok(HolidayManager { holidays: holidays.to_vec(), limits })
    }

    pub fn holidays(&self) -> &[Arc<dyn Holiday>] {
        &self.holidays
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Walks every holiday from `origin` (exclusive) to `until` (inclusive)
    /// and keeps the occurrences accepted by `keep`, sorted and deduplicated.
    fn collect_entries<F>(&self, origin: NaiveDate, until: NaiveDate, keep: F) -> Result<Vec<CalendarEntry>, HolidayError> where
        F: Fn(NaiveDate) -> bool {
        let mut entries: Vec<CalendarEntry> = Vec::new();
        for holiday in self.holidays.iter() {
            for occurrence in occurrences(holiday.as_ref(), origin, until) {
                let d = occurrence?;
                if keep(d) {
                    entries.push(CalendarEntry::new(d, Arc::clone(holiday)));
                }
            }
        }
        entries.sort();
        entries.dedup();
        Ok(entries)
    }

    pub fn by_day(&self, date: NaiveDate) -> Result<Vec<CalendarEntry>, HolidayError> {
        debug!(%date, "holidays by day");
        self.collect_entries(day_before(date)?, date, |d| d == date)
    }

    pub fn by_month(&self, year_month: YearMonth) -> Result<Vec<CalendarEntry>, HolidayError> {
        debug!(%year_month, "holidays by month");
        // a year of lead-in so non-annual rules are picked up before the month
        let origin = year_month
            .first_day()
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| HolidayError::InvalidArgument(format!("{} is out of range", year_month)))?;
        self.collect_entries(origin, year_month.last_day(), |d| year_month.contains(d))
    }

    pub fn by_year(&self, year: i32) -> Result<Vec<CalendarEntry>, HolidayError> {
        debug!(year, "holidays by year");
        if year == 0 {
            return Err(HolidayError::InvalidArgument("year 0 is not a valid year".to_owned()));
        }
        let first = YearMonth::new(year, 1)?.first_day();
        let last = YearMonth::new(year, 12)?.last_day();
        self.collect_entries(day_before(first)?, last, |d| d >= first)
    }

    /// Entries dated in `[from, to)`.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<CalendarEntry>, HolidayError> {
        debug!(%from, %to, "holidays between");
        if to < from {
            return Err(HolidayError::InvalidArgument(format!("range end {} is before its start {}", to, from)));
        }
        match RangeOfDates::half_open(from, to) {
            Some(range) => self.collect_entries(day_before(from)?, range.end_date(), |d| range.contain(d)),
            None => Ok(Vec::new())
        }
    }

    /// The next occurrence of each holiday after `reference`. Holidays that
    /// never occur again are left out.
    pub fn next_per_holiday(&self, reference: NaiveDate) -> Result<Vec<CalendarEntry>, HolidayError> {
        debug!(%reference, "next occurrence per holiday");
        let mut entries: Vec<CalendarEntry> = Vec::with_capacity(self.holidays.len());
        for holiday in self.holidays.iter() {
            if let Some(d) = holiday.next_date(reference)? {
                entries.push(CalendarEntry::new(d, Arc::clone(holiday)));
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// The `n` earliest distinct entries after `reference` across all
    /// holidays.
    ///
    /// The merge stops at the search horizon, so fewer than `n` entries come
    /// back when the holidays do not produce that many before it.
    pub fn next_n(&self, reference: NaiveDate, n: i64) -> Result<Vec<CalendarEntry>, HolidayError> {
        debug!(%reference, n, "next n holidays");
        if n < 0 {
            return Err(HolidayError::InvalidArgument(format!("cannot list {} holidays", n)));
        }
        let n = usize::try_from(n).unwrap_or(usize::MAX);
        let horizon = self.limits.horizon_from(reference);

        let mut heap: BinaryHeap<Reverse<(NaiveDate, usize)>> = BinaryHeap::new();
        for (index, holiday) in self.holidays.iter().enumerate() {
            if let Some(d) = holiday.next_date(reference)? {
                if d <= horizon {
                    heap.push(Reverse((d, index)));
                }
            }
        }

        let mut result: Vec<CalendarEntry> = Vec::new();
        let mut seen: HashSet<CalendarEntry> = HashSet::new();
        while result.len() < n {
            let Some(Reverse((date, _))) = heap.peek().copied() else {
                break;
            };

            // drain the whole date so ties are ordered by rendered form
            let mut same_day: Vec<CalendarEntry> = Vec::new();
            while let Some(Reverse((d, index))) = heap.peek().copied() {
                if d != date {
                    break;
                }
                heap.pop();
                let holiday = &self.holidays[index];
                same_day.push(CalendarEntry::new(d, Arc::clone(holiday)));
                match holiday.next_date(d)? {
                    Some(next) if next <= d => {
                        warn!(holiday = holiday.name(), from = %d, to = %next, "rule did not advance");
                        return Err(HolidayError::InvalidArgument(format!(
                            "'{}' did not advance past {}", holiday.name(), d)));
                    },
                    Some(next) if next <= horizon => heap.push(Reverse((next, index))),
                    _ => {}
                }
            }

            same_day.sort();
            for entry in same_day {
                if result.len() == n {
                    break;
                }
                if seen.insert(entry.clone()) {
                    result.push(entry);
                }
            }
        }

        if result.len() < n {
            debug!(%reference, n, found = result.len(), "fewer holidays than requested before the horizon");
        }
        Ok(result)
    }

    /// Holiday names per date for the given month.
    pub fn month_sheet(&self, year_month: YearMonth) -> Result<BTreeMap<NaiveDate, Vec<String>>, HolidayError> {
        let mut sheet: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
        for entry in self.by_month(year_month)? {
            sheet.entry(entry.date()).or_default().push(entry.name().to_owned());
        }
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::dependentholiday::DependentHoliday;
    use crate::holiday::fixedholiday::FixedHoliday;
    use crate::holiday::floatingholiday::FloatingHoliday;
    use crate::holiday::generators;
    use crate::holiday::lunarphaseoracle::MoonPhase;
    use crate::holiday::moonphaseholiday::MoonPhaseHoliday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed(name: &str, month: u32, day: u32) -> Arc<dyn Holiday> {
        Arc::new(FixedHoliday::new(name, month, day).unwrap())
    }

    fn rendered(entries: &[CalendarEntry]) -> Vec<String> {
        entries.iter().map(|e| e.to_string()).collect()
    }

    fn sample() -> HolidayManager {
        let easter: Arc<dyn Holiday> = Arc::new(FloatingHoliday::new("Easter Sunday", generators::easter_sunday()).unwrap());
        let good_friday: Arc<dyn Holiday> = Arc::new(DependentHoliday::new("Good Friday", Arc::clone(&easter), -2).unwrap());
        HolidayManager::new(&[
            fixed("New Year", 1, 1),
            fixed("Epiphany", 1, 6),
            easter,
            good_friday,
            fixed("Christmas Day", 12, 25)
        ]).unwrap()
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(HolidayManager::new(&[]), Err(HolidayError::MissingArgument(_))));
    }

    #[test]
    fn by_day_finds_matching_holidays() {
        let manager = sample();
        assert_eq!(rendered(&manager.by_day(ymd(2024, 3, 29)).unwrap()), vec!["2024-03-29: Good Friday"]);
        assert!(manager.by_day(ymd(2024, 3, 30)).unwrap().is_empty());
    }

    #[test]
    fn by_month_sorts_by_date_and_name() {
        let manager = sample();
        assert_eq!(rendered(&manager.by_month(YearMonth::new(2024, 1).unwrap()).unwrap()),
                   vec!["2024-01-01: New Year", "2024-01-06: Epiphany"]);
        assert_eq!(rendered(&manager.by_month(YearMonth::new(2024, 3).unwrap()).unwrap()),
                   vec!["2024-03-29: Good Friday", "2024-03-31: Easter Sunday"]);
    }

    #[test]
    fn by_month_catches_monthly_rules() {
        let manager = HolidayManager::new(&[Arc::new(MoonPhaseHoliday::with_mean_lunation(MoonPhase::FullMoon))]).unwrap();
        let full_moons = manager.by_month(YearMonth::new(2024, 5).unwrap()).unwrap();
        assert!((1..=2).contains(&full_moons.len()));
        assert!(full_moons.iter().all(|e| YearMonth::new(2024, 5).unwrap().contains(e.date())));
    }

    #[test]
    fn by_year_lists_every_holiday_once() {
        let manager = sample();
        let entries = manager.by_year(2025).unwrap();
        assert_eq!(rendered(&entries), vec![
            "2025-01-01: New Year",
            "2025-01-06: Epiphany",
            "2025-04-18: Good Friday",
            "2025-04-20: Easter Sunday",
            "2025-12-25: Christmas Day"
        ]);
        assert!(manager.by_year(0).is_err());
    }

    #[test]
    fn last_day_of_leap_years_is_listed_once() {
        let day_366: Arc<dyn Holiday> = Arc::new(FloatingHoliday::new("Day 366", generators::by_day_of_year(366).unwrap()).unwrap());
        let manager = HolidayManager::new(&[day_366]).unwrap();
        assert_eq!(rendered(&manager.by_year(2024).unwrap()), vec!["2024-12-31: Day 366"]);
        assert!(manager.by_year(2023).unwrap().is_empty());
        assert!(manager.by_year(2025).unwrap().is_empty());
    }

    #[test]
    fn between_excludes_the_end() {
        let manager = sample();
        let entries = manager.between(ymd(2024, 1, 1), ymd(2024, 1, 6)).unwrap();
        assert_eq!(rendered(&entries), vec!["2024-01-01: New Year"]);
        assert!(manager.between(ymd(2024, 1, 6), ymd(2024, 1, 6)).unwrap().is_empty());
        assert!(matches!(manager.between(ymd(2024, 2, 1), ymd(2024, 1, 1)), Err(HolidayError::InvalidArgument(_))));
    }

    #[test]
    fn next_per_holiday_has_one_entry_each() {
        let manager = sample();
        assert_eq!(rendered(&manager.next_per_holiday(ymd(2024, 12, 31)).unwrap()), vec![
            "2025-01-01: New Year",
            "2025-01-06: Epiphany",
            "2025-04-18: Good Friday",
            "2025-04-20: Easter Sunday",
            "2025-12-25: Christmas Day"
        ]);
    }

    #[test]
    fn next_n_merges_across_holidays() {
        let manager = sample();
        assert_eq!(rendered(&manager.next_n(ymd(2024, 12, 1), 3).unwrap()), vec![
            "2024-12-25: Christmas Day",
            "2025-01-01: New Year",
            "2025-01-06: Epiphany"
        ]);
        assert!(manager.next_n(ymd(2024, 12, 1), 0).unwrap().is_empty());
        assert!(matches!(manager.next_n(ymd(2024, 12, 1), -1), Err(HolidayError::InvalidArgument(_))));
    }

    #[test]
    fn next_n_orders_ties_by_name() {
        let manager = HolidayManager::new(&[fixed("Zeta", 5, 1), fixed("Alpha", 5, 1)]).unwrap();
        assert_eq!(rendered(&manager.next_n(ymd(2024, 1, 1), 1).unwrap()), vec!["2024-05-01: Alpha"]);
    }

    #[test]
    fn next_n_drops_duplicate_holidays() {
        let manager = HolidayManager::new(&[fixed("Labour Day", 5, 1), fixed("Labour Day", 5, 1)]).unwrap();
        assert_eq!(rendered(&manager.next_n(ymd(2024, 1, 1), 2).unwrap()),
                   vec!["2024-05-01: Labour Day", "2025-05-01: Labour Day"]);
    }

    #[test]
    fn next_n_stops_at_the_horizon() {
        let limits = SearchLimits::new(2, 1).unwrap();
        let manager = HolidayManager::with_limits(&[fixed("Christmas Day", 12, 25)], limits).unwrap();
        let entries = manager.next_n(ymd(2024, 1, 1), 10).unwrap();
        assert_eq!(rendered(&entries), vec!["2024-12-25: Christmas Day", "2025-12-25: Christmas Day"]);
    }

    #[test]
    fn month_sheet_groups_names_by_date() {
        let manager = HolidayManager::new(&[fixed("Labour Day", 5, 1), fixed("May Day", 5, 1), fixed("Europe Day", 5, 9)]).unwrap();
        let sheet = manager.month_sheet(YearMonth::new(2024, 5).unwrap()).unwrap();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet[&ymd(2024, 5, 1)], vec!["Labour Day".to_owned(), "May Day".to_owned()]);
        assert_eq!(sheet[&ymd(2024, 5, 9)], vec!["Europe Day".to_owned()]);
    }

    #[test]
    fn stuck_rule_aborts_the_query() {
        let stuck: Arc<dyn Holiday> = Arc::new(FloatingHoliday::new("Stuck", Arc::new(|d: NaiveDate| Some(d))).unwrap());
        let manager = HolidayManager::new(&[stuck]).unwrap();
        assert!(matches!(manager.by_year(2024), Err(HolidayError::InvalidArgument(_))));
        assert!(matches!(manager.next_n(ymd(2024, 1, 1), 3), Err(HolidayError::InvalidArgument(_))));
    }
}
