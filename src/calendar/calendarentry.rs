use std::cmp::Ordering;
use std::fmt;
use std::hash::{
    Hash,
    Hasher
};
use std::sync::Arc;

use chrono::NaiveDate;

use crate::holiday::holiday::Holiday;

/// An occurrence of a holiday on a concrete date.
///
/// Entries sort by date first and then by their rendered form
/// `"YYYY-MM-DD: name"`, so entries on the same date list by name.
#[derive(Debug, Clone)]
pub struct CalendarEntry {
    date: NaiveDate,
    holiday: Arc<dyn Holiday>
}

impl CalendarEntry {
    pub fn new(date: NaiveDate, holiday: Arc<dyn Holiday>) -> CalendarEntry {
        CalendarEntry { date, holiday }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn holiday(&self) -> &Arc<dyn Holiday> {
        &self.holiday
    }

    pub fn name(&self) -> &str {
        self.holiday.name()
    }
}

impl fmt::Display for CalendarEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date.format("%Y-%m-%d"), self.holiday.name())
    }
}

impl PartialEq for CalendarEntry {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && *self.holiday == *other.holiday
    }
}

impl Eq for CalendarEntry {}

impl Ord for CalendarEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.to_string().cmp(&other.to_string()))
            .then_with(|| self.holiday.key().cmp(&other.holiday.key()))
    }
}

impl PartialOrd for CalendarEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for CalendarEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
        self.holiday.key().hash(state);
    }
}
