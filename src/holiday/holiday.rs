use std::fmt;
use std::sync::Arc;

use chrono::{
    NaiveDate,
    NaiveDateTime,
    NaiveTime
};

use super::holidayerror::HolidayError;
use super::temporal::Temporal;

/// Identity of a holiday.
///
/// Simple holidays are identified by their name alone, so two rules sharing a
/// name are the same holiday. Bridge days are identified by the set of
/// holidays they are derived from.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HolidayKey {
    Named(String),
    BridgeDay(Vec<HolidayKey>)
}

/// A named recurrence rule.
///
/// `next_date` must return a date strictly after `reference`, or `Ok(None)`
/// when the holiday does not occur again. Every walk in the query engine
/// relies on this.
pub trait Holiday: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError>;

    /// Time-bearing variant of `next_date`. Date-level holidays substitute
    /// their date and reset the time to midnight.
    fn next_date_time(&self, reference: NaiveDateTime) -> Result<Option<NaiveDateTime>, HolidayError> {
        Ok(self.next_date(reference.date())?.map(|d| d.and_time(NaiveTime::MIN)))
    }

    fn key(&self) -> HolidayKey {
        HolidayKey::Named(self.name().to_owned())
    }
}

impl PartialEq for dyn Holiday {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for dyn Holiday {}

impl fmt::Display for dyn Holiday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub trait HolidayExt: Holiday {
    /// The earliest occurrence strictly after `reference`, keeping the
    /// precision of the supplied temporal value.
    fn next_occurrence<T: Temporal>(&self, reference: T) -> Result<Option<T>, HolidayError> {
        reference.adjust_with(self)
    }
}

impl<H: Holiday + ?Sized> HolidayExt for H {}

impl<H: Holiday + ?Sized> Holiday for Arc<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        (**self).next_date(reference)
    }

    fn next_date_time(&self, reference: NaiveDateTime) -> Result<Option<NaiveDateTime>, HolidayError> {
        (**self).next_date_time(reference)
    }

    fn key(&self) -> HolidayKey {
        (**self).key()
    }
}

pub(crate) fn validate_name(name: String) -> Result<String, HolidayError> {
    if name.is_empty() {
        Err(HolidayError::empty_name())
    } else {
        Ok(name)
    }
}
