use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use super::holiday::{
    Holiday,
    validate_name
};
use super::holidayerror::HolidayError;
use super::recurrencerule::RecurrenceRule;

/// A holiday whose date moves from year to year according to a rule.
#[derive(Clone)]
pub struct FloatingHoliday {
    name: String,
    rule: Arc<dyn RecurrenceRule>
}

impl FloatingHoliday {
    pub fn new(name: impl Into<String>, rule: Arc<dyn RecurrenceRule>) -> Result<FloatingHoliday, HolidayError> {
        Ok(FloatingHoliday { name: validate_name(name.into())?, rule })
    }

    pub fn rule(&self) -> &Arc<dyn RecurrenceRule> {
        &self.rule
    }
}

impl fmt::Debug for FloatingHoliday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingHoliday").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Holiday for FloatingHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        Ok(self.rule.next_after(reference))
    }
}
