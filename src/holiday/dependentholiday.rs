use std::sync::Arc;

use chrono::NaiveDate;

use crate::time::utility::shift_days;

use super::holiday::{
    Holiday,
    validate_name
};
use super::holidayerror::HolidayError;

/// A holiday a fixed number of days before or after each occurrence of an
/// anchor holiday, e.g. Ash Wednesday at 46 days before Easter Sunday.
#[derive(Debug, Clone)]
pub struct DependentHoliday {
    name: String,
    anchor: Arc<dyn Holiday>,
    offset_days: i64
}

impl DependentHoliday {
    pub fn new(name: impl Into<String>, anchor: Arc<dyn Holiday>, offset_days: i64) -> Result<DependentHoliday, HolidayError> {
        Ok(DependentHoliday { name: validate_name(name.into())?, anchor, offset_days })
    }

    pub fn anchor(&self) -> &Arc<dyn Holiday> {
        &self.anchor
    }

    pub fn offset_days(&self) -> i64 {
        self.offset_days
    }

    /// `anchor.next(from) + offset`
    fn shifted_anchor_after(&self, from: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        Ok(self.anchor
            .next_date(from)?
            .and_then(|anchor_date| shift_days(anchor_date, self.offset_days)))
    }
}

impl Holiday for DependentHoliday {
    fn name(&self) -> &str {
        &self.name
    }

    /// The offset may push an occurrence across the anchor's cycle boundary,
    /// so two candidates are computed: one from the anchor's next occurrence
    /// after the reference, one from its next occurrence after the reference
    /// shifted back by the offset. The earlier of the two lying strictly after
    /// the reference wins.
    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        let Some(from_reference) = self.shifted_anchor_after(reference)? else {
            return Ok(None);
        };
        let Some(unshifted_reference) = self.offset_days.checked_neg().and_then(|n| shift_days(reference, n)) else {
            return Ok(None);
        };
        let Some(from_unshifted) = self.shifted_anchor_after(unshifted_reference)? else {
            return Ok(None);
        };

        if from_reference == from_unshifted {
            if from_reference > reference {
                return Ok(Some(from_reference));
            }
        } else if reference == from_reference {
            return Ok(Some(from_unshifted));
        } else if reference == from_unshifted {
            return Ok(Some(from_reference));
        } else {
            let earliest_after = [from_reference, from_unshifted]
                .into_iter()
                .filter(|candidate| *candidate > reference)
                .min();
            if earliest_after.is_some() {
                return Ok(earliest_after);
            }
        }

        Err(HolidayError::InvalidArgument(format!(
            "anchor of '{}' produced no occurrence after {}", self.name, reference)))
    }
}
