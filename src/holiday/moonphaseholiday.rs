use std::fmt;
use std::sync::Arc;

use chrono::{
    Days,
    NaiveDate,
    NaiveDateTime,
    Timelike
};

use super::holiday::Holiday;
use super::holidayerror::HolidayError;
use super::lunarphaseoracle::{
    LunarPhaseOracle,
    MeanLunationOracle,
    MoonPhase
};

/// Skip before asking the oracle again when its answer falls on the
/// reference day itself.
const RETRY_SKIP: Days = Days::new(20);

/// A lunar phase observed as a holiday. Unlike every other holiday it is time
/// bearing: applied to a date-time it yields the phase's moment to the minute.
#[derive(Clone)]
pub struct MoonPhaseHoliday {
    phase: MoonPhase,
    oracle: Arc<dyn LunarPhaseOracle>
}

impl MoonPhaseHoliday {
    pub fn new(phase: MoonPhase, oracle: Arc<dyn LunarPhaseOracle>) -> MoonPhaseHoliday {
        MoonPhaseHoliday { phase, oracle }
    }

    pub fn with_mean_lunation(phase: MoonPhase) -> MoonPhaseHoliday {
        MoonPhaseHoliday::new(phase, Arc::new(MeanLunationOracle::new()))
    }

    pub fn phase(&self) -> MoonPhase {
        self.phase
    }

    fn phase_on_or_after(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.oracle
            .next_phase(date, self.phase)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
    }

    fn next_moment_after_day(&self, reference: NaiveDate) -> Option<NaiveDateTime> {
        match self.phase_on_or_after(reference) {
            Some(moment) if moment.date() > reference => Some(moment),
            _ => {
                let later = reference.checked_add_days(RETRY_SKIP)?;
                self.phase_on_or_after(later).filter(|moment| moment.date() > reference)
            }
        }
    }
}

impl fmt::Debug for MoonPhaseHoliday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoonPhaseHoliday").field("phase", &self.phase).finish_non_exhaustive()
    }
}

impl Holiday for MoonPhaseHoliday {
    fn name(&self) -> &str {
        self.phase.symbol()
    }

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        Ok(self.next_moment_after_day(reference).map(|moment| moment.date()))
    }

    fn next_date_time(&self, reference: NaiveDateTime) -> Result<Option<NaiveDateTime>, HolidayError> {
        Ok(self.next_moment_after_day(reference.date()))
    }
}
