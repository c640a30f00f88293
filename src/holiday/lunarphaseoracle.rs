use chrono::{
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    TimeDelta
};
use serde::{
    Deserialize,
    Serialize
};

/// Mean length of a lunation in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    FirstQuarter,
    FullMoon,
    ThirdQuarter
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 4] = [
        MoonPhase::NewMoon,
        MoonPhase::ThirdQuarter,
        MoonPhase::FullMoon,
        MoonPhase::FirstQuarter
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            MoonPhase::NewMoon      => "\u{25CF}",
            MoonPhase::FirstQuarter => "\u{25D0}",
            MoonPhase::FullMoon     => "\u{25CB}",
            MoonPhase::ThirdQuarter => "\u{25D1}"
        }
    }

    /// Position within a lunation, new moon being 0.
    pub fn fraction(&self) -> f64 {
        match self {
            MoonPhase::NewMoon      => 0.0,
            MoonPhase::FirstQuarter => 0.25,
            MoonPhase::FullMoon     => 0.5,
            MoonPhase::ThirdQuarter => 0.75
        }
    }
}

/// Source of lunar phase timestamps.
///
/// `next_phase` returns the first moment at or after the start of `date`
/// at which `phase` occurs. Implementations must be deterministic and
/// monotonic in `date`.
pub trait LunarPhaseOracle: Send + Sync {
    fn next_phase(&self, date: NaiveDate, phase: MoonPhase) -> Option<NaiveDateTime>;
}

/// Phases from the mean synodic month, counted from the new moon of
/// 2000-01-06 18:14. Accurate to within about half a day.
#[derive(Debug, Clone, Copy)]
pub struct MeanLunationOracle {
    epoch: NaiveDateTime
}

impl MeanLunationOracle {
    pub fn new() -> MeanLunationOracle {
        let epoch = NaiveDate::from_ymd_opt(2000, 1, 6)
            .and_then(|d| d.and_hms_opt(18, 14, 0))
            .unwrap_or_default();
        MeanLunationOracle { epoch }
    }

    pub fn with_epoch(epoch: NaiveDateTime) -> MeanLunationOracle {
        MeanLunationOracle { epoch }
    }
}

impl Default for MeanLunationOracle {
    fn default() -> Self {
        MeanLunationOracle::new()
    }
}

impl LunarPhaseOracle for MeanLunationOracle {
    fn next_phase(&self, date: NaiveDate, phase: MoonPhase) -> Option<NaiveDateTime> {
        let start = date.and_time(NaiveTime::MIN);
        let elapsed_days = (start - self.epoch).num_seconds() as f64 / SECONDS_PER_DAY;
        let lunation = (elapsed_days / SYNODIC_MONTH_DAYS - phase.fraction()).ceil();
        let offset_seconds = ((lunation + phase.fraction()) * SYNODIC_MONTH_DAYS * SECONDS_PER_DAY).round();
        let offset = TimeDelta::try_seconds(offset_seconds as i64)?;
        let instant = self.epoch.checked_add_signed(offset)?;
        // rounding may land a few seconds before midnight
        if instant < start {
            Some(start)
        } else {
            Some(instant)
        }
    }
}
