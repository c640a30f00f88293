use chrono::{
    Months,
    NaiveDate
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    de
};

use super::holidayerror::HolidayError;

pub const DEFAULT_HORIZON_YEARS: u32 = 100;
pub const DEFAULT_WINDOW_MONTHS: u32 = 1;

/// Bounds on forward searches: how far past the reference a search may look
/// and how many months a bridge-day scan window spans. Both are positive.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct SearchLimits {
    horizon_years: u32,
    window_months: u32
}

#[derive(Deserialize)]
struct SearchLimitsJsonProp {
    #[serde(default = "default_horizon_years")]
    horizon_years: u32,
    #[serde(default = "default_window_months")]
    window_months: u32
}

fn default_horizon_years() -> u32 {
    DEFAULT_HORIZON_YEARS
}

fn default_window_months() -> u32 {
    DEFAULT_WINDOW_MONTHS
}

impl SearchLimits {
    pub fn new(horizon_years: u32, window_months: u32) -> Result<SearchLimits, HolidayError> {
        if horizon_years == 0 || window_months == 0 {
            return Err(HolidayError::InvalidArgument(
                "search horizon and window must both be positive".to_owned()));
        }
        if horizon_years.checked_mul(12).is_none() {
            return Err(HolidayError::InvalidArgument(format!("horizon of {} years is too large", horizon_years)));
        }
        Ok(SearchLimits { horizon_years, window_months })
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    pub fn window_months(&self) -> u32 {
        self.window_months
    }

    /// Last date a search started at `reference` may look at.
    pub fn horizon_from(&self, reference: NaiveDate) -> NaiveDate {
        reference
            .checked_add_months(Months::new(self.horizon_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl<'de> Deserialize<'de> for SearchLimits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where
        D: Deserializer<'de> {
        let json_prop = SearchLimitsJsonProp::deserialize(deserializer)?;
        SearchLimits::new(json_prop.horizon_years, json_prop.window_months).map_err(de::Error::custom)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            horizon_years: DEFAULT_HORIZON_YEARS,
            window_months: DEFAULT_WINDOW_MONTHS
        }
    }
}
