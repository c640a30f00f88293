use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::calendar::holidaymanager::HolidayManager;
use crate::holiday::holiday::Holiday;
use crate::holiday::holidayerror::HolidayError;
use crate::holiday::searchlimits::SearchLimits;
use crate::loader::holidayloader::holidays_from_json_vec;
use crate::loader::loadererror::{
    LoaderError,
    parse_json_value
};

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    limits: SearchLimits,
    holidays: Vec<serde_json::Value>
}

/// Holiday definitions and search limits read from JSON.
///
/// ```json
/// {
///     "limits": {"horizon_years": 100, "window_months": 1},
///     "holidays": [
///         {"holiday_type": "Fixed", "name": "Christmas Day", "month": 12, "day": 25}
///     ]
/// }
/// ```
pub struct Configuration {
    limits: SearchLimits,
    holidays: Vec<Arc<dyn Holiday>>
}

impl Configuration {
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, LoaderError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        let configuration = Configuration::from_json_value(json_value)?;
        info!(path = %file_path.as_ref().display(), n_holidays = configuration.holidays.len(), "holiday configuration loaded");
        Ok(configuration)
    }

    pub fn from_json_value(json_value: serde_json::Value) -> Result<Configuration, LoaderError> {
        let json_prop: ConfigurationJsonProp = parse_json_value(json_value)?;
        let holidays = holidays_from_json_vec(&json_prop.holidays, &json_prop.limits)?;
        Ok(Configuration { limits: json_prop.limits, holidays })
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    pub fn holidays(&self) -> &[Arc<dyn Holiday>] {
        &self.holidays
    }

    pub fn holiday(&self, name: &str) -> Result<Arc<dyn Holiday>, LoaderError> {
        self.holidays
            .iter()
            .find(|h| h.name() == name)
            .cloned()
            .ok_or_else(|| LoaderError::NameNotFound(name.to_owned()))
    }

    pub fn holiday_manager(&self) -> Result<HolidayManager, HolidayError> {
        HolidayManager::with_limits(&self.holidays, self.limits)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    #[test]
    fn limits_default_when_absent() {
        let configuration = Configuration::from_json_value(json!({
            "holidays": [{"holiday_type": "Fixed", "name": "New Year", "month": 1, "day": 1}]
        })).unwrap();
        assert_eq!(configuration.limits(), SearchLimits::default());
        assert_eq!(configuration.holiday("New Year").unwrap().name(), "New Year");
        assert!(matches!(configuration.holiday("Epiphany"), Err(LoaderError::NameNotFound(_))));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let result = Configuration::from_json_value(json!({
            "limits": {"horizon_years": 0},
            "holidays": [{"holiday_type": "Fixed", "name": "New Year", "month": 1, "day": 1}]
        }));
        assert!(matches!(result, Err(LoaderError::JsonParse(_))));
    }

    #[test]
    fn manager_uses_configured_limits() {
        let configuration = Configuration::from_json_value(json!({
            "limits": {"horizon_years": 3},
            "holidays": [{"holiday_type": "Fixed", "name": "New Year", "month": 1, "day": 1}]
        })).unwrap();
        let manager = configuration.holiday_manager().unwrap();
        let reference = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(manager.next_n(reference, 10).unwrap().len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(Configuration::from_reader("no/such/holidays.json"), Err(LoaderError::Io(_))));
    }
}
