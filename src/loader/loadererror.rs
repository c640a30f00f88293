use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::holiday::holidayerror::HolidayError;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read holiday definitions: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed holiday definition: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("holiday '{0}' not found")]
    NameNotFound(String),

    #[error(transparent)]
    Holiday(#[from] HolidayError)
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, LoaderError> where
    T: DeserializeOwned {
    Ok(serde_json::from_value(json_value)?)
}
