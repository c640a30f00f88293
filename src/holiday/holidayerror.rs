use thiserror::Error;

/// Failures raised at the call boundary of the holiday engine.
///
/// A holiday that simply has no next date is not an error; it is reported as
/// `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HolidayError {
    #[error("missing argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String)
}

impl HolidayError {
    pub fn empty_name() -> HolidayError {
        HolidayError::InvalidArgument("holiday name must not be empty".to_owned())
    }

    pub fn no_day_precision(type_name: &str) -> HolidayError {
        HolidayError::InvalidArgument(format!("{} does not carry a calendar date", type_name))
    }
}
