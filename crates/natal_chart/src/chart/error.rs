use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Failures that abort a chart computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("No ephemeris provider is available")]
    ProviderUnavailable,
    #[error("Invalid birth data: {field} = {value} ({reason})")]
    InvalidBirthData {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Time conversion failed: {message}")]
    TimeConversion { message: String },
    #[error("House and angle resolution failed: {0}")]
    HouseResolution(#[from] EphemerisError),
}
