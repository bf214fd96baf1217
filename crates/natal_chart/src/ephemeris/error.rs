use crate::ephemeris::types::Body;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("{body} is not supplied by this ephemeris")]
    UnsupportedBody { body: Body },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: Body, jd: f64, message: String },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
}
