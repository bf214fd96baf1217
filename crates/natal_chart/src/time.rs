//! Local civil time to the UTC calendar parts the ephemeris expects.

use crate::chart::{BirthData, ChartError};
use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A UTC moment split the way a day-number routine consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtcInstant {
    pub datetime: NaiveDateTime,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Hour of day with minutes and seconds folded in.
    pub hour: f64,
}

/// Shift the local birth time by its UTC offset.
///
/// The subtraction is done on the full date-time, so crossing midnight moves
/// the day, month and year along with it.
pub fn to_utc(birth: &BirthData) -> Result<UtcInstant, ChartError> {
    let offset_seconds = (birth.utc_offset_hours * 3600.0).round() as i64;
    let utc = birth
        .local
        .checked_sub_signed(Duration::seconds(offset_seconds))
        .ok_or_else(|| ChartError::TimeConversion {
            message: format!(
                "{} shifted by {}h is outside the representable range",
                birth.local, birth.utc_offset_hours
            ),
        })?;
    Ok(UtcInstant::from_datetime(utc))
}

impl UtcInstant {
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            datetime,
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: fractional_hour(&datetime),
        }
    }
}

fn fractional_hour(dt: &NaiveDateTime) -> f64 {
    f64::from(dt.hour()) + f64::from(dt.minute()) / 60.0 + f64::from(dt.second()) / 3600.0
}
