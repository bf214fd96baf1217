//! Linear precession model for the sidereal offset.

use crate::angles::normalize;

/// Year in which the tropical and sidereal frames coincide.
pub const REFERENCE_YEAR: i32 = 285;

/// Precession rate in arc seconds per year.
pub const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.29;

/// Below this year the linear model drifts noticeably.
pub const ANCIENT_YEAR_LIMIT: i32 = -2000;

/// Above this year the value is a pure extrapolation.
pub const FUTURE_YEAR_LIMIT: i32 = 3000;

/// Sidereal correction in degrees for a calendar year.
pub fn ayanamsa(year: i32) -> f64 {
    let elapsed = f64::from(year - REFERENCE_YEAR);
    normalize(elapsed * (PRECESSION_ARCSEC_PER_YEAR / 3600.0))
}

/// Whether `year` falls outside the span the linear model was fitted for.
pub fn is_extreme_year(year: i32) -> bool {
    year < ANCIENT_YEAR_LIMIT || year > FUTURE_YEAR_LIMIT
}

/// Same as [`ayanamsa`], logging a warning for extreme years.
///
/// Returns the value and whether the advisory fired.
pub fn ayanamsa_with_advisory(year: i32) -> (f64, bool) {
    let value = ayanamsa(year);
    let extreme = is_extreme_year(year);
    if year < ANCIENT_YEAR_LIMIT {
        log::warn!(
            "ayanamsa for year {} uses a linear model; precision degrades before {}",
            year,
            ANCIENT_YEAR_LIMIT
        );
    } else if year > FUTURE_YEAR_LIMIT {
        log::warn!(
            "ayanamsa for year {} is extrapolated beyond {}",
            year,
            FUTURE_YEAR_LIMIT
        );
    }
    (value, extreme)
}
