//! Reprojection of tropical ecliptic longitudes into the chart's zodiac.

use crate::angles::normalize;
use crate::chart::settings::{CalculationSettings, ZodiacMode};

/// Move a raw tropical longitude into the frame `settings` selects.
///
/// Applies to longitudes only: body longitudes, house cusps and angles.
/// Latitude, distance and speeds are frame independent.
pub fn project_longitude(raw_longitude: f64, settings: &CalculationSettings) -> f64 {
    match settings.zodiac {
        ZodiacMode::Tropical => normalize(raw_longitude),
        ZodiacMode::Sidereal => normalize(raw_longitude - settings.ayanamsa),
    }
}
