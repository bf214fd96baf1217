//! House cusps and chart angles.
//!
//! Unlike bodies, a failure here is fatal to the chart.

use crate::angles::normalize;
use crate::chart::error::ChartError;
use crate::chart::projector::project_longitude;
use crate::chart::settings::{CalculationSettings, CuspStrategy};
use crate::chart::types::{AngleKind, BirthData, ChartAngle, HouseCusp};
use crate::ephemeris::{EphemerisError, EphemerisProvider, RawHouses, ASCENDANT_INDEX, MIDHEAVEN_INDEX};

#[derive(Debug, Clone, PartialEq)]
pub struct HouseResolution {
    pub cusps: [HouseCusp; 12],
    pub ascendant: ChartAngle,
    pub midheaven: ChartAngle,
}

/// Twelve cusps 30° apart, house 1 on the Ascendant.
pub fn equal_house_cusps(ascendant: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize(ascendant + i as f64 * 30.0))
}

/// Call the provider's house routine and apply the house-system strategy.
pub fn resolve_houses<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    jd: f64,
    birth: &BirthData,
    settings: &CalculationSettings,
) -> Result<HouseResolution, ChartError> {
    let raw = provider.houses(jd, birth.latitude, birth.longitude, settings.house_system)?;
    build_houses(&raw, settings)
}

fn build_houses(raw: &RawHouses, settings: &CalculationSettings) -> Result<HouseResolution, ChartError> {
    let (raw_asc, raw_mc) = match (raw.angles.get(ASCENDANT_INDEX), raw.angles.get(MIDHEAVEN_INDEX)) {
        (Some(asc), Some(mc)) => (*asc, *mc),
        _ => {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("expected Ascendant and Midheaven, got {} angles", raw.angles.len()),
            }
            .into())
        }
    };

    let ascendant = ChartAngle::new(AngleKind::Ascendant, project_longitude(raw_asc, settings));
    let midheaven = ChartAngle::new(AngleKind::Midheaven, project_longitude(raw_mc, settings));

    let longitudes = match settings.house_system.strategy() {
        CuspStrategy::Direct => raw.cusps.map(|cusp| project_longitude(cusp, settings)),
        CuspStrategy::EqualFromAscendant => equal_house_cusps(ascendant.longitude),
    };
    let cusps = std::array::from_fn(|i| HouseCusp::new(i as u8 + 1, longitudes[i]));

    Ok(HouseResolution {
        cusps,
        ascendant,
        midheaven,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::settings::{HouseSystem, ZodiacMode};

    fn raw() -> RawHouses {
        RawHouses {
            cusps: [
                100.0, 125.0, 152.0, 185.0, 220.0, 252.0, 280.0, 305.0, 332.0, 5.0, 40.0, 72.0,
            ],
            angles: vec![100.0, 5.0, 250.0],
        }
    }

    fn settings(zodiac: ZodiacMode, house_system: HouseSystem) -> CalculationSettings {
        CalculationSettings {
            zodiac,
            house_system,
            ayanamsa_year: 2024,
            ayanamsa: 24.0,
        }
    }

    #[test]
    fn test_direct_cusps_keep_provider_order() {
        let houses = build_houses(&raw(), &settings(ZodiacMode::Tropical, HouseSystem::Koch)).unwrap();
        let numbers: Vec<u8> = houses.cusps.iter().map(|c| c.house).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<u8>>());
        assert_eq!(houses.cusps[2].longitude, 152.0);
        assert_eq!(houses.cusps[9].longitude, 5.0);
    }

    #[test]
    fn test_equal_cusps_ignore_provider_cusps() {
        let houses = build_houses(&raw(), &settings(ZodiacMode::Sidereal, HouseSystem::Equal)).unwrap();
        assert_eq!(houses.ascendant.longitude, 76.0);
        assert_eq!(houses.cusps[0].longitude, houses.ascendant.longitude);
        assert_eq!(houses.cusps[1].longitude, 106.0);
        assert_eq!(houses.cusps[11].longitude, 46.0);
    }

    #[test]
    fn test_angles_projected_regardless_of_system() {
        let houses = build_houses(&raw(), &settings(ZodiacMode::Sidereal, HouseSystem::Placidus)).unwrap();
        assert_eq!(houses.ascendant.longitude, 76.0);
        assert_eq!(houses.midheaven.longitude, 341.0);
    }

    #[test]
    fn test_missing_angles_is_an_error() {
        let mut short = raw();
        short.angles.truncate(1);
        let err = build_houses(&short, &settings(ZodiacMode::Tropical, HouseSystem::Placidus));
        assert!(matches!(err, Err(ChartError::HouseResolution(_))));
    }

    #[test]
    fn test_equal_house_cusps_wrap() {
        let cusps = equal_house_cusps(350.0);
        assert_eq!(cusps[0], 350.0);
        assert_eq!(cusps[1], 20.0);
        assert_eq!(cusps[11], 320.0);
    }
}
