use crate::ayanamsa::ayanamsa_with_advisory;
use crate::chart::types::BirthData;
use crate::ephemeris::EphemerisError;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacMode {
    #[default]
    Tropical,
    Sidereal,
}

impl ZodiacMode {
    pub fn name(self) -> &'static str {
        match self {
            ZodiacMode::Tropical => "Tropical",
            ZodiacMode::Sidereal => "Sidereal",
        }
    }
}

impl FromStr for ZodiacMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tropical" => Ok(ZodiacMode::Tropical),
            "sidereal" => Ok(ZodiacMode::Sidereal),
            other => Err(format!("Unknown zodiac: {} (expected tropical or sidereal)", other)),
        }
    }
}

/// How the twelve cusps are derived from the provider's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuspStrategy {
    /// Take the provider's twelve cusps in order.
    Direct,
    /// Discard the provider's cusps and step 30° from the Ascendant.
    EqualFromAscendant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, HouseSystem)] = &[
    ("placidus", HouseSystem::Placidus),
    ("koch", HouseSystem::Koch),
    ("equal", HouseSystem::Equal),
    ("whole_sign", HouseSystem::WholeSign),
    ("regiomontanus", HouseSystem::Regiomontanus),
    ("campanus", HouseSystem::Campanus),
    ("alcabitius", HouseSystem::Alcabitius),
    ("morinus", HouseSystem::Morinus),
];

impl HouseSystem {
    /// Single-byte code understood by the ephemeris house routine.
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'A',
            HouseSystem::Morinus => b'M',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "Placidus",
            HouseSystem::Koch => "Koch",
            HouseSystem::Equal => "Equal",
            HouseSystem::WholeSign => "Whole Sign",
            HouseSystem::Regiomontanus => "Regiomontanus",
            HouseSystem::Campanus => "Campanus",
            HouseSystem::Alcabitius => "Alcabitius",
            HouseSystem::Morinus => "Morinus",
        }
    }

    pub fn strategy(self) -> CuspStrategy {
        match self {
            HouseSystem::Equal => CuspStrategy::EqualFromAscendant,
            _ => CuspStrategy::Direct,
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        HOUSE_SYSTEMS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, system)| *system)
            .ok_or_else(|| EphemerisError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
            })
    }
}

/// Which calendar year feeds the ayanamsa.
///
/// `Current` reads the wall clock at calculation time, so the same birth
/// data can yield different sidereal longitudes in different years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "AyanamsaYearRepr", into = "AyanamsaYearRepr")]
pub enum AyanamsaYear {
    #[default]
    Current,
    Birth,
    Fixed(i32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AyanamsaYearRepr {
    Year(i32),
    Anchor(String),
}

impl TryFrom<AyanamsaYearRepr> for AyanamsaYear {
    type Error = String;

    fn try_from(repr: AyanamsaYearRepr) -> Result<Self, Self::Error> {
        match repr {
            AyanamsaYearRepr::Year(year) => Ok(AyanamsaYear::Fixed(year)),
            AyanamsaYearRepr::Anchor(anchor) => match anchor.to_lowercase().as_str() {
                "current" => Ok(AyanamsaYear::Current),
                "birth" => Ok(AyanamsaYear::Birth),
                other => Err(format!(
                    "ayanamsa_year must be \"current\", \"birth\" or a year, got {:?}",
                    other
                )),
            },
        }
    }
}

impl From<AyanamsaYear> for AyanamsaYearRepr {
    fn from(year: AyanamsaYear) -> Self {
        match year {
            AyanamsaYear::Current => AyanamsaYearRepr::Anchor("current".to_string()),
            AyanamsaYear::Birth => AyanamsaYearRepr::Anchor("birth".to_string()),
            AyanamsaYear::Fixed(y) => AyanamsaYearRepr::Year(y),
        }
    }
}

/// Externally stored chart preferences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub zodiac: ZodiacMode,
    pub house_system: HouseSystem,
    pub ayanamsa_year: AyanamsaYear,
}

/// Settings resolved once per chart request and threaded through every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationSettings {
    pub zodiac: ZodiacMode,
    pub house_system: HouseSystem,
    /// Year the ayanamsa was computed for.
    pub ayanamsa_year: i32,
    /// Sidereal correction in degrees; only applied in sidereal mode.
    pub ayanamsa: f64,
}

impl CalculationSettings {
    pub fn new(zodiac: ZodiacMode, house_system: HouseSystem, ayanamsa_year: i32) -> Self {
        let (ayanamsa, _) = ayanamsa_with_advisory(ayanamsa_year);
        Self {
            zodiac,
            house_system,
            ayanamsa_year,
            ayanamsa,
        }
    }

    /// Resolve settings for one request; `current_year` is the calendar year
    /// at calculation time.
    pub fn from_config(config: &ChartConfig, birth: &BirthData, current_year: i32) -> Self {
        let year = match config.ayanamsa_year {
            AyanamsaYear::Current => current_year,
            AyanamsaYear::Birth => birth.local.year(),
            AyanamsaYear::Fixed(year) => year,
        };
        Self::new(config.zodiac, config.house_system, year)
    }

    pub fn is_sidereal(&self) -> bool {
        self.zodiac == ZodiacMode::Sidereal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn birth() -> BirthData {
        let local = NaiveDate::from_ymd_opt(1990, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        BirthData::new(local, 55.7558, 37.6176, 3.0).unwrap()
    }

    #[test]
    fn test_house_system_from_str() {
        assert_eq!("Placidus".parse::<HouseSystem>().unwrap(), HouseSystem::Placidus);
        assert_eq!("whole sign".parse::<HouseSystem>().unwrap(), HouseSystem::WholeSign);
        assert!(matches!(
            "topocentric".parse::<HouseSystem>(),
            Err(EphemerisError::InvalidHouseSystem { .. })
        ));
    }

    #[test]
    fn test_only_equal_uses_equal_division() {
        for (_, system) in HOUSE_SYSTEMS {
            let expected = if *system == HouseSystem::Equal {
                CuspStrategy::EqualFromAscendant
            } else {
                CuspStrategy::Direct
            };
            assert_eq!(system.strategy(), expected);
        }
    }

    #[test]
    fn test_current_year_anchor_ignores_birth_year() {
        let settings = CalculationSettings::from_config(&ChartConfig::default(), &birth(), 2026);
        assert_eq!(settings.ayanamsa_year, 2026);
        assert_eq!(settings.ayanamsa, crate::ayanamsa::ayanamsa(2026));
    }

    #[test]
    fn test_birth_and_fixed_anchors() {
        let mut config = ChartConfig {
            ayanamsa_year: AyanamsaYear::Birth,
            ..ChartConfig::default()
        };
        assert_eq!(CalculationSettings::from_config(&config, &birth(), 2026).ayanamsa_year, 1990);
        config.ayanamsa_year = AyanamsaYear::Fixed(2000);
        assert_eq!(CalculationSettings::from_config(&config, &birth(), 2026).ayanamsa_year, 2000);
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let config: ChartConfig = serde_json::from_str(
            r#"{"zodiac":"sidereal","house_system":"koch","ayanamsa_year":1950}"#,
        )
        .unwrap();
        assert_eq!(config.zodiac, ZodiacMode::Sidereal);
        assert_eq!(config.house_system, HouseSystem::Koch);
        assert_eq!(config.ayanamsa_year, AyanamsaYear::Fixed(1950));

        let defaults: ChartConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, ChartConfig::default());

        let bad = serde_json::from_str::<ChartConfig>(r#"{"ayanamsa_year":"yesterday"}"#);
        assert!(bad.is_err());
    }
}
