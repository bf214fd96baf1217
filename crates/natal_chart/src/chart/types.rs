use crate::angles::{degree_in_sign, normalize, zodiac_sign, ZodiacSign};
use crate::chart::error::ChartError;
use crate::chart::settings::CalculationSettings;
use crate::ephemeris::Body;
use crate::time::UtcInstant;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Largest UTC offset in use anywhere (Line Islands, +14h).
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Birth moment and place, as entered by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Local civil date-time at the birth place.
    pub local: NaiveDateTime,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
    /// Hours east of UTC.
    pub utc_offset_hours: f64,
}

impl BirthData {
    pub fn new(
        local: NaiveDateTime,
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
    ) -> Result<Self, ChartError> {
        let birth = Self {
            local,
            latitude,
            longitude,
            utc_offset_hours,
        };
        birth.validate()?;
        Ok(birth)
    }

    /// Check coordinate and offset ranges.
    pub fn validate(&self) -> Result<(), ChartError> {
        check_range("latitude", self.latitude, 90.0)?;
        check_range("longitude", self.longitude, 180.0)?;
        check_range("utc_offset_hours", self.utc_offset_hours, MAX_UTC_OFFSET_HOURS)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), ChartError> {
    if !value.is_finite() {
        return Err(ChartError::InvalidBirthData {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < -limit || value > limit {
        return Err(ChartError::InvalidBirthData {
            field,
            value,
            reason: "out of range",
        });
    }
    Ok(())
}

/// A resolved body in the chart's zodiac frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Degrees per day
    pub longitude_speed: f64,
    pub latitude_speed: f64,
    /// AU per day
    pub distance_speed: f64,
    pub sign: ZodiacSign,
    /// 0 <= x < 30
    pub degree_in_sign: f64,
    pub retrograde: bool,
}

impl BodyPosition {
    /// Build a position, normalising the longitude and deriving sign and degree.
    pub fn new(
        body: Body,
        longitude: f64,
        latitude: f64,
        distance: f64,
        speeds: [f64; 3],
        retrograde: bool,
    ) -> Self {
        let longitude = normalize(longitude);
        Self {
            body,
            longitude,
            latitude,
            distance,
            longitude_speed: speeds[0],
            latitude_speed: speeds[1],
            distance_speed: speeds[2],
            sign: zodiac_sign(longitude),
            degree_in_sign: degree_in_sign(longitude),
            retrograde,
        }
    }
}

/// Cusp of one house.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// 1..=12
    pub house: u8,
    pub longitude: f64,
    pub sign: ZodiacSign,
}

impl HouseCusp {
    pub fn new(house: u8, longitude: f64) -> Self {
        let longitude = normalize(longitude);
        Self {
            house,
            longitude,
            sign: zodiac_sign(longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    Ascendant,
    Midheaven,
    Descendant,
    ImumCoeli,
}

impl AngleKind {
    pub fn name(self) -> &'static str {
        match self {
            AngleKind::Ascendant => "Ascendant",
            AngleKind::Midheaven => "Midheaven",
            AngleKind::Descendant => "Descendant",
            AngleKind::ImumCoeli => "Imum Coeli",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngle {
    pub kind: AngleKind,
    pub longitude: f64,
    pub sign: ZodiacSign,
}

impl ChartAngle {
    pub fn new(kind: AngleKind, longitude: f64) -> Self {
        let longitude = normalize(longitude);
        Self {
            kind,
            longitude,
            sign: zodiac_sign(longitude),
        }
    }

    /// The point 180° across the chart.
    pub fn opposite(&self, kind: AngleKind) -> Self {
        Self::new(kind, self.longitude + 180.0)
    }
}

/// Conditions that lower confidence in a chart without changing its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    DayNumberOutOfRange {
        julian_day: f64,
        valid_from: f64,
        valid_to: f64,
    },
    AyanamsaExtremeYear { year: i32 },
    BodyOmitted { body: Body, reason: String },
}

/// A complete natal chart. Built once by the engine, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    birth: BirthData,
    utc: UtcInstant,
    julian_day: f64,
    settings: CalculationSettings,
    bodies: Vec<BodyPosition>,
    houses: [HouseCusp; 12],
    ascendant: ChartAngle,
    midheaven: ChartAngle,
    advisories: Vec<Advisory>,
}

impl NatalChart {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        birth: BirthData,
        utc: UtcInstant,
        julian_day: f64,
        settings: CalculationSettings,
        bodies: Vec<BodyPosition>,
        houses: [HouseCusp; 12],
        ascendant: ChartAngle,
        midheaven: ChartAngle,
        advisories: Vec<Advisory>,
    ) -> Self {
        Self {
            birth,
            utc,
            julian_day,
            settings,
            bodies,
            houses,
            ascendant,
            midheaven,
            advisories,
        }
    }

    pub fn birth(&self) -> &BirthData {
        &self.birth
    }

    pub fn utc(&self) -> &UtcInstant {
        &self.utc
    }

    pub fn julian_day(&self) -> f64 {
        self.julian_day
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    /// The ayanamsa resolved for this chart, in degrees.
    pub fn ayanamsa(&self) -> f64 {
        self.settings.ayanamsa
    }

    /// Resolved bodies in fixed resolution order; failed bodies are absent.
    pub fn bodies(&self) -> &[BodyPosition] {
        &self.bodies
    }

    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|p| p.body == body)
    }

    /// Houses 1..=12 in ascending order.
    pub fn houses(&self) -> &[HouseCusp; 12] {
        &self.houses
    }

    pub fn ascendant(&self) -> &ChartAngle {
        &self.ascendant
    }

    pub fn midheaven(&self) -> &ChartAngle {
        &self.midheaven
    }

    pub fn descendant(&self) -> ChartAngle {
        self.ascendant.opposite(AngleKind::Descendant)
    }

    pub fn imum_coeli(&self) -> ChartAngle {
        self.midheaven.opposite(AngleKind::ImumCoeli)
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
