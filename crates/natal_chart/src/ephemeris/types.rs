use crate::chart::HouseSystem;
use crate::ephemeris::error::EphemerisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, RangeInclusive};

/// Position in the angle output of a house calculation.
pub const ASCENDANT_INDEX: usize = 0;
pub const MIDHEAVEN_INDEX: usize = 1;

/// Bodies a natal chart resolves, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Chiron,
    Lilith,
    Proserpine,
}

impl Body {
    pub const ALL: [Body; 15] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
        Body::Chiron,
        Body::Lilith,
        Body::Proserpine,
    ];

    pub const PRIMARY: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Stable identifier, e.g. `north_node`.
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
            Body::Chiron => "chiron",
            Body::Lilith => "lilith",
            Body::Proserpine => "proserpine",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
            Body::Chiron => "Chiron",
            Body::Lilith => "Lilith",
            Body::Proserpine => "Proserpine",
        }
    }

    pub fn is_primary(self) -> bool {
        Self::PRIMARY.contains(&self)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calculation flags passed through to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CalcFlags(u32);

impl CalcFlags {
    /// Use the compressed ephemeris data files.
    pub const SWIEPH: CalcFlags = CalcFlags(2);
    /// Fill in the three speed components.
    pub const SPEED: CalcFlags = CalcFlags(256);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: CalcFlags) -> CalcFlags {
        CalcFlags(self.0 | other.0)
    }

    pub const fn contains(self, other: CalcFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CalcFlags {
    type Output = CalcFlags;

    fn bitor(self, rhs: CalcFlags) -> CalcFlags {
        self.union(rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarConvention {
    Julian = 0,
    Gregorian = 1,
}

/// Raw ecliptic output for one body, tropical frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBodyPosition {
    pub longitude: f64,
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    pub longitude_speed: f64,
    pub latitude_speed: f64,
    pub distance_speed: f64,
}

impl RawBodyPosition {
    pub fn from_array(out: [f64; 6]) -> Self {
        Self {
            longitude: out[0],
            latitude: out[1],
            distance: out[2],
            longitude_speed: out[3],
            latitude_speed: out[4],
            distance_speed: out[5],
        }
    }
}

/// Raw output of a house calculation, tropical frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHouses {
    /// Cusps of houses 1..=12 in order.
    pub cusps: [f64; 12],
    /// Angle values; Ascendant at index 0, Midheaven at index 1.
    pub angles: Vec<f64>,
}

/// The ephemeris computation the chart engine delegates to.
///
/// Implementations are driven by one chart computation at a time; methods
/// take `&mut self` so an engine can never overlap calls on one provider.
pub trait EphemerisProvider {
    /// Continuous day number for a UTC calendar moment.
    fn day_number(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
        calendar: CalendarConvention,
    ) -> f64;

    /// Ecliptic position and speeds for one body. `flags` always carries
    /// [`CalcFlags::SPEED`] when called by the engine.
    fn body_position(
        &mut self,
        jd: f64,
        body: Body,
        flags: CalcFlags,
    ) -> Result<RawBodyPosition, EphemerisError>;

    /// House cusps and chart angles for a location.
    fn houses(
        &mut self,
        jd: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError>;

    /// Day numbers the provider's data covers. Values outside are still
    /// computed, at lower confidence.
    fn supported_range(&self) -> RangeInclusive<f64>;

    /// Release provider resources. Called once when the owning engine shuts down.
    fn close(&mut self) {}
}
