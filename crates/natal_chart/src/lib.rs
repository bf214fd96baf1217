//! Natal chart assembly on top of an external ephemeris.
//!
//! The ephemeris itself sits behind [`ephemeris::EphemerisProvider`]; this
//! crate converts birth time, applies the zodiac frame, derives the south
//! node, picks the house-cusp strategy and decides which failures are fatal.

pub mod angles;
pub mod ayanamsa;
pub mod chart;
pub mod ephemeris;
pub mod time;

pub use angles::{degree_in_sign, normalize, zodiac_sign, ZodiacSign};
pub use chart::{
    Advisory, BirthData, BodyPosition, CalculationSettings, ChartAngle, ChartConfig, ChartEngine,
    ChartError, HouseCusp, HouseSystem, NatalChart, ZodiacMode,
};
pub use ephemeris::{Body, EphemerisError, EphemerisProvider};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
