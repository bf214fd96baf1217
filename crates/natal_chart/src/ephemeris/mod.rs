pub mod error;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use error::EphemerisError;
pub use types::{
    Body, CalcFlags, CalendarConvention, EphemerisProvider, RawBodyPosition, RawHouses,
    ASCENDANT_INDEX, MIDHEAVEN_INDEX,
};
