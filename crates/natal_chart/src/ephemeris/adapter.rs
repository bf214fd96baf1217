use crate::chart::HouseSystem;
use crate::ephemeris::error::EphemerisError;
use crate::ephemeris::types::{
    Body, CalcFlags, CalendarConvention, EphemerisProvider, RawBodyPosition, RawHouses,
};
use std::env;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use swisseph::swe::{self, calc_ut, houses_ex, julday};
use swisseph::{AscMc, Cusp};

/// JD of 1800-01-01 00:00 UT, start of the `_18` data files.
pub const DEFAULT_VALID_FROM_JD: f64 = 2_378_496.5;
/// JD of 2400-01-01 00:00 UT, end of the `_18` data files.
pub const DEFAULT_VALID_TO_JD: f64 = 2_597_641.5;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// Swiss Ephemeris body numbers. The south node is derived, never requested.
const BODY_CODES: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
    (Body::NorthNode, 11), // TRUE_NODE
    (Body::Lilith, 12),    // MEAN_APOG
    (Body::Chiron, 15),
    (Body::Proserpine, 57), // PROSERPINA; 48 is ISIS
];

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    valid_range: RangeInclusive<f64>,
    closed: bool,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = resolve_ephemeris_path(ephemeris_path);

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        swe::set_ephe_path(&path.to_string_lossy());
        log::info!("Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            ephemeris_path: path,
            valid_range: DEFAULT_VALID_FROM_JD..=DEFAULT_VALID_TO_JD,
            closed: false,
        })
    }

    /// Override the day-number span the installed data files cover.
    pub fn with_valid_range(mut self, from_jd: f64, to_jd: f64) -> Self {
        self.valid_range = from_jd..=to_jd;
        self
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn day_number(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
        calendar: CalendarConvention,
    ) -> f64 {
        julday(year, month as i32, day as i32, hour, calendar as u32)
    }

    fn body_position(
        &mut self,
        jd: f64,
        body: Body,
        flags: CalcFlags,
    ) -> Result<RawBodyPosition, EphemerisError> {
        let code = body_code(body)?;
        let result = calc_ut(jd, code as u32, flags.bits()).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        let raw = RawBodyPosition::from_array([out[0], out[1], out[2], out[3], out[4], out[5]]);
        if !raw.longitude.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(raw)
    }

    fn houses(
        &mut self,
        jd: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        // Tropical output; the chart engine applies the sidereal shift itself.
        let (c, a) = houses_ex(jd, 0, latitude, longitude, system.code() as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite())
            || !ascmc.ascendant.is_finite()
            || !ascmc.mc.is_finite()
        {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{} houses undefined at latitude {:.4}",
                    system.name(),
                    latitude
                ),
            });
        }

        Ok(RawHouses {
            cusps: cusp_values,
            angles: vec![ascmc.ascendant, ascmc.mc],
        })
    }

    fn supported_range(&self) -> RangeInclusive<f64> {
        self.valid_range.clone()
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            swe::close();
            log::debug!("Swiss Ephemeris adapter released");
        }
    }
}

fn resolve_ephemeris_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
    })
}

fn body_code(body: Body) -> Result<i32, EphemerisError> {
    BODY_CODES
        .iter()
        .find(|(b, _)| *b == body)
        .map(|(_, code)| *code)
        .ok_or(EphemerisError::UnsupportedBody { body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_south_node_has_no_code() {
        assert!(matches!(
            body_code(Body::SouthNode),
            Err(EphemerisError::UnsupportedBody { body: Body::SouthNode })
        ));
    }

    #[test]
    fn test_every_requested_body_has_a_code() {
        for body in Body::ALL.iter().filter(|b| **b != Body::SouthNode) {
            assert!(body_code(*body).is_ok(), "{} missing", body);
        }
    }

    #[test]
    fn test_body_codes_match_swiss_ephemeris_ids() {
        assert_eq!(body_code(Body::Sun).ok(), Some(0));
        assert_eq!(body_code(Body::Pluto).ok(), Some(9));
        assert_eq!(body_code(Body::NorthNode).ok(), Some(11));
        assert_eq!(body_code(Body::Lilith).ok(), Some(12));
        assert_eq!(body_code(Body::Chiron).ok(), Some(15));
        assert_eq!(body_code(Body::Proserpine).ok(), Some(57));
    }

    #[test]
    fn test_day_number_at_j2000() {
        let mut adapter = SwissEphemerisAdapter::new(Some(env::temp_dir())).unwrap();
        let jd = adapter.day_number(2000, 1, 1, 12.0, CalendarConvention::Gregorian);
        assert!((jd - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_close_releases_once() {
        let dir = env::temp_dir();
        let mut adapter = SwissEphemerisAdapter::new(Some(dir)).unwrap();
        assert!(!adapter.closed);
        adapter.close();
        assert!(adapter.closed);
        adapter.close();
        assert!(adapter.closed);
    }

    #[test]
    fn test_missing_path_is_reported() {
        let err = SwissEphemerisAdapter::new(Some(PathBuf::from("/nonexistent/ephe"))).err();
        assert!(matches!(err, Some(EphemerisError::FileNotFound { .. })));
    }
}
