#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use natal_chart::chart::HouseSystem;
use natal_chart::ephemeris::{
    Body, CalcFlags, CalendarConvention, EphemerisError, EphemerisProvider, RawBodyPosition,
    RawHouses,
};
use natal_chart::BirthData;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use std::rc::Rc;

/// Scripted provider: fixed raw output, configurable failures, call log.
pub struct StubProvider {
    pub bodies: HashMap<Body, RawBodyPosition>,
    pub failing: HashSet<Body>,
    pub houses: RawHouses,
    pub fail_houses: bool,
    pub range: RangeInclusive<f64>,
    pub day_number_calls: Vec<(i32, u32, u32, f64)>,
    pub body_requests: Vec<(Body, CalcFlags)>,
    pub house_requests: Vec<HouseSystem>,
    pub closed: Rc<Cell<u32>>,
}

pub fn raw(longitude: f64, latitude: f64, longitude_speed: f64) -> RawBodyPosition {
    RawBodyPosition {
        longitude,
        latitude,
        distance: 1.0,
        longitude_speed,
        latitude_speed: 0.01,
        distance_speed: 0.001,
    }
}

impl StubProvider {
    pub fn new() -> Self {
        let bodies = HashMap::from([
            (Body::Sun, raw(84.2, 0.0, 0.955)),
            (Body::Moon, raw(201.7, -4.1, 13.2)),
            (Body::Mercury, raw(70.25, 1.2, -0.31)),
            (Body::Venus, raw(45.9, -1.5, 1.18)),
            (Body::Mars, raw(3.4, -0.8, 0.69)),
            (Body::Jupiter, raw(97.1, 0.3, 0.23)),
            (Body::Saturn, raw(293.6, 0.1, -0.05)),
            (Body::Uranus, raw(278.2, -0.4, -0.04)),
            (Body::Neptune, raw(283.9, 0.8, -0.02)),
            (Body::Pluto, raw(225.5, 15.2, -0.01)),
            (Body::NorthNode, raw(308.4, 0.0, -0.053)),
            (Body::Chiron, raw(108.6, 6.9, 0.06)),
            (Body::Lilith, raw(152.8, 4.7, 0.11)),
            (Body::Proserpine, raw(80.1, 0.0, 0.002)),
        ]);
        Self {
            bodies,
            failing: HashSet::new(),
            houses: RawHouses {
                cusps: [
                    180.5, 207.3, 237.9, 271.2, 303.0, 330.4, 0.5, 27.3, 57.9, 91.2, 123.0, 150.4,
                ],
                angles: vec![180.5, 91.2, 271.0, 200.1],
            },
            fail_houses: false,
            range: 2_378_496.5..=2_597_641.5,
            day_number_calls: Vec::new(),
            body_requests: Vec::new(),
            house_requests: Vec::new(),
            closed: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing_on(mut self, body: Body) -> Self {
        self.failing.insert(body);
        self
    }

    pub fn failing_houses(mut self) -> Self {
        self.fail_houses = true;
        self
    }
}

impl EphemerisProvider for StubProvider {
    fn day_number(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
        hour: f64,
        _calendar: CalendarConvention,
    ) -> f64 {
        self.day_number_calls.push((year, month, day, hour));
        gregorian_julian_day(year, month, day, hour)
    }

    fn body_position(
        &mut self,
        jd: f64,
        body: Body,
        flags: CalcFlags,
    ) -> Result<RawBodyPosition, EphemerisError> {
        self.body_requests.push((body, flags));
        if self.failing.contains(&body) {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd,
                message: "stub failure".to_string(),
            });
        }
        self.bodies
            .get(&body)
            .copied()
            .ok_or(EphemerisError::UnsupportedBody { body })
    }

    fn houses(
        &mut self,
        _jd: f64,
        _latitude: f64,
        _longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        self.house_requests.push(system);
        if self.fail_houses {
            return Err(EphemerisError::HouseCalculationFailed {
                message: "stub failure".to_string(),
            });
        }
        Ok(self.houses.clone())
    }

    fn supported_range(&self) -> RangeInclusive<f64> {
        self.range.clone()
    }

    fn close(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

/// Meeus, Astronomical Algorithms ch. 7.
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (f64::from(y) / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (f64::from(y) + 4716.0)).floor()
        + (30.6001 * (f64::from(m) + 1.0)).floor()
        + f64::from(day)
        + hour / 24.0
        + b
        - 1524.5
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

pub fn moscow_birth() -> BirthData {
    BirthData::new(local(1990, 6, 15, 14, 30, 0), 55.7558, 37.6176, 3.0).unwrap()
}
