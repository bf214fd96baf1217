//! Angle utilities for ecliptic longitudes.
//!
//! Every longitude that leaves this crate passes through [`normalize`] first,
//! so the sign and degree helpers can rely on a `[0, 360)` input.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const FULL_CIRCLE: f64 = 360.0;
pub const SIGN_SPAN: f64 = 30.0;

/// Bring any finite angle into `[0, 360)`.
///
/// Uses a Euclidean remainder instead of repeated add/subtract so that very
/// large inputs terminate in constant time. Non-finite input maps to `0.0`.
pub fn normalize(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(FULL_CIRCLE);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= FULL_CIRCLE {
        0.0
    } else {
        wrapped
    }
}

/// Sign index 0..=11 for a longitude.
pub fn sign_index(longitude: f64) -> u8 {
    ((normalize(longitude) / SIGN_SPAN).floor() as u8) % 12
}

/// Zodiac sign containing a longitude.
pub fn zodiac_sign(longitude: f64) -> ZodiacSign {
    ZodiacSign::from_index(sign_index(longitude))
}

/// Position inside the sign, always in `[0, 30)`.
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize(longitude) % SIGN_SPAN
}

/// Format an angle as whole degrees and arc minutes, e.g. `24°17'`.
pub fn format_degrees(value: f64) -> String {
    let total_minutes = (value.abs() * 60.0).floor() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}°{:02}'", sign, total_minutes / 60, total_minutes % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign for an index; wraps modulo 12.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 12) as usize]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
