//! Per-body resolution against the ephemeris provider.
//!
//! Failures here never abort a chart: the body is logged, recorded and left
//! out of the output sequence.

use crate::angles::normalize;
use crate::chart::projector::project_longitude;
use crate::chart::settings::CalculationSettings;
use crate::chart::types::BodyPosition;
use crate::ephemeris::{Body, CalcFlags, EphemerisProvider, RawBodyPosition};
use std::fmt;

/// Flags for every body request; speeds drive the retrograde flag.
pub const BODY_FLAGS: CalcFlags = CalcFlags::SWIEPH.union(CalcFlags::SPEED);

/// One step of the fixed resolution order.
#[derive(Clone, Copy)]
pub enum ResolutionStep {
    /// Ask the provider for this body.
    Provider(Body),
    /// Compute this body from an already resolved sibling.
    Derived {
        body: Body,
        from: Body,
        derive: fn(&BodyPosition) -> BodyPosition,
    },
}

impl fmt::Debug for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStep::Provider(body) => f.debug_tuple("Provider").field(body).finish(),
            ResolutionStep::Derived { body, from, .. } => f
                .debug_struct("Derived")
                .field("body", body)
                .field("from", from)
                .finish_non_exhaustive(),
        }
    }
}

impl ResolutionStep {
    pub fn body(&self) -> Body {
        match self {
            ResolutionStep::Provider(body) => *body,
            ResolutionStep::Derived { body, .. } => *body,
        }
    }
}

/// Primary bodies first, then the additional points. The south node is
/// derived right after the north node it depends on.
pub const RESOLUTION_PLAN: [ResolutionStep; 15] = [
    ResolutionStep::Provider(Body::Sun),
    ResolutionStep::Provider(Body::Moon),
    ResolutionStep::Provider(Body::Mercury),
    ResolutionStep::Provider(Body::Venus),
    ResolutionStep::Provider(Body::Mars),
    ResolutionStep::Provider(Body::Jupiter),
    ResolutionStep::Provider(Body::Saturn),
    ResolutionStep::Provider(Body::Uranus),
    ResolutionStep::Provider(Body::Neptune),
    ResolutionStep::Provider(Body::Pluto),
    ResolutionStep::Provider(Body::NorthNode),
    ResolutionStep::Derived {
        body: Body::SouthNode,
        from: Body::NorthNode,
        derive: derive_south_node,
    },
    ResolutionStep::Provider(Body::Chiron),
    ResolutionStep::Provider(Body::Lilith),
    ResolutionStep::Provider(Body::Proserpine),
];

/// A body left out of the chart and why.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFailure {
    pub body: Body,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyResolution {
    pub positions: Vec<BodyPosition>,
    pub failures: Vec<BodyFailure>,
}

/// The lunar south node mirrors the north node.
///
/// The retrograde flag is carried over as is rather than recomputed from the
/// negated speed.
pub fn derive_south_node(north: &BodyPosition) -> BodyPosition {
    BodyPosition::new(
        Body::SouthNode,
        normalize(north.longitude + 180.0),
        -north.latitude,
        north.distance,
        [
            -north.longitude_speed,
            -north.latitude_speed,
            north.distance_speed,
        ],
        north.retrograde,
    )
}

/// Project a raw provider result into a chart position.
pub fn position_from_raw(
    body: Body,
    raw: &RawBodyPosition,
    settings: &CalculationSettings,
) -> BodyPosition {
    BodyPosition::new(
        body,
        project_longitude(raw.longitude, settings),
        raw.latitude,
        raw.distance,
        [raw.longitude_speed, raw.latitude_speed, raw.distance_speed],
        raw.longitude_speed < 0.0,
    )
}

/// Resolve all bodies in [`RESOLUTION_PLAN`] order.
pub fn resolve_bodies<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    jd: f64,
    settings: &CalculationSettings,
) -> BodyResolution {
    let mut resolution = BodyResolution::default();

    for step in RESOLUTION_PLAN.iter() {
        match *step {
            ResolutionStep::Provider(body) => {
                match provider.body_position(jd, body, BODY_FLAGS) {
                    Ok(raw) => resolution
                        .positions
                        .push(position_from_raw(body, &raw, settings)),
                    Err(e) => {
                        log::warn!("Omitting {} from chart: {}", body, e);
                        resolution.failures.push(BodyFailure {
                            body,
                            reason: e.to_string(),
                        });
                    }
                }
            }
            ResolutionStep::Derived { body, from, derive } => {
                let source = resolution.positions.iter().find(|p| p.body == from).copied();
                match source {
                    Some(source) => resolution.positions.push(derive(&source)),
                    None => {
                        log::warn!("Omitting {}: {} was not resolved", body, from);
                        resolution.failures.push(BodyFailure {
                            body,
                            reason: format!("{} unavailable", from),
                        });
                    }
                }
            }
        }
    }

    resolution
}
