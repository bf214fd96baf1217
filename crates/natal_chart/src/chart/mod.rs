pub mod bodies;
pub mod describe;
pub mod engine;
pub mod error;
pub mod houses;
pub mod projector;
pub mod settings;
pub mod types;

pub use bodies::{derive_south_node, resolve_bodies, BodyFailure, BodyResolution, ResolutionStep, RESOLUTION_PLAN};
pub use describe::{describe_body, describe_calculation_system};
pub use engine::ChartEngine;
pub use error::ChartError;
pub use houses::{equal_house_cusps, resolve_houses, HouseResolution};
pub use projector::project_longitude;
pub use settings::{AyanamsaYear, CalculationSettings, ChartConfig, CuspStrategy, HouseSystem, ZodiacMode};
pub use types::{Advisory, AngleKind, BirthData, BodyPosition, ChartAngle, HouseCusp, NatalChart};
