#![deny(unsafe_code)]
//! Core of the rotor-field bearing visualizer.
//!
//! Turns bearing geometry, rotor speed and elapsed time into per-vertex film
//! pressure, thickness and temperature (`profile`, `evaluator`), aggregates
//! them into legend ranges and charting history (`aggregate`), and maps the
//! selected field to color and radial displacement (`display`). `simulation`
//! runs those stages in order once per frame for a whole assembly.

pub mod aggregate;
pub mod color;
pub mod display;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod field;
pub mod geometry;
pub mod load;
pub mod params;
pub mod profile;
pub mod scenario;
pub mod simulation;

pub use aggregate::{HistoryBuffer, HistoryLog, LegendRange};
pub use color::Srgb;
pub use display::DisplayBuffers;
pub use engine::Engine;
pub use error::FieldError;
pub use field::{BearingStats, FieldType, FieldValues};
pub use geometry::BearingGeometry;
pub use load::{BearingLoadConfig, PadLayout};
pub use scenario::{BearingSpec, Scenario};
pub use simulation::{Bearing, Frame, RotorSimulation, SimulationParams};
