//! Error types for the rotor-field core.
//!
//! The field math itself never fails; these errors come from building
//! geometry, loading scenarios, and parsing user-facing names.

use thiserror::Error;

/// Errors produced while configuring or driving the bearing field engine.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Raster width or height was zero (or too large for the image format).
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Bearing geometry was rejected (non-positive radius/width, non-finite vertex).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A scenario description failed validation.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// A field type name did not match `pressure`, `thickness`, or `temperature`.
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),

    /// A preset name was not found in the preset registry.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A bearing index was outside the assembly.
    #[error("bearing index {index} out of range for assembly of {count} bearing(s)")]
    BearingOutOfRange { index: usize, count: usize },

    /// Reading a scenario or writing a snapshot failed.
    #[error("I/O error: {0}")]
    Io(String),
}
