//! Per-vertex scalar fields of one bearing.
//!
//! Pressure, film thickness, and temperature are always computed together
//! from the same normalized pressure, so they are stored side by side as a
//! struct of arrays. Which one is shown is decided later by [`FieldType`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Selectable scalar field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Pressure,
    Thickness,
    Temperature,
}

impl FieldType {
    /// All field types in display order.
    pub const ALL: [FieldType; 3] = [
        FieldType::Pressure,
        FieldType::Thickness,
        FieldType::Temperature,
    ];

    /// Lowercase name used in params, scenarios and the CLI.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Pressure => "pressure",
            FieldType::Thickness => "thickness",
            FieldType::Temperature => "temperature",
        }
    }

    /// Display unit for legend labels.
    pub fn unit(self) -> &'static str {
        match self {
            FieldType::Pressure => "bar",
            FieldType::Thickness => "µm",
            FieldType::Temperature => "°C",
        }
    }

    /// Visual exaggeration applied to the normalized value to get a radial
    /// displacement.
    pub fn displacement_factor(self) -> f64 {
        match self {
            FieldType::Pressure => 0.5,
            FieldType::Thickness => 0.15,
            FieldType::Temperature => 0.25,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FieldError::UnknownFieldType(s.to_string()))
    }
}

/// The three field values of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub pressure: f64,
    pub thickness: f64,
    pub temperature: f64,
}

impl FieldSample {
    /// The value of the selected field.
    pub fn value(&self, field: FieldType) -> f64 {
        match field {
            FieldType::Pressure => self.pressure,
            FieldType::Thickness => self.thickness,
            FieldType::Temperature => self.temperature,
        }
    }
}

/// Struct-of-arrays storage for one bearing's per-vertex fields.
///
/// The three vectors always have the same length. Buffers are handed to the
/// evaluator by value each frame so allocations can be reused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValues {
    pressure: Vec<f64>,
    thickness: Vec<f64>,
    temperature: Vec<f64>,
}

impl FieldValues {
    /// Empty buffers with room for `len` vertices.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            pressure: Vec::with_capacity(len),
            thickness: Vec::with_capacity(len),
            temperature: Vec::with_capacity(len),
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    /// True if no vertices are stored.
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Drops all values, keeping capacity.
    pub fn clear(&mut self) {
        self.pressure.clear();
        self.thickness.clear();
        self.temperature.clear();
    }

    /// Appends one vertex.
    pub fn push(&mut self, sample: FieldSample) {
        self.pressure.push(sample.pressure);
        self.thickness.push(sample.thickness);
        self.temperature.push(sample.temperature);
    }

    /// The values of one field, one per vertex.
    pub fn get(&self, field: FieldType) -> &[f64] {
        match field {
            FieldType::Pressure => &self.pressure,
            FieldType::Thickness => &self.thickness,
            FieldType::Temperature => &self.temperature,
        }
    }

    /// The three values of vertex `index`, or `None` if out of range.
    pub fn sample(&self, index: usize) -> Option<FieldSample> {
        Some(FieldSample {
            pressure: *self.pressure.get(index)?,
            thickness: *self.thickness.get(index)?,
            temperature: *self.temperature.get(index)?,
        })
    }

    /// Iterates over all vertices in order.
    pub fn iter(&self) -> impl Iterator<Item = FieldSample> + '_ {
        self.pressure
            .iter()
            .zip(&self.thickness)
            .zip(&self.temperature)
            .map(|((&pressure, &thickness), &temperature)| FieldSample {
                pressure,
                thickness,
                temperature,
            })
    }
}

/// Per-bearing extrema for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingStats {
    pub max_pressure: f64,
    pub min_thickness: f64,
    pub max_temperature: f64,
}

impl BearingStats {
    /// Stats seeded from a single sample.
    pub fn from_sample(s: FieldSample) -> Self {
        Self {
            max_pressure: s.pressure,
            min_thickness: s.thickness,
            max_temperature: s.temperature,
        }
    }

    /// Folds another sample into the running extrema.
    pub fn include(&mut self, s: FieldSample) {
        self.max_pressure = self.max_pressure.max(s.pressure);
        self.min_thickness = self.min_thickness.min(s.thickness);
        self.max_temperature = self.max_temperature.max(s.temperature);
    }

    /// The extremum tracked for `field`.
    pub fn value(&self, field: FieldType) -> f64 {
        match field {
            FieldType::Pressure => self.max_pressure,
            FieldType::Thickness => self.min_thickness,
            FieldType::Temperature => self.max_temperature,
        }
    }
}
