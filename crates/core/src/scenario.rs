//! Reproducible description of a simulation run.
//!
//! A [`Scenario`] captures the assembly (bearing dimensions, mesh resolution,
//! load configuration) and the run controls (rpm, displayed field, frame
//! count, time step). Two identical scenarios produce bit-identical frames.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::field::FieldType;
use crate::geometry::BearingGeometry;
use crate::load::BearingLoadConfig;
use crate::simulation::{Bearing, RotorSimulation, SimulationParams};

fn default_frames() -> usize {
    120
}

fn default_dt() -> f64 {
    1.0 / 60.0
}

fn default_radial_segments() -> usize {
    64
}

fn default_axial_segments() -> usize {
    16
}

/// One bearing as described in a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingSpec {
    pub name: String,
    pub radius: f64,
    pub width: f64,
    #[serde(default = "default_radial_segments")]
    pub radial_segments: usize,
    #[serde(default = "default_axial_segments")]
    pub axial_segments: usize,
    #[serde(default)]
    pub load: BearingLoadConfig,
}

impl BearingSpec {
    /// A bearing with the default mesh resolution.
    pub fn new(name: &str, radius: f64, width: f64, load: BearingLoadConfig) -> Self {
        Self {
            name: name.to_string(),
            radius,
            width,
            radial_segments: default_radial_segments(),
            axial_segments: default_axial_segments(),
            load,
        }
    }

    /// Generates the bearing's surface mesh.
    pub fn build(&self) -> Result<Bearing, FieldError> {
        let geometry = BearingGeometry::cylinder(
            self.radius,
            self.width,
            self.radial_segments,
            self.axial_segments,
        )?;
        Ok(Bearing::new(self.name.clone(), geometry, self.load))
    }
}

/// A complete, serializable simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub rpm: f64,
    #[serde(default)]
    pub field_type: FieldType,
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default = "default_dt")]
    pub dt: f64,
    pub bearings: Vec<BearingSpec>,
}

impl Scenario {
    /// A scenario with default frame count and time step.
    pub fn new(name: &str, rpm: f64, bearings: Vec<BearingSpec>) -> Self {
        Self {
            name: name.to_string(),
            rpm,
            field_type: FieldType::default(),
            frames: default_frames(),
            dt: default_dt(),
            bearings,
        }
    }

    /// Parses and validates a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, FieldError> {
        let scenario: Scenario =
            serde_json::from_str(text).map_err(|e| FieldError::InvalidScenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks that every number is finite and every dimension is usable.
    ///
    /// Pad layouts that do not fit the circumference are not rejected; they
    /// are evaluated as full-circle bearings and logged when built.
    pub fn validate(&self) -> Result<(), FieldError> {
        let invalid = |msg: String| Err(FieldError::InvalidScenario(msg));
        if !self.rpm.is_finite() {
            return invalid(format!("rpm must be finite, got {}", self.rpm));
        }
        if !(self.dt.is_finite() && self.dt >= 0.0) {
            return invalid(format!("dt must be finite and non-negative, got {}", self.dt));
        }
        for b in &self.bearings {
            if !(b.radius.is_finite() && b.radius > 0.0) {
                return invalid(format!("bearing '{}': radius must be positive", b.name));
            }
            if !(b.width.is_finite() && b.width > 0.0) {
                return invalid(format!("bearing '{}': width must be positive", b.name));
            }
            if b.radial_segments < 3 || b.axial_segments < 1 {
                return invalid(format!(
                    "bearing '{}': needs >= 3 radial and >= 1 axial segments",
                    b.name
                ));
            }
            if !(b.load.load_angle.is_finite() && b.load.pad_angle.is_finite()) {
                return invalid(format!("bearing '{}': load angles must be finite", b.name));
            }
        }
        Ok(())
    }

    /// Validates the scenario and builds the simulation at `t = 0`.
    pub fn build(&self) -> Result<RotorSimulation, FieldError> {
        self.validate()?;
        let bearings = self
            .bearings
            .iter()
            .map(BearingSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RotorSimulation::new(
            bearings,
            SimulationParams {
                rpm: self.rpm,
                field_type: self.field_type,
                running: true,
            },
        ))
    }
}
