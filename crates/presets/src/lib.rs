#![deny(unsafe_code)]
//! Preset registry: named bearing assemblies plus CPU-side surface snapshots.
//!
//! Both the CLI and any other host go through [`Preset`] to get a ready-made
//! [`Scenario`] instead of duplicating the assembly definitions.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use std::f64::consts::FRAC_PI_4;

use rotor_field_core::error::FieldError;
use rotor_field_core::load::BearingLoadConfig;
use rotor_field_core::scenario::{BearingSpec, Scenario};

/// All available preset names.
const PRESET_NAMES: &[&str] = &["journal", "two-pad", "tilting-pad", "turbine"];

/// Built-in bearing assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Single full-circle journal bearing loaded along +x.
    Journal,
    /// Single bearing with two 90° pads.
    TwoPad,
    /// Single bearing with four 70° pads, loaded between two pads.
    TiltingPad,
    /// Drive-end journal bearing plus a five-pad non-drive-end bearing.
    Turbine,
}

impl Preset {
    /// Looks up a preset by name.
    ///
    /// Returns `FieldError::UnknownPreset` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "journal" => Ok(Preset::Journal),
            "two-pad" => Ok(Preset::TwoPad),
            "tilting-pad" => Ok(Preset::TiltingPad),
            "turbine" => Ok(Preset::Turbine),
            _ => Err(FieldError::UnknownPreset(name.to_string())),
        }
    }

    /// Returns a slice of all recognized preset names.
    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Journal => "journal",
            Preset::TwoPad => "two-pad",
            Preset::TiltingPad => "tilting-pad",
            Preset::Turbine => "turbine",
        }
    }

    /// The preset's scenario with default run controls.
    pub fn scenario(self) -> Scenario {
        let bearings = match self {
            Preset::Journal => vec![BearingSpec::new(
                "journal",
                0.5,
                0.4,
                BearingLoadConfig::full_circle(0.0),
            )],
            Preset::TwoPad => vec![BearingSpec::new(
                "two-pad",
                0.5,
                0.4,
                BearingLoadConfig::tilting_pad(0.0, 2, 90.0),
            )],
            Preset::TiltingPad => vec![BearingSpec::new(
                "tilting-pad",
                0.5,
                0.35,
                BearingLoadConfig::tilting_pad(-FRAC_PI_4, 4, 70.0),
            )],
            Preset::Turbine => vec![
                BearingSpec::new("drive-end", 0.6, 0.45, BearingLoadConfig::full_circle(0.0)),
                BearingSpec::new(
                    "non-drive-end",
                    0.45,
                    0.3,
                    BearingLoadConfig::tilting_pad(0.0, 5, 56.0),
                ),
            ],
        };
        Scenario::new(self.name(), 3000.0, bearings)
    }
}

/// Convenience: look up a preset by name and return its scenario.
pub fn scenario(name: &str) -> Result<Scenario, FieldError> {
    Preset::from_name(name).map(Preset::scenario)
}
