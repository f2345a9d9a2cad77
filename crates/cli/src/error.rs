//! CLI errors and their exit codes.
//!
//! Everything the user controls (preset or scenario file, `--field`,
//! `--bearing`, raster size) fails with 12. Exit code 10 is reserved for
//! failures a validated scenario should never produce.
//!
//! | code | meaning |
//! |------|---------|
//! | 2    | clap argument error |
//! | 10   | engine fault |
//! | 11   | scenario read or snapshot write failed |
//! | 12   | invalid user input |
//! | 13   | JSON output could not be encoded |

use std::path::PathBuf;

use rotor_field_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The engine rejected input that had already passed scenario validation.
    #[error(transparent)]
    Engine(FieldError),

    #[error("cannot read scenario {}: {source}", path.display())]
    ReadScenario {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the snapshot failed.
    #[error("{0}")]
    Write(String),

    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::ReadScenario { .. } | CliError::Write(_) => 11,
            CliError::Input(_) => 12,
            CliError::Output(_) => 13,
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Write(msg),
            FieldError::InvalidScenario(_)
            | FieldError::UnknownPreset(_)
            | FieldError::UnknownFieldType(_)
            | FieldError::BearingOutOfRange { .. }
            | FieldError::InvalidDimensions => CliError::Input(e.to_string()),
            FieldError::InvalidGeometry(_) => CliError::Engine(e),
        }
    }
}
