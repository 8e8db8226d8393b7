//! Crate-level error type.

use thiserror::Error;

use crate::solve::SolveError;

#[derive(Error, Debug)]
pub enum CalibError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("invalid calibration point '{input}': expected ADC:TEMP, {reason}")]
    InvalidPoint { input: String, reason: String },

    #[error("expected exactly three calibration points, got {0}")]
    WrongPointCount(usize),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("cannot serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("cannot serialize coefficients: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CalibResult<T> = Result<T, CalibError>;
