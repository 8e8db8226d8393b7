//! Calibration calculator for PT100/RTD temperature sensors.
//!
//! Fits the quadratic `temperature = a*adc^2 + b*adc + c` through three
//! known (ADC, temperature) reference points and prints the coefficients
//! for hard-coding into firmware. See [`solve::fit_quadratic`] for the
//! elimination itself and [`curve::TemperatureCurve`] for the firmware-side
//! evaluation.

pub mod cli;
pub mod config;
pub mod curve;
pub mod error;
pub mod logging;
pub mod solve;

pub use config::Settings;
pub use curve::TemperatureCurve;
pub use error::{CalibError, CalibResult};
pub use solve::{CalibrationPoint, Coefficients, SolveError, fit_quadratic};
