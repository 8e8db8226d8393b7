//! Configuration for the calibration tool.
//!
//! Layered settings with the usual precedence:
//! - Default values
//! - TOML configuration file (`pt100-calib.toml` in the working directory)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PT100_` and use double
//! underscores to separate nested levels:
//! - `PT100_ADC__MAX_VALUE=4095` sets `adc.max_value`
//! - `PT100_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::curve::DEFAULT_ADC_MAX;
use crate::error::{CalibError, CalibResult};
use crate::solve::CalibrationPoint;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "pt100-calib.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default calibration points used when `fit` gets no --point arguments
    #[serde(default)]
    pub points: PointsConfig,

    /// ADC converter properties
    #[serde(default)]
    pub adc: AdcConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PointsConfig {
    /// Three [adc, temperature] pairs, in elimination order (the first pair
    /// is the pivot row)
    #[serde(default = "default_pairs")]
    pub pairs: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdcConfig {
    /// Full-scale converter value; readings at or above it are sensor faults
    #[serde(default = "default_adc_max")]
    pub max_value: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default log level filter
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides, e.g. `solve = "trace"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_adc_max() -> u32 {
    DEFAULT_ADC_MAX
}
fn default_log_level() -> String {
    "warn".to_string()
}

/// Cetus MK3 worked example: ADC readings for 100.12, 179.71 and 219.34 ohm
/// reference resistors on a PT100(385) curve.
fn default_pairs() -> Vec<[f64; 2]> {
    vec![[193.0, 0.3], [8958.0, 210.5], [13153.0, 320.5]]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            points: PointsConfig::default(),
            adc: AdcConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            pairs: default_pairs(),
        }
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            max_value: default_adc_max(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load configuration from all sources.
    pub fn load() -> CalibResult<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file, layered over defaults and
    /// under `PT100_` environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> CalibResult<Self> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path.as_ref()))
            // Layer in environment variables with PT100_ prefix.
            // Double underscore separates nested levels.
            .merge(
                Env::prefixed("PT100_")
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
            .extract()
            .map_err(|e| CalibError::Config(Box::new(e)))
    }

    /// The three configured calibration points, in elimination order.
    pub fn calibration_points(&self) -> CalibResult<[CalibrationPoint; 3]> {
        match self.points.pairs.as_slice() {
            &[p1, p2, p3] => {
                Ok([p1, p2, p3].map(|[adc, celsius]| CalibrationPoint::new(adc, celsius)))
            }
            pairs => Err(CalibError::WrongPointCount(pairs.len())),
        }
    }

    /// Save current configuration to file.
    pub fn save(&self, path: impl AsRef<Path>) -> CalibResult<()> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Create a default settings file in the working directory.
    pub fn init_config_file(force: bool) -> CalibResult<PathBuf> {
        let config_path = PathBuf::from(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err(CalibError::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{CONFIG_FILE} already exists; use --force to overwrite"),
            )));
        }

        Settings::default().save(&config_path)?;
        Ok(config_path)
    }
}
