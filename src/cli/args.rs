//! CLI argument parsing using clap.
//!
//! Contains the Cli struct, the Commands enum and the ADC:TEMP value parser.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::solve::CalibrationPoint;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// PT100/RTD calibration calculator
#[derive(Parser)]
#[command(
    name = "pt100-calib",
    version = env!("CARGO_PKG_VERSION"),
    about = "PT100/RTD quadratic calibration calculator",
    long_about = "Fit temperature = a*adc^2 + b*adc + c through three reference \
                  points and print the coefficients for firmware config.",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to a custom pt100-calib.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve for the quadratic coefficients through three calibration points
    Fit {
        /// Calibration point as ADC:TEMP, given three times; the first point
        /// is the elimination pivot. Falls back to the configured points.
        #[arg(short, long = "point", value_name = "ADC:TEMP", value_parser = parse_point)]
        points: Vec<CalibrationPoint>,

        /// Emit the coefficients as JSON instead of the labeled block
        #[arg(long)]
        json: bool,

        /// Append a ready-to-paste Smoothieware config snippet
        #[arg(long)]
        snippet: bool,
    },

    /// Evaluate a calibrated curve at one raw ADC reading
    Eval {
        /// Raw ADC reading to convert
        #[arg(long)]
        adc: u32,

        /// Quadratic coefficient a (defaults to the Cetus MK3 factory value)
        #[arg(long, allow_negative_numbers = true)]
        a: Option<f64>,

        /// Quadratic coefficient b
        #[arg(long, allow_negative_numbers = true)]
        b: Option<f64>,

        /// Quadratic coefficient c
        #[arg(long, allow_negative_numbers = true)]
        c: Option<f64>,

        /// Use linear mode with this slope instead of the quadratic
        #[arg(long, allow_negative_numbers = true, conflicts_with_all = ["a", "b", "c"])]
        slope: Option<f64>,

        /// Y-intercept for linear mode (defaults to the UP! factory value)
        #[arg(long, allow_negative_numbers = true, requires = "slope")]
        y_intercept: Option<f64>,

        /// ADC full-scale override; readings at or above it are faults
        #[arg(long)]
        adc_max: Option<u32>,
    },

    /// Show current configuration
    Config,

    /// Write a default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse an `ADC:TEMP` pair, e.g. `8958:210.5`.
fn parse_point(input: &str) -> Result<CalibrationPoint, String> {
    let (adc, celsius) = input
        .split_once(':')
        .ok_or_else(|| format!("'{input}' is missing the ':' separator"))?;
    let adc: f64 = adc
        .trim()
        .parse()
        .map_err(|e| format!("bad ADC value in '{input}': {e}"))?;
    let celsius: f64 = celsius
        .trim()
        .parse()
        .map_err(|e| format!("bad temperature in '{input}': {e}"))?;
    Ok(CalibrationPoint::new(adc, celsius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_adc_temp_pair() {
        let point = parse_point("8958:210.5").unwrap();
        assert_eq!(point.adc, 8958.0);
        assert_eq!(point.celsius, 210.5);
    }

    #[test]
    fn allows_whitespace_and_negatives() {
        let point = parse_point("193 : -0.3").unwrap();
        assert_eq!(point.adc, 193.0);
        assert_eq!(point.celsius, -0.3);
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_point("193").is_err());
        assert!(parse_point("abc:0.3").is_err());
        assert!(parse_point("193:warm").is_err());
    }

    #[test]
    fn cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
