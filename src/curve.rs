//! ADC-to-temperature curve evaluation.
//!
//! Mirrors the firmware side of the calibration: a PT100 channel runs in
//! either quadratic mode (the three-point fit this tool produces) or linear
//! slope/y-intercept mode, which is accurate enough over the narrow span a
//! 3D printer hotend actually uses.

use serde::{Deserialize, Serialize};

use crate::solve::{CalibrationPoint, Coefficients};

/// Default ADC full-scale value: 12-bit converter with 16x oversampling.
pub const DEFAULT_ADC_MAX: u32 = 4095 * 16;

/// Factory quadratic constants for the Cetus MK3 hotend PT100.
pub const CETUS_MK3: Coefficients = Coefficients {
    a: 0.000000174674754,
    b: 0.022383,
    c: -4.00648,
};

/// Factory linear slope for the UP! hotend PT100.
pub const UP_LINEAR_SLOPE: f64 = 0.0257604875;

/// Factory linear y-intercept for the UP! hotend PT100.
pub const UP_LINEAR_Y_INTERCEPT: f64 = -18.54;

/// A calibrated conversion from raw ADC readings to degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TemperatureCurve {
    /// `temperature = a*adc^2 + b*adc + c`
    Quadratic(Coefficients),
    /// `temperature = adc * slope + y_intercept`
    Linear { slope: f64, y_intercept: f64 },
}

impl TemperatureCurve {
    /// Convert a raw ADC reading to degrees Celsius.
    ///
    /// A reading of zero or at/above the converter's full-scale value means
    /// a shorted or disconnected sensor; those return `f64::INFINITY` so a
    /// temperature controller fails safe instead of heating forever.
    pub fn adc_to_celsius(&self, adc: u32, adc_max: u32) -> f64 {
        if adc == 0 || adc >= adc_max {
            return f64::INFINITY;
        }
        self.celsius_raw(f64::from(adc))
    }

    /// Largest absolute error of this curve over a set of calibration points.
    pub fn max_residual(&self, points: &[CalibrationPoint]) -> f64 {
        points
            .iter()
            .map(|p| (self.celsius_raw(p.adc) - p.celsius).abs())
            .fold(0.0, f64::max)
    }

    fn celsius_raw(&self, adc: f64) -> f64 {
        match *self {
            Self::Quadratic(coefficients) => coefficients.evaluate(adc),
            Self::Linear { slope, y_intercept } => adc * slope + y_intercept,
        }
    }
}

impl Default for TemperatureCurve {
    fn default() -> Self {
        Self::Quadratic(CETUS_MK3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_evaluation_matches_polynomial() {
        let curve = TemperatureCurve::Quadratic(Coefficients {
            a: 2.0,
            b: 3.0,
            c: 5.0,
        });
        assert_eq!(curve.adc_to_celsius(10, DEFAULT_ADC_MAX), 235.0);
    }

    #[test]
    fn linear_evaluation() {
        let curve = TemperatureCurve::Linear {
            slope: 0.5,
            y_intercept: -10.0,
        };
        assert_eq!(curve.adc_to_celsius(100, DEFAULT_ADC_MAX), 40.0);
    }

    #[test]
    fn out_of_range_reading_is_a_fault() {
        let curve = TemperatureCurve::default();
        assert!(curve.adc_to_celsius(0, DEFAULT_ADC_MAX).is_infinite());
        assert!(curve.adc_to_celsius(DEFAULT_ADC_MAX, DEFAULT_ADC_MAX).is_infinite());
        assert!(curve.adc_to_celsius(1, DEFAULT_ADC_MAX).is_finite());
    }

    #[test]
    fn factory_cetus_curve_is_sane_at_room_temperature() {
        // ~193 ADC counts correspond to roughly 0.3C on the worked example.
        let celsius = TemperatureCurve::default().adc_to_celsius(193, DEFAULT_ADC_MAX);
        assert!((celsius - 0.32).abs() < 0.1, "got {celsius}");
    }

    #[test]
    fn residual_is_zero_on_exact_points() {
        let coefficients = Coefficients {
            a: 1.0,
            b: 0.0,
            c: 0.0,
        };
        let points = [
            CalibrationPoint::new(1.0, 1.0),
            CalibrationPoint::new(2.0, 4.0),
            CalibrationPoint::new(3.0, 9.5),
        ];
        let residual = TemperatureCurve::Quadratic(coefficients).max_residual(&points);
        assert!((residual - 0.5).abs() < 1e-12);
    }
}
