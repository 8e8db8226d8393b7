//! Eval command - convert one ADC reading with a calibrated curve.

use crate::config::Settings;
use crate::curve::{CETUS_MK3, TemperatureCurve, UP_LINEAR_Y_INTERCEPT};
use crate::error::CalibResult;
use crate::solve::Coefficients;

/// Coefficient and mode selection for `eval`, straight from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalCurveArgs {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub slope: Option<f64>,
    pub y_intercept: Option<f64>,
}

impl EvalCurveArgs {
    /// Build the curve: linear when a slope was given, quadratic otherwise,
    /// with factory constants filling any gaps.
    pub fn into_curve(self) -> TemperatureCurve {
        if let Some(slope) = self.slope {
            TemperatureCurve::Linear {
                slope,
                y_intercept: self.y_intercept.unwrap_or(UP_LINEAR_Y_INTERCEPT),
            }
        } else {
            TemperatureCurve::Quadratic(Coefficients {
                a: self.a.unwrap_or(CETUS_MK3.a),
                b: self.b.unwrap_or(CETUS_MK3.b),
                c: self.c.unwrap_or(CETUS_MK3.c),
            })
        }
    }
}

/// Run eval command - print the temperature for one raw ADC reading.
pub fn run_eval(
    settings: &Settings,
    curve_args: EvalCurveArgs,
    adc: u32,
    adc_max: Option<u32>,
) -> CalibResult<()> {
    let adc_max = adc_max.unwrap_or(settings.adc.max_value);
    let curve = curve_args.into_curve();
    let celsius = curve.adc_to_celsius(adc, adc_max);

    if celsius.is_infinite() {
        tracing::warn!(adc, adc_max, "reading is outside the converter range");
    }
    // Same line format the firmware prints for M305.
    println!("PT100: adc= {adc}, temp= {celsius:.6}");
    Ok(())
}
