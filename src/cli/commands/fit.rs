//! Fit command - solve for the quadratic coefficients.

use crate::config::Settings;
use crate::curve::TemperatureCurve;
use crate::error::{CalibError, CalibResult};
use crate::solve::{CalibrationPoint, Coefficients, fit_quadratic};

/// Run fit command - solve the three-point system and print a, b, c.
pub fn run_fit(
    settings: &Settings,
    points: &[CalibrationPoint],
    json: bool,
    snippet: bool,
) -> CalibResult<()> {
    let [base, second, third] = resolve_points(settings, points)?;
    tracing::debug!(?base, ?second, ?third, "fitting quadratic through calibration points");

    let coefficients = fit_quadratic(base, second, third)?;

    let residual =
        TemperatureCurve::Quadratic(coefficients).max_residual(&[base, second, third]);
    tracing::debug!(residual, "fit complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&coefficients)?);
    } else {
        print_block(&coefficients);
    }

    if snippet {
        print_snippet(&coefficients);
    }
    Ok(())
}

/// Points from the command line when given, otherwise the configured ones.
/// Anything other than exactly three is an error.
fn resolve_points(
    settings: &Settings,
    points: &[CalibrationPoint],
) -> CalibResult<[CalibrationPoint; 3]> {
    match points {
        [] => settings.calibration_points(),
        &[base, second, third] => Ok([base, second, third]),
        other => Err(CalibError::WrongPointCount(other.len())),
    }
}

/// Output framing: a blank line, three labeled lines, a blank line.
/// `a` gets the full 20 decimal digits because its magnitude is
/// around 1e-7 for a 16x-oversampled 12-bit ADC; default display would lose
/// it in firmware configs that do not accept exponent notation.
fn print_block(coefficients: &Coefficients) {
    println!();
    println!("a =  {:.20}", coefficients.a);
    println!("b =  {}", coefficients.b);
    println!("c =  {}", coefficients.c);
    println!();
}

/// Smoothieware config fragment for a PT100 sensor block in quadratic mode.
fn print_snippet(coefficients: &Coefficients) {
    println!("temperature_control.hotend.pt100linear    0");
    println!("temperature_control.hotend.pt100_a        {:.20}", coefficients.a);
    println!("temperature_control.hotend.pt100_b        {}", coefficients.b);
    println!("temperature_control.hotend.pt100_c        {}", coefficients.c);
}
