//! Three-point quadratic coefficient solver.
//!
//! Solves the 3x3 linear system `a*adc^2 + b*adc + c = celsius` for three
//! calibration points by elimination, with the first point serving as the
//! pivot row. The reduction order is part of the contract: `b` is
//! back-substituted from the *reduced* third row while `c` uses the
//! *unreduced* third row. That asymmetry is intentional; both identities are
//! algebraically valid, but they are different identities and swapping them
//! changes the floating-point result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One (raw ADC reading, known reference temperature) calibration pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    /// Raw sensor reading (e.g. an M305 ADC value).
    pub adc: f64,
    /// Reference temperature in degrees Celsius for that reading.
    pub celsius: f64,
}

impl CalibrationPoint {
    pub const fn new(adc: f64, celsius: f64) -> Self {
        Self { adc, celsius }
    }
}

/// Coefficients of `temperature = a*adc^2 + b*adc + c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Coefficients {
    /// Evaluate the polynomial at a raw ADC value.
    #[inline]
    pub fn evaluate(&self, adc: f64) -> f64 {
        self.a * adc * adc + self.b * adc + self.c
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SolveError {
    #[error("two calibration points share the ADC value {0}; points must have pairwise distinct ADC readings")]
    DuplicateAdc(f64),

    #[error("calibration points form a singular system; no quadratic passes through them")]
    SingularSystem,
}

pub type SolveResult<T> = Result<T, SolveError>;

/// Fit `temperature = a*adc^2 + b*adc + c` through exactly three points.
///
/// `base` is the elimination pivot: it is subtracted from the other two rows
/// to cancel the constant term. Input order changes the intermediate
/// arithmetic but not the recovered coefficients, since the quadratic
/// through three points with distinct ADC values is unique.
///
/// Fails with [`SolveError::DuplicateAdc`] when two ADC readings coincide,
/// before any division can blow up.
pub fn fit_quadratic(
    base: CalibrationPoint,
    second: CalibrationPoint,
    third: CalibrationPoint,
) -> SolveResult<Coefficients> {
    if base.adc == second.adc || base.adc == third.adc {
        return Err(SolveError::DuplicateAdc(base.adc));
    }
    if second.adc == third.adc {
        return Err(SolveError::DuplicateAdc(second.adc));
    }

    // Augment each row with adc^2. Inputs stay untouched; every reduced
    // quantity below gets a fresh binding.
    let base_sq = base.adc * base.adc;
    let second_sq = second.adc * second.adc;
    let third_sq = third.adc * third.adc;

    // Subtract the base row from the other two. The constant term cancels,
    // leaving two equations in (b, a).
    let r2_adc = second.adc - base.adc;
    let r2_temp = second.celsius - base.celsius;
    let r2_sq = second_sq - base_sq;
    let r3_adc = third.adc - base.adc;
    let r3_temp = third.celsius - base.celsius;
    let r3_sq = third_sq - base_sq;

    // Scale the reduced second row so its linear term matches the third,
    // then subtract to leave a single equation in a.
    let multiplier = r3_adc / r2_adc;
    let pivot_temp = r3_temp - r2_temp * multiplier;
    let pivot_sq = r3_sq - r2_sq * multiplier;
    if pivot_sq == 0.0 {
        // Unreachable for pairwise-distinct ADC values (the pivot factors as
        // (adc3 - adc1)*(adc3 - adc2)), kept as a guard against FP underflow.
        return Err(SolveError::SingularSystem);
    }
    let a = pivot_temp / pivot_sq;

    // b from the reduced third row, c from the original third row. See the
    // module docs before touching this.
    let b = (r3_temp - r3_sq * a) / r3_adc;
    let c = third.celsius - (third_sq * a + third.adc * b);

    Ok(Coefficients { a, b, c })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn fit(points: [(f64, f64); 3]) -> SolveResult<Coefficients> {
        let [p1, p2, p3] = points.map(|(adc, celsius)| CalibrationPoint::new(adc, celsius));
        fit_quadratic(p1, p2, p3)
    }

    #[test]
    fn recovers_pure_parabola() {
        let coeffs = fit([(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]).unwrap();
        assert!((coeffs.a - 1.0).abs() < TOLERANCE);
        assert!(coeffs.b.abs() < TOLERANCE);
        assert!(coeffs.c.abs() < TOLERANCE);
    }

    #[test]
    fn collinear_points_give_degenerate_quadratic() {
        let coeffs = fit([(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert!(coeffs.a.abs() < TOLERANCE);
        assert!((coeffs.b - 1.0).abs() < TOLERANCE);
        assert!(coeffs.c.abs() < TOLERANCE);
    }

    #[test]
    fn duplicate_adc_is_rejected() {
        let err = fit([(5.0, 1.0), (5.0, 2.0), (5.0, 3.0)]).unwrap_err();
        assert_eq!(err, SolveError::DuplicateAdc(5.0));

        // Duplicate in the non-pivot rows must be caught too.
        let err = fit([(1.0, 1.0), (7.0, 2.0), (7.0, 3.0)]).unwrap_err();
        assert_eq!(err, SolveError::DuplicateAdc(7.0));
    }

    #[test]
    fn round_trips_arbitrary_coefficients() {
        let truth = Coefficients {
            a: 1.7e-7,
            b: 0.0224,
            c: -4.03,
        };
        for adcs in [[193.0, 8958.0, 13153.0], [10.0, 20.0, 30.0], [-3.0, 0.5, 12.0]] {
            let [p1, p2, p3] =
                adcs.map(|adc| CalibrationPoint::new(adc, truth.evaluate(adc)));
            let coeffs = fit_quadratic(p1, p2, p3).unwrap();
            assert!((coeffs.a - truth.a).abs() < TOLERANCE);
            assert!((coeffs.b - truth.b).abs() < TOLERANCE);
            assert!((coeffs.c - truth.c).abs() < TOLERANCE);
        }
    }

    #[test]
    fn point_order_does_not_change_result() {
        let points = [
            CalibrationPoint::new(193.0, 0.3),
            CalibrationPoint::new(8958.0, 210.5),
            CalibrationPoint::new(13153.0, 320.5),
        ];
        let reference = fit_quadratic(points[0], points[1], points[2]).unwrap();

        let orders = [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for [i, j, k] in orders {
            let coeffs = fit_quadratic(points[i], points[j], points[k]).unwrap();
            assert!((coeffs.a - reference.a).abs() < TOLERANCE);
            assert!((coeffs.b - reference.b).abs() < 1e-6);
            assert!((coeffs.c - reference.c).abs() < 1e-6);
        }
    }

    #[test]
    fn cetus_mk3_worked_example() {
        // ADC readings from the M305 command with 100.12, 179.71 and 219.34
        // ohm reference resistors on a Cetus MK3.
        let coeffs = fit([(193.0, 0.3), (8958.0, 210.5), (13153.0, 320.5)]).unwrap();
        assert!((coeffs.a - 1.7283540988066196e-7).abs() < 1e-20);
        assert!((coeffs.b - 0.022400128743189474).abs() < 1e-15);
        assert!((coeffs.c - -4.029662793618229).abs() < 1e-12);

        // The fitted curve must pass back through the calibration points.
        for (adc, celsius) in [(193.0, 0.3), (8958.0, 210.5), (13153.0, 320.5)] {
            assert!((coeffs.evaluate(adc) - celsius).abs() < 1e-9);
        }
    }
}
