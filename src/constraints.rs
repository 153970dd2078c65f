//! Feasibility checks for the log-mean parameterization.

use faer::{Col, Mat};

use crate::solvers::RegressionError;
use crate::utils::{check_coefficients, linear_predictor};

/// The log-scale feasibility threshold `ln(df2 / (df2 - 2))`.
///
/// A log-link mean model is feasible at a design row exactly when its linear
/// predictor exceeds this value, because `exp(eta)` must clear the central
/// lower bound of the mean.
pub fn link_constraint(df2: f64) -> f64 {
    (df2 / (df2 - 2.0)).ln()
}

/// Whether every linear predictor row meets the feasibility threshold for
/// the given denominator degrees of freedom.
///
/// The boundary itself is feasible: a predictor exactly at the threshold
/// implies the central mean, reached with zero noncentrality.
pub fn satisfies_constraint(
    x: &Mat<f64>,
    beta: &Col<f64>,
    df2: f64,
) -> Result<bool, RegressionError> {
    check_coefficients(x, beta)?;

    let threshold = link_constraint(df2);
    let eta = linear_predictor(x, beta);
    for i in 0..eta.nrows() {
        if !(eta[i] >= threshold) {
            return Ok(false);
        }
    }
    Ok(true)
}
