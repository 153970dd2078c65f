//! Matrix utility functions.

use faer::{Col, Mat};

use crate::solvers::RegressionError;

/// Compute the linear predictor eta = X * beta.
///
/// Dimensions are assumed valid; use [`check_coefficients`] first when the
/// inputs come from a caller.
pub fn linear_predictor(x: &Mat<f64>, beta: &Col<f64>) -> Col<f64> {
    let n_rows = x.nrows();
    let n_cols = x.ncols();

    let mut eta = Col::zeros(n_rows);
    for i in 0..n_rows {
        let mut acc = 0.0;
        for j in 0..n_cols {
            acc += x[(i, j)] * beta[j];
        }
        eta[i] = acc;
    }
    eta
}

/// Validate that the design matrix is non-empty and matches the response.
pub fn check_shapes(x: &Mat<f64>, y: &Col<f64>) -> Result<(), RegressionError> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(RegressionError::EmptyData);
    }
    if x.nrows() != y.nrows() {
        return Err(RegressionError::DimensionMismatch {
            x_rows: x.nrows(),
            y_len: y.nrows(),
        });
    }
    Ok(())
}

/// Validate that a coefficient vector matches the design matrix columns.
pub fn check_coefficients(x: &Mat<f64>, beta: &Col<f64>) -> Result<(), RegressionError> {
    if x.ncols() != beta.nrows() {
        return Err(RegressionError::CoefficientDimension {
            expected: x.ncols(),
            got: beta.nrows(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_predictor() {
        let mut x = Mat::zeros(3, 2);
        x[(0, 0)] = 1.0;
        x[(0, 1)] = 2.0;
        x[(1, 0)] = 1.0;
        x[(1, 1)] = -1.0;
        x[(2, 0)] = 0.0;
        x[(2, 1)] = 4.0;

        let beta = Col::from_fn(2, |j| if j == 0 { 0.5 } else { 0.25 });
        let eta = linear_predictor(&x, &beta);

        assert!((eta[0] - 1.0).abs() < 1e-12);
        assert!((eta[1] - 0.25).abs() < 1e-12);
        assert!((eta[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_check_shapes_mismatch() {
        let x = Mat::<f64>::zeros(5, 2);
        let y = Col::<f64>::zeros(4);
        let err = check_shapes(&x, &y).unwrap_err();
        assert!(matches!(
            err,
            RegressionError::DimensionMismatch { x_rows: 5, y_len: 4 }
        ));
    }

    #[test]
    fn test_check_shapes_empty() {
        let x = Mat::<f64>::zeros(0, 2);
        let y = Col::<f64>::zeros(0);
        assert!(matches!(
            check_shapes(&x, &y),
            Err(RegressionError::EmptyData)
        ));
    }

    #[test]
    fn test_check_coefficients_mismatch() {
        let x = Mat::<f64>::zeros(5, 3);
        let beta = Col::<f64>::zeros(2);
        assert!(matches!(
            check_coefficients(&x, &beta),
            Err(RegressionError::CoefficientDimension {
                expected: 3,
                got: 2
            })
        ));
    }
}
