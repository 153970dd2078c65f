//! Common traits and errors for regression solvers.

use faer::{Col, Mat};
use thiserror::Error;

use crate::core::{FitResult, OptionsError};
use crate::distributions::DistributionError;
use crate::optim::OptimError;

/// Errors that can occur during model fitting and simulation.
#[derive(Debug, Error)]
pub enum RegressionError {
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch { x_rows: usize, y_len: usize },

    #[error("coefficient dimension mismatch: X has {expected} columns but got {got} coefficients")]
    CoefficientDimension { expected: usize, got: usize },

    #[error("empty design matrix: at least one observation and one column are required")]
    EmptyData,

    #[error("response at index {index} is not finite")]
    NonFiniteResponse { index: usize },

    #[error("log-likelihood is not finite at the starting coefficients")]
    NonFiniteStart,

    #[error("target mean {mean} is at or below the central lower bound {lower_bound}")]
    InfeasibleMean { mean: f64, lower_bound: f64 },

    #[error("invalid fit options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error("invalid distribution parameters: {0}")]
    Distribution(#[from] DistributionError),

    #[error("optimizer error: {0}")]
    Optimization(#[from] OptimError),
}

/// A regression estimator that can be fit to data.
///
/// This trait follows the sklearn pattern where fitting returns a fitted model
/// that can then make predictions.
pub trait Regressor {
    /// The type of the fitted model.
    type Fitted: FittedRegressor;

    /// Fit the model to the data.
    ///
    /// # Arguments
    /// * `x` - Design matrix of shape (n_samples, n_features)
    /// * `y` - Target vector of length n_samples
    ///
    /// # Returns
    /// A fitted model that can make predictions.
    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<Self::Fitted, RegressionError>;
}

/// A fitted regression model that can make predictions.
pub trait FittedRegressor {
    /// Predicted response means on new data.
    ///
    /// # Arguments
    /// * `x` - Design matrix of shape (n_samples, n_features)
    fn predict(&self, x: &Mat<f64>) -> Col<f64>;

    /// Full fit diagnostics.
    fn result(&self) -> &FitResult;

    /// Estimated coefficients.
    fn coefficients(&self) -> &Col<f64> {
        &self.result().coefficients
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = RegressionError::DimensionMismatch {
            x_rows: 10,
            y_len: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("8"));
    }

    #[test]
    fn test_infeasible_mean_message() {
        let err = RegressionError::InfeasibleMean {
            mean: 1.0,
            lower_bound: 1.25,
        };
        assert!(err.to_string().contains("lower bound"));
    }
}
