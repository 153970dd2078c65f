//! Regression solvers.

mod traits;
mod noncentral_f;

pub use traits::{FittedRegressor, Regressor, RegressionError};
pub use noncentral_f::{FittedNoncentralF, NoncentralFRegressor, NoncentralFRegressorBuilder};
