//! Regression and simulation tools for noncentral F distributed responses.
//!
//! This library models positive ratio statistics whose distribution is
//! noncentral F with known degrees of freedom, linking covariates to the
//! noncentrality parameter through a log link. It provides the moment
//! algebra of the family, a log-density and sampler for the distribution,
//! maximum-likelihood fitting, response simulation, and feasibility checks
//! for mean-scale models.
//!
//! # Example
//!
//! ```rust,ignore
//! use ncf_regression::prelude::*;
//!
//! // Fit a log-link noncentrality model with fixed degrees of freedom
//! let fitted = NoncentralFRegressor::builder(5.0, 12.0)
//!     .max_iterations(1000)
//!     .extras(true)
//!     .build()?
//!     .fit(&x, &y)?;
//!
//! // Predict response means on new data
//! let means = fitted.predict(&x_new);
//!
//! // Access fit diagnostics
//! let result = fitted.result();
//! println!("log-likelihood = {}", result.log_likelihood);
//! println!("AIC = {}", result.aic);
//! ```

pub mod constraints;
pub mod core;
pub mod distributions;
pub mod optim;
pub mod simulation;
pub mod solvers;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::constraints::{link_constraint, satisfies_constraint};
    pub use crate::core::{
        FitOptions, FitOptionsBuilder, FitResult, NoncentralFFamily, OptimMethod, OptionsError,
        RootMethod,
    };
    pub use crate::distributions::{DistributionError, NoncentralF};
    pub use crate::simulation::{simulate, simulate_from_mean};
    pub use crate::solvers::{
        FittedNoncentralF, FittedRegressor, NoncentralFRegressor, RegressionError, Regressor,
    };
}

pub use crate::core::{FitOptions, FitResult, NoncentralFFamily, OptimMethod, RootMethod};
pub use crate::distributions::NoncentralF;
pub use crate::solvers::{
    FittedNoncentralF, FittedRegressor, NoncentralFRegressor, RegressionError, Regressor,
};
