//! Probability distributions backing the regression model.

mod noncentral_f;

pub use noncentral_f::{DistributionError, NoncentralF};
