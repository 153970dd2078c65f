//! Core types for the noncentral F regression model.

mod family;
mod options;
mod result;

pub use family::{NoncentralFFamily, RootMethod};
pub use options::{FitOptions, FitOptionsBuilder, OptimMethod, OptionsError};
pub use result::FitResult;
