//! Shared numeric helpers.

mod matrix;

pub use matrix::{check_coefficients, check_shapes, linear_predictor};
