//! Common test utilities and data generators.

use faer::{Col, Mat};
use ncf_regression::simulation::simulate;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Design matrix with an intercept column and one centered covariate grid
/// running from -0.5 to 0.5.
pub fn intercept_and_grid(n_samples: usize) -> Mat<f64> {
    Mat::from_fn(n_samples, 2, |i, j| {
        if j == 0 {
            1.0
        } else {
            i as f64 / (n_samples - 1) as f64 - 0.5
        }
    })
}

/// Simulate a regression data set with `ncp_i = exp(x_i' beta)` over the
/// intercept-and-grid design.
pub fn generate_ncf_data(
    n_samples: usize,
    beta: &[f64],
    df1: f64,
    df2: f64,
    seed: u64,
) -> (Mat<f64>, Col<f64>) {
    let x = intercept_and_grid(n_samples);
    let b = Col::from_fn(beta.len(), |j| beta[j]);
    let mut rng = StdRng::seed_from_u64(seed);
    let y = simulate(&x, &b, df1, df2, &mut rng).expect("simulation should succeed");
    (x, y)
}

/// Sample mean.
pub fn sample_mean(values: &Col<f64>) -> f64 {
    values.iter().sum::<f64>() / values.nrows() as f64
}

/// Unbiased sample variance.
pub fn sample_variance(values: &Col<f64>) -> f64 {
    let mean = sample_mean(values);
    let sum_sq: f64 = values.iter().map(|&v| (v - mean).powi(2)).sum();
    sum_sq / (values.nrows() - 1) as f64
}
