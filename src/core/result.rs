//! Maximum-likelihood fit result structures.

use faer::Col;

/// Complete result from a maximum-likelihood fit.
///
/// Contains the estimated coefficients, the optimizer's own termination
/// report (passed through unjudged), likelihood-based fit statistics, and
/// optionally the per-observation linear predictor, fitted mean and fitted
/// variance.
#[derive(Debug, Clone)]
pub struct FitResult {
    // ========== Core Results ==========
    /// Estimated coefficients.
    pub coefficients: Col<f64>,

    /// Number of estimated parameters.
    pub n_parameters: usize,

    /// Number of observations.
    pub n_observations: usize,

    // ========== Optimizer Diagnostics ==========
    /// Whether the optimizer reported convergence.
    pub converged: bool,

    /// The optimizer's termination status, verbatim.
    pub termination: String,

    /// Iterations used by the optimizer.
    pub iterations: u64,

    /// Number of objective evaluations.
    pub function_evals: usize,

    /// Number of gradient evaluations (zero for derivative-free methods).
    pub gradient_evals: usize,

    // ========== Fit Statistics ==========
    /// Maximized log-likelihood.
    pub log_likelihood: f64,

    /// Akaike Information Criterion: `2p - 2*log_likelihood`.
    pub aic: f64,

    /// Bayesian Information Criterion: `p*ln(n) - 2*log_likelihood`.
    pub bic: f64,

    // ========== Per-Observation Extras (Optional) ==========
    /// Linear predictor `X·beta_hat`, filled when extras were requested.
    pub eta_hat: Option<Col<f64>>,

    /// Fitted mean per observation, filled when extras were requested.
    pub mu_hat: Option<Col<f64>>,

    /// Fitted variance per observation, filled when extras were requested.
    pub var_hat: Option<Col<f64>>,
}

impl FitResult {
    /// Create a new empty result (used internally by solvers).
    pub(crate) fn empty(n_features: usize, n_observations: usize) -> Self {
        Self {
            coefficients: Col::zeros(n_features),
            n_parameters: n_features,
            n_observations,
            converged: false,
            termination: String::new(),
            iterations: 0,
            function_evals: 0,
            gradient_evals: 0,
            log_likelihood: 0.0,
            aic: 0.0,
            bic: 0.0,
            eta_hat: None,
            mu_hat: None,
            var_hat: None,
        }
    }

    /// Residual degrees of freedom (n - p).
    pub fn residual_df(&self) -> usize {
        self.n_observations.saturating_sub(self.n_parameters)
    }

    /// Whether the per-observation extras were computed.
    pub fn has_extras(&self) -> bool {
        self.eta_hat.is_some() && self.mu_hat.is_some() && self.var_hat.is_some()
    }

    /// Get a coefficient by index, `None` if out of range.
    pub fn get_coefficient(&self, index: usize) -> Option<f64> {
        if index < self.coefficients.nrows() {
            Some(self.coefficients[index])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = FitResult::empty(3, 10);
        assert_eq!(result.coefficients.nrows(), 3);
        assert_eq!(result.n_parameters, 3);
        assert_eq!(result.n_observations, 10);
        assert_eq!(result.residual_df(), 7);
        assert!(!result.converged);
        assert!(!result.has_extras());
    }

    #[test]
    fn test_get_coefficient() {
        let mut result = FitResult::empty(2, 10);
        result.coefficients[0] = 1.5;
        result.coefficients[1] = -0.5;

        assert_eq!(result.get_coefficient(0), Some(1.5));
        assert_eq!(result.get_coefficient(1), Some(-0.5));
        assert_eq!(result.get_coefficient(2), None);
    }

    #[test]
    fn test_has_extras() {
        let mut result = FitResult::empty(2, 4);
        assert!(!result.has_extras());

        result.eta_hat = Some(Col::zeros(4));
        result.mu_hat = Some(Col::zeros(4));
        assert!(!result.has_extras());

        result.var_hat = Some(Col::zeros(4));
        assert!(result.has_extras());
    }

    #[test]
    fn test_residual_df_saturates() {
        let result = FitResult::empty(5, 3);
        assert_eq!(result.residual_df(), 0);
    }
}
