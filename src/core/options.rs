//! Fit options and configuration.

use thiserror::Error;

/// Numerical optimizer used for the maximum-likelihood fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimMethod {
    /// Nelder-Mead simplex (default, derivative-free).
    #[default]
    NelderMead,
    /// L-BFGS with a numerical gradient (faster near smooth optima).
    Lbfgs,
}

/// Configuration options for the maximum-likelihood fit.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Starting coefficients; `None` means the zero vector (default).
    ///
    /// When set, the length must match the design matrix column count.
    pub beta0: Option<Vec<f64>>,
    /// Whether to also compute the per-observation linear predictor, fitted
    /// mean and fitted variance (default: false).
    pub extras: bool,
    /// Optimizer backend (default: Nelder-Mead).
    pub method: OptimMethod,
    /// Maximum optimizer iterations (default: 500).
    pub max_iterations: u64,
    /// Convergence tolerance: simplex standard deviation for Nelder-Mead,
    /// gradient norm for L-BFGS (default: 1e-8).
    pub tolerance: f64,
    /// Per-coordinate offset used to build the initial Nelder-Mead simplex
    /// around the start point (default: 0.1).
    pub simplex_step: f64,
    /// Number of corrections kept by L-BFGS (default: 10).
    pub lbfgs_memory: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            beta0: None,
            extras: false,
            method: OptimMethod::NelderMead,
            max_iterations: 500,
            tolerance: 1e-8,
            simplex_step: 0.1,
            lbfgs_memory: 10,
        }
    }
}

/// Errors that can occur when validating fit options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("max_iterations must be at least 1, got {0}")]
    InvalidMaxIterations(u64),
    #[error("simplex_step must be positive and finite, got {0}")]
    InvalidSimplexStep(f64),
    #[error("lbfgs_memory must be at least 1, got {0}")]
    InvalidLbfgsMemory(usize),
    #[error("starting coefficients must all be finite")]
    NonFiniteStart,
}

impl FitOptions {
    /// Create a new builder for fit options.
    pub fn builder() -> FitOptionsBuilder {
        FitOptionsBuilder::default()
    }

    /// Default Nelder-Mead configuration.
    pub fn nelder_mead() -> Self {
        Self::default()
    }

    /// L-BFGS configuration with otherwise default settings.
    pub fn lbfgs() -> Self {
        Self {
            method: OptimMethod::Lbfgs,
            ..Default::default()
        }
    }

    /// Validate the options and return an error if invalid.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !(self.tolerance > 0.0) {
            return Err(OptionsError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations < 1 {
            return Err(OptionsError::InvalidMaxIterations(self.max_iterations));
        }
        if !(self.simplex_step > 0.0) || !self.simplex_step.is_finite() {
            return Err(OptionsError::InvalidSimplexStep(self.simplex_step));
        }
        if self.lbfgs_memory < 1 {
            return Err(OptionsError::InvalidLbfgsMemory(self.lbfgs_memory));
        }
        if let Some(start) = &self.beta0 {
            if start.iter().any(|b| !b.is_finite()) {
                return Err(OptionsError::NonFiniteStart);
            }
        }
        Ok(())
    }
}

/// Builder for `FitOptions`.
#[derive(Debug, Clone, Default)]
pub struct FitOptionsBuilder {
    options: FitOptions,
}

impl FitOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting coefficient vector.
    pub fn beta0(mut self, start: Vec<f64>) -> Self {
        self.options.beta0 = Some(start);
        self
    }

    /// Set whether to compute per-observation extras (eta, mean, variance).
    pub fn extras(mut self, extras: bool) -> Self {
        self.options.extras = extras;
        self
    }

    /// Set the optimizer backend.
    pub fn method(mut self, method: OptimMethod) -> Self {
        self.options.method = method;
        self
    }

    /// Set the maximum optimizer iterations.
    pub fn max_iterations(mut self, max_iter: u64) -> Self {
        self.options.max_iterations = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tol: f64) -> Self {
        self.options.tolerance = tol;
        self
    }

    /// Set the initial simplex offset for Nelder-Mead.
    pub fn simplex_step(mut self, step: f64) -> Self {
        self.options.simplex_step = step;
        self
    }

    /// Set the L-BFGS correction memory.
    pub fn lbfgs_memory(mut self, m: usize) -> Self {
        self.options.lbfgs_memory = m;
        self
    }

    /// Build and validate the options.
    pub fn build(self) -> Result<FitOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }

    /// Build the options without validation.
    pub fn build_unchecked(self) -> FitOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = FitOptions::default();
        assert!(opts.beta0.is_none());
        assert!(!opts.extras);
        assert_eq!(opts.method, OptimMethod::NelderMead);
        assert_eq!(opts.max_iterations, 500);
        assert!((opts.tolerance - 1e-8).abs() < 1e-15);
    }

    #[test]
    fn test_builder() {
        let opts = FitOptions::builder()
            .beta0(vec![0.5, -0.2])
            .extras(true)
            .build()
            .unwrap();

        assert_eq!(opts.beta0.as_deref(), Some(&[0.5, -0.2][..]));
        assert!(opts.extras);
    }

    #[test]
    fn test_factory_methods() {
        let nm = FitOptions::nelder_mead();
        assert_eq!(nm.method, OptimMethod::NelderMead);

        let lbfgs = FitOptions::lbfgs();
        assert_eq!(lbfgs.method, OptimMethod::Lbfgs);
    }

    #[test]
    fn test_validation_invalid_tolerance() {
        let result = FitOptions::builder().tolerance(0.0).build();
        assert!(matches!(result, Err(OptionsError::InvalidTolerance(_))));
    }

    #[test]
    fn test_validation_invalid_max_iterations() {
        let result = FitOptions::builder().max_iterations(0).build();
        assert!(matches!(result, Err(OptionsError::InvalidMaxIterations(_))));
    }

    #[test]
    fn test_validation_invalid_simplex_step() {
        let result = FitOptions::builder().simplex_step(-0.1).build();
        assert!(matches!(result, Err(OptionsError::InvalidSimplexStep(_))));

        let result = FitOptions::builder().simplex_step(f64::NAN).build();
        assert!(matches!(result, Err(OptionsError::InvalidSimplexStep(_))));
    }

    #[test]
    fn test_validation_invalid_lbfgs_memory() {
        let result = FitOptions::builder().lbfgs_memory(0).build();
        assert!(matches!(result, Err(OptionsError::InvalidLbfgsMemory(_))));
    }

    #[test]
    fn test_validation_non_finite_start() {
        let result = FitOptions::builder().beta0(vec![0.0, f64::NAN]).build();
        assert!(matches!(result, Err(OptionsError::NonFiniteStart)));
    }

    #[test]
    fn test_builder_unchecked_skips_validation() {
        let opts = FitOptions::builder().tolerance(-1.0).build_unchecked();
        assert!((opts.tolerance + 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_optim_method_default() {
        assert_eq!(OptimMethod::default(), OptimMethod::NelderMead);
    }
}
