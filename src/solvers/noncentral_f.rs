//! Maximum-likelihood regression for noncentral F responses.
//!
//! The model links covariates to the noncentrality parameter through a log
//! link, `ncp_i = exp(x_i' beta)`, with both degrees of freedom held fixed.
//! Coefficients are estimated by minimizing the negative log-likelihood with
//! a derivative-free or quasi-Newton solver.

use faer::{Col, Mat};

use crate::core::{FitOptions, FitResult, NoncentralFFamily, OptimMethod};
use crate::distributions::NoncentralF;
use crate::optim::{Minimizer, ObjectiveFunction, OptimError, OptimizationResult};
use crate::solvers::{FittedRegressor, RegressionError, Regressor};
use crate::utils::{check_shapes, linear_predictor};

/// Negative log-likelihood of the log-link noncentrality model.
///
/// Any parameter vector that produces an invalid noncentrality or a
/// non-finite log-density evaluates to positive infinity, so the solver
/// backs away from it.
struct NllObjective<'a> {
    x: &'a Mat<f64>,
    y: &'a Col<f64>,
    family: NoncentralFFamily,
}

impl ObjectiveFunction for NllObjective<'_> {
    fn eval(&self, params: &[f64]) -> Result<f64, OptimError> {
        let mut nll = 0.0;
        for i in 0..self.x.nrows() {
            let mut eta = 0.0;
            for j in 0..self.x.ncols() {
                eta += self.x[(i, j)] * params[j];
            }
            let ncp = eta.exp();
            let dist = match NoncentralF::new(self.family.df1, self.family.df2, ncp) {
                Ok(dist) => dist,
                Err(_) => return Ok(f64::INFINITY),
            };
            let ln_density = dist.ln_pdf(self.y[i]);
            if !ln_density.is_finite() {
                return Ok(f64::INFINITY);
            }
            nll -= ln_density;
        }
        Ok(nll)
    }
}

/// Noncentral F regressor with a log link on the noncentrality parameter.
///
/// # Example
///
/// ```rust,ignore
/// use ncf_regression::prelude::*;
///
/// let fitted = NoncentralFRegressor::builder(5.0, 12.0)
///     .max_iterations(1000)
///     .extras(true)
///     .build()?
///     .fit(&x, &y)?;
///
/// let means = fitted.predict(&x_new);
/// println!("log-likelihood = {}", fitted.result().log_likelihood);
/// ```
#[derive(Debug, Clone)]
pub struct NoncentralFRegressor {
    family: NoncentralFFamily,
    options: FitOptions,
}

impl NoncentralFRegressor {
    /// Create a regressor with the given degrees of freedom and default options.
    pub fn new(df1: f64, df2: f64) -> Self {
        Self {
            family: NoncentralFFamily::new(df1, df2),
            options: FitOptions::default(),
        }
    }

    /// Start building a regressor with the given degrees of freedom.
    pub fn builder(df1: f64, df2: f64) -> NoncentralFRegressorBuilder {
        NoncentralFRegressorBuilder {
            df1,
            df2,
            options: FitOptions::default(),
        }
    }

    /// Replace the fit options wholesale.
    pub fn with_options(mut self, options: FitOptions) -> Self {
        self.options = options;
        self
    }

    /// The response family this regressor fits.
    pub fn family(&self) -> NoncentralFFamily {
        self.family
    }

    fn starting_values(&self, n_cols: usize) -> Result<Vec<f64>, RegressionError> {
        match &self.options.beta0 {
            Some(beta0) => {
                if beta0.len() != n_cols {
                    return Err(RegressionError::CoefficientDimension {
                        expected: n_cols,
                        got: beta0.len(),
                    });
                }
                Ok(beta0.clone())
            }
            None => Ok(vec![0.0; n_cols]),
        }
    }

    fn build_result(&self, x: &Mat<f64>, opt: &OptimizationResult) -> FitResult {
        let n = x.nrows();
        let p = x.ncols();

        let mut result = FitResult::empty(p, n);
        result.coefficients = Col::from_fn(p, |j| opt.parameters[j]);
        result.converged = opt.converged;
        result.termination = opt.message.clone();
        result.iterations = opt.iterations;
        result.function_evals = opt.function_evals;
        result.gradient_evals = opt.gradient_evals;
        result.log_likelihood = -opt.fval;
        result.aic = 2.0 * p as f64 + 2.0 * opt.fval;
        result.bic = (n as f64).ln() * p as f64 + 2.0 * opt.fval;

        if self.options.extras {
            let eta = linear_predictor(x, &result.coefficients);
            let mu = Col::from_fn(n, |i| self.family.mean(eta[i].exp()));
            let var = Col::from_fn(n, |i| self.family.variance_from_mean(mu[i]));
            result.eta_hat = Some(eta);
            result.mu_hat = Some(mu);
            result.var_hat = Some(var);
        }

        result
    }
}

impl Regressor for NoncentralFRegressor {
    type Fitted = FittedNoncentralF;

    fn fit(&self, x: &Mat<f64>, y: &Col<f64>) -> Result<FittedNoncentralF, RegressionError> {
        self.options.validate()?;
        check_shapes(x, y)?;

        // The degrees of freedom must form a valid density before any
        // likelihood work starts.
        NoncentralF::new(self.family.df1, self.family.df2, 0.0)?;

        for i in 0..y.nrows() {
            if !y[i].is_finite() {
                return Err(RegressionError::NonFiniteResponse { index: i });
            }
        }

        let beta0 = self.starting_values(x.ncols())?;
        let objective = NllObjective {
            x,
            y,
            family: self.family,
        };

        let start_nll = objective.eval(&beta0)?;
        if !start_nll.is_finite() {
            return Err(RegressionError::NonFiniteStart);
        }

        let minimizer = Minimizer::from_options(&self.options);
        let opt = minimizer.minimize(&objective, &beta0)?;

        Ok(FittedNoncentralF {
            family: self.family,
            result: self.build_result(x, &opt),
        })
    }
}

/// A fitted noncentral F regression model.
#[derive(Debug, Clone)]
pub struct FittedNoncentralF {
    family: NoncentralFFamily,
    result: FitResult,
}

impl FittedNoncentralF {
    /// The response family the model was fit with.
    pub fn family(&self) -> NoncentralFFamily {
        self.family
    }

    /// Predicted noncentrality parameters, `exp(x_i' beta)`.
    pub fn predict_ncp(&self, x: &Mat<f64>) -> Col<f64> {
        let eta = linear_predictor(x, &self.result.coefficients);
        Col::from_fn(x.nrows(), |i| eta[i].exp())
    }
}

impl FittedRegressor for FittedNoncentralF {
    fn predict(&self, x: &Mat<f64>) -> Col<f64> {
        let eta = linear_predictor(x, &self.result.coefficients);
        Col::from_fn(x.nrows(), |i| self.family.mean(eta[i].exp()))
    }

    fn result(&self) -> &FitResult {
        &self.result
    }
}

// ========== Builder ==========

/// Builder for [`NoncentralFRegressor`].
#[derive(Debug, Clone)]
pub struct NoncentralFRegressorBuilder {
    df1: f64,
    df2: f64,
    options: FitOptions,
}

impl NoncentralFRegressorBuilder {
    /// Starting coefficients (defaults to all zeros).
    pub fn beta0(mut self, beta0: Vec<f64>) -> Self {
        self.options.beta0 = Some(beta0);
        self
    }

    /// Store fitted linear predictors, means, and variances on the result.
    pub fn extras(mut self, extras: bool) -> Self {
        self.options.extras = extras;
        self
    }

    /// Optimization backend.
    pub fn method(mut self, method: OptimMethod) -> Self {
        self.options.method = method;
        self
    }

    /// Iteration cap for the optimizer.
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.options.max_iterations = max_iterations;
        self
    }

    /// Convergence tolerance for the optimizer.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.options.tolerance = tolerance;
        self
    }

    /// Replace all fit options at once.
    pub fn options(mut self, options: FitOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the regressor, validating the options.
    pub fn build(self) -> Result<NoncentralFRegressor, RegressionError> {
        self.options.validate()?;
        Ok(NoncentralFRegressor {
            family: NoncentralFFamily::new(self.df1, self.df2),
            options: self.options,
        })
    }

    /// Build without validating the options.
    pub fn build_unchecked(self) -> NoncentralFRegressor {
        NoncentralFRegressor {
            family: NoncentralFFamily::new(self.df1, self.df2),
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_data() -> (Mat<f64>, Col<f64>) {
        let x = Mat::from_fn(8, 2, |i, j| if j == 0 { 1.0 } else { i as f64 / 7.0 - 0.5 });
        let y = Col::from_fn(8, |i| 0.8 + 0.4 * i as f64);
        (x, y)
    }

    #[test]
    fn test_builder_roundtrip() {
        let regressor = NoncentralFRegressor::builder(5.0, 10.0)
            .max_iterations(200)
            .tolerance(1e-6)
            .extras(true)
            .build()
            .unwrap();
        assert_eq!(regressor.family().df1, 5.0);
        assert_eq!(regressor.family().df2, 10.0);
    }

    #[test]
    fn test_builder_rejects_bad_tolerance() {
        let result = NoncentralFRegressor::builder(5.0, 10.0).tolerance(-1.0).build();
        assert!(matches!(result, Err(RegressionError::InvalidOptions(_))));
    }

    #[test]
    fn test_fit_rejects_dimension_mismatch() {
        let (x, _) = toy_data();
        let y = Col::<f64>::zeros(5);
        let err = NoncentralFRegressor::new(3.0, 9.0).fit(&x, &y).unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_fit_rejects_bad_beta0_length() {
        let (x, y) = toy_data();
        let regressor = NoncentralFRegressor::builder(3.0, 9.0)
            .beta0(vec![0.0; 3])
            .build()
            .unwrap();
        let err = regressor.fit(&x, &y).unwrap_err();
        assert!(matches!(
            err,
            RegressionError::CoefficientDimension { expected: 2, got: 3 }
        ));
    }

    #[test]
    fn test_fit_rejects_nan_response() {
        let (x, mut y) = toy_data();
        y[3] = f64::NAN;
        let err = NoncentralFRegressor::new(3.0, 9.0).fit(&x, &y).unwrap_err();
        assert!(matches!(err, RegressionError::NonFiniteResponse { index: 3 }));
    }

    #[test]
    fn test_fit_rejects_invalid_df() {
        let (x, y) = toy_data();
        let err = NoncentralFRegressor::new(0.0, 9.0).fit(&x, &y).unwrap_err();
        assert!(matches!(err, RegressionError::Distribution(_)));
    }

    #[test]
    fn test_fit_fails_fast_outside_support() {
        let (x, mut y) = toy_data();
        y[0] = -1.0;
        let err = NoncentralFRegressor::new(3.0, 9.0).fit(&x, &y).unwrap_err();
        assert!(matches!(err, RegressionError::NonFiniteStart));
    }

    #[test]
    fn test_small_fit_runs() {
        let (x, y) = toy_data();
        let fitted = NoncentralFRegressor::builder(3.0, 9.0)
            .extras(true)
            .build()
            .unwrap()
            .fit(&x, &y)
            .unwrap();

        let result = fitted.result();
        assert_eq!(result.n_parameters, 2);
        assert_eq!(result.n_observations, 8);
        assert!(result.log_likelihood.is_finite());
        assert!(result.function_evals > 0);
        assert!(
            (result.aic - (4.0 + 2.0 * -result.log_likelihood)).abs() < 1e-10,
            "AIC must match -2*ll + 2p"
        );

        let mu_hat = result.mu_hat.as_ref().unwrap();
        let lower = fitted.family().mean_lower_bound();
        for i in 0..mu_hat.nrows() {
            assert!(mu_hat[i] > lower);
            assert!(mu_hat[i].is_finite());
        }

        let predictions = fitted.predict(&x);
        assert_eq!(predictions.nrows(), 8);
        for i in 0..predictions.nrows() {
            assert!(predictions[i] > 0.0);
        }
    }
}
