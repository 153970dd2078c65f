//! Numerical optimization wrapper.
//!
//! This module adapts argmin's Nelder-Mead and L-BFGS solvers to a single
//! minimization interface used by the maximum-likelihood fit.

use argmin::core::{CostFunction, Executor, Gradient, State, TerminationReason, TerminationStatus};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::neldermead::NelderMead;
use argmin::solver::quasinewton::LBFGS;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::core::{FitOptions, OptimMethod};

/// Errors from the optimization layer.
#[derive(Debug, Error)]
pub enum OptimError {
    #[error("objective evaluation failed: {0}")]
    Objective(String),
    #[error("invalid optimizer configuration: {0}")]
    InvalidConfig(String),
    #[error("optimization failed: {0}")]
    Failed(String),
    #[error("optimizer returned no best parameters")]
    NoSolution,
}

/// Result of a minimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameters found.
    pub parameters: Vec<f64>,
    /// Objective value at the best parameters.
    pub fval: f64,
    /// Iterations used.
    pub iterations: u64,
    /// Number of objective evaluations.
    pub function_evals: usize,
    /// Number of gradient evaluations.
    pub gradient_evals: usize,
    /// Whether the solver reported convergence (as opposed to hitting the
    /// iteration cap or another stop condition).
    pub converged: bool,
    /// The solver's termination status, verbatim.
    pub message: String,
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OptimizationResult(fval={:.6}, iterations={}, n_fev={}, n_gev={}, converged={})",
            self.fval, self.iterations, self.function_evals, self.gradient_evals, self.converged
        )
    }
}

/// Objective function seam for the minimizer.
///
/// Implementors provide `eval`; the default `gradient` uses central
/// differences and only runs for the quasi-Newton path.
pub trait ObjectiveFunction: Send + Sync {
    /// Evaluate the objective at the given parameters.
    fn eval(&self, params: &[f64]) -> Result<f64, OptimError>;

    /// Gradient at the given parameters (numerical if not overridden).
    fn gradient(&self, params: &[f64]) -> Result<Vec<f64>, OptimError> {
        let n = params.len();
        let mut grad = vec![0.0; n];

        for i in 0..n {
            let eps = 1e-8 * params[i].abs().max(1.0);

            let mut params_plus = params.to_vec();
            params_plus[i] += eps;
            let f_plus = self.eval(&params_plus)?;

            let mut params_minus = params.to_vec();
            params_minus[i] -= eps;
            let f_minus = self.eval(&params_minus)?;

            grad[i] = (f_plus - f_minus) / (2.0 * eps);
        }

        Ok(grad)
    }
}

#[derive(Default)]
struct FuncCounts {
    cost: AtomicUsize,
    grad: AtomicUsize,
}

/// Adapter making an [`ObjectiveFunction`] usable by argmin solvers.
struct ArgminProblem<'a> {
    objective: &'a dyn ObjectiveFunction,
    counts: Arc<FuncCounts>,
}

impl CostFunction for ArgminProblem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        self.counts.cost.fetch_add(1, Ordering::Relaxed);
        self.objective
            .eval(params)
            .map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

impl Gradient for ArgminProblem<'_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, params: &Self::Param) -> Result<Self::Gradient, argmin::core::Error> {
        self.counts.grad.fetch_add(1, Ordering::Relaxed);
        self.objective
            .gradient(params)
            .map_err(|e| argmin::core::Error::msg(e.to_string()))
    }
}

/// Unconstrained multivariate minimizer.
#[derive(Debug, Clone)]
pub struct Minimizer {
    /// Solver backend.
    pub method: OptimMethod,
    /// Iteration cap.
    pub max_iterations: u64,
    /// Convergence tolerance (simplex standard deviation or gradient norm).
    pub tolerance: f64,
    /// Initial simplex offset per coordinate (Nelder-Mead).
    pub simplex_step: f64,
    /// Correction memory (L-BFGS).
    pub lbfgs_memory: usize,
}

impl Default for Minimizer {
    fn default() -> Self {
        Self::from_options(&FitOptions::default())
    }
}

impl Minimizer {
    /// Build a minimizer from the optimizer-relevant fields of fit options.
    pub fn from_options(options: &FitOptions) -> Self {
        Self {
            method: options.method,
            max_iterations: options.max_iterations,
            tolerance: options.tolerance,
            simplex_step: options.simplex_step,
            lbfgs_memory: options.lbfgs_memory,
        }
    }

    /// Minimize the objective starting from `init`.
    ///
    /// The solver's termination status is reported on the result, never
    /// judged here; a hard solver error is the only failure.
    pub fn minimize(
        &self,
        objective: &dyn ObjectiveFunction,
        init: &[f64],
    ) -> Result<OptimizationResult, OptimError> {
        if init.is_empty() {
            return Err(OptimError::InvalidConfig(
                "initial point must not be empty".to_string(),
            ));
        }

        let counts = Arc::new(FuncCounts::default());
        let problem = ArgminProblem {
            objective,
            counts: counts.clone(),
        };

        match self.method {
            OptimMethod::NelderMead => self.run_nelder_mead(problem, init, &counts),
            OptimMethod::Lbfgs => self.run_lbfgs(problem, init, &counts),
        }
    }

    fn run_nelder_mead(
        &self,
        problem: ArgminProblem<'_>,
        init: &[f64],
        counts: &FuncCounts,
    ) -> Result<OptimizationResult, OptimError> {
        let solver = NelderMead::new(initial_simplex(init, self.simplex_step))
            .with_sd_tolerance(self.tolerance)
            .map_err(|e| OptimError::InvalidConfig(e.to_string()))?;

        let res = Executor::new(problem, solver)
            .configure(|state| state.max_iters(self.max_iterations))
            .run()
            .map_err(|e| OptimError::Failed(e.to_string()))?;

        let state = res.state();
        let parameters = state.get_best_param().ok_or(OptimError::NoSolution)?.clone();
        let termination = state.get_termination_status();
        Ok(OptimizationResult {
            parameters,
            fval: state.get_best_cost(),
            iterations: state.get_iter(),
            function_evals: counts.cost.load(Ordering::Relaxed),
            gradient_evals: counts.grad.load(Ordering::Relaxed),
            converged: is_converged(termination),
            message: termination.to_string(),
        })
    }

    fn run_lbfgs(
        &self,
        problem: ArgminProblem<'_>,
        init: &[f64],
        counts: &FuncCounts,
    ) -> Result<OptimizationResult, OptimError> {
        let linesearch = MoreThuenteLineSearch::new();
        let solver = LBFGS::new(linesearch, self.lbfgs_memory)
            .with_tolerance_grad(self.tolerance)
            .map_err(|e| OptimError::InvalidConfig(e.to_string()))?;

        let res = Executor::new(problem, solver)
            .configure(|state| state.param(init.to_vec()).max_iters(self.max_iterations))
            .run()
            .map_err(|e| OptimError::Failed(e.to_string()))?;

        let state = res.state();
        let parameters = state.get_best_param().ok_or(OptimError::NoSolution)?.clone();
        let termination = state.get_termination_status();
        Ok(OptimizationResult {
            parameters,
            fval: state.get_best_cost(),
            iterations: state.get_iter(),
            function_evals: counts.cost.load(Ordering::Relaxed),
            gradient_evals: counts.grad.load(Ordering::Relaxed),
            converged: is_converged(termination),
            message: termination.to_string(),
        })
    }
}

fn is_converged(status: &TerminationStatus) -> bool {
    matches!(
        status,
        TerminationStatus::Terminated(TerminationReason::SolverConverged)
            | TerminationStatus::Terminated(TerminationReason::TargetCostReached)
    )
}

/// Standard axis-aligned initial simplex: the start point plus one point
/// offset by `step` along each coordinate.
fn initial_simplex(init: &[f64], step: f64) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(init.len() + 1);
    simplex.push(init.to_vec());
    for j in 0..init.len() {
        let mut vertex = init.to_vec();
        vertex[j] += step;
        simplex.push(vertex);
    }
    simplex
}
