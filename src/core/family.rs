//! Noncentral F family: moment conversions and the variance quadratic.
//!
//! The noncentral F distribution with degrees of freedom `df1`, `df2` and
//! noncentrality parameter `ncp` has mean
//!
//! ```text
//! E[Y] = df2 * (ncp + df1) / (df1 * (df2 - 2))        for df2 > 2
//! ```
//!
//! which is linear in `ncp`, so the distribution can equally be parameterized
//! by its mean. Written as a function of the mean (df1, df2 fixed), the
//! variance is a quadratic polynomial whose two real roots give a compact
//! product form for the variance. This module carries those conversions and
//! the root computation in both a closed form and a generic quadratic solve.
//!
//! # Reference
//!
//! - Johnson, N.L., Kotz, S. and Balakrishnan, N. (1995). "Continuous
//!   Univariate Distributions", Vol. 2, 2nd ed. Wiley. Chapter 30.

/// Strategy for computing the roots of the variance quadratic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootMethod {
    /// Direct closed form (default). Numerically preferable: no generic
    /// root-finding involved.
    #[default]
    ClosedForm,
    /// Solve the quadratic from its coefficients with a stable generic
    /// formula, keeping only the real parts of the root pair.
    Quadratic,
}

/// Noncentral F distribution family, parameterized by its two
/// degrees-of-freedom values.
///
/// The family maps between the noncentrality parameterization and the mean
/// parameterization:
///
/// ```text
/// mean = df2 * (ncp + df1) / (df1 * (df2 - 2))
/// ncp  = df1 * (df2 - 2) * mean / df2 - df1
/// var  = 2 * (mean - r1) * (mean - r2) / (df2 - 4)
/// ```
///
/// where `r1 <= r2` are the roots of the variance quadratic (see
/// [`variance_roots`](Self::variance_roots)).
///
/// | Quantity | Defined for |
/// |----------|-------------|
/// | mean     | `df2 > 2`   |
/// | variance | `df2 > 4`   |
///
/// The formulas are evaluated exactly as written: outside their domain they
/// produce non-finite values (division by zero, negative denominators)
/// rather than errors. Callers own the domain check.
#[derive(Debug, Clone, Copy)]
pub struct NoncentralFFamily {
    /// Numerator degrees of freedom.
    pub df1: f64,
    /// Denominator degrees of freedom.
    pub df2: f64,
}

impl NoncentralFFamily {
    /// Create a family from its degrees of freedom.
    pub fn new(df1: f64, df2: f64) -> Self {
        Self { df1, df2 }
    }

    // ========== Moment conversions ==========

    /// Mean of the distribution with noncentrality `ncp`.
    ///
    /// `df2 * (ncp + df1) / (df1 * (df2 - 2))`; non-finite for `df2 <= 2`.
    #[inline]
    pub fn mean(&self, ncp: f64) -> f64 {
        self.df2 * (ncp + self.df1) / (self.df1 * (self.df2 - 2.0))
    }

    /// Noncentrality parameter implied by a target mean.
    ///
    /// Algebraic inverse of [`mean`](Self::mean):
    /// `df1 * (df2 - 2) * mean / df2 - df1`. Means below
    /// [`mean_lower_bound`](Self::mean_lower_bound) map to negative values.
    #[inline]
    pub fn ncp_from_mean(&self, mean: f64) -> f64 {
        self.df1 * (self.df2 - 2.0) * mean / self.df2 - self.df1
    }

    /// Smallest mean reachable with `ncp >= 0`, namely the central-F mean
    /// `df2 / (df2 - 2)`.
    #[inline]
    pub fn mean_lower_bound(&self) -> f64 {
        self.df2 / (self.df2 - 2.0)
    }

    /// Variance of the distribution with the given mean, using the default
    /// closed-form roots.
    ///
    /// `2 * (mean - r1) * (mean - r2) / (df2 - 4)`; meaningless for
    /// `df2 <= 4`.
    #[inline]
    pub fn variance_from_mean(&self, mean: f64) -> f64 {
        self.variance_from_mean_with(mean, RootMethod::ClosedForm)
    }

    /// Variance of the distribution with the given mean, selecting how the
    /// quadratic roots are obtained.
    pub fn variance_from_mean_with(&self, mean: f64, method: RootMethod) -> f64 {
        let (r1, r2) = self.variance_roots(method);
        2.0 * (mean - r1) * (mean - r2) / (self.df2 - 4.0)
    }

    // ========== Variance quadratic ==========

    /// Coefficients `[c0, c1, c2]` of the variance quadratic
    /// `var(m) = c0 + c1*m + c2*m^2`:
    ///
    /// ```text
    /// c0 = -2*df2^2 / (df1 * (df2 - 2) * (df2 - 4))
    /// c1 =  4*df2   / (df1 * (df2 - 4))
    /// c2 =  2 / (df2 - 4)
    /// ```
    pub fn variance_coefficients(&self) -> [f64; 3] {
        let (df1, df2) = (self.df1, self.df2);
        let c0 = -2.0 * df2 * df2 / (df1 * (df2 - 2.0) * (df2 - 4.0));
        let c1 = 4.0 * df2 / (df1 * (df2 - 4.0));
        let c2 = 2.0 / (df2 - 4.0);
        [c0, c1, c2]
    }

    /// The two real roots of the variance quadratic, sorted ascending.
    ///
    /// Both methods agree to floating tolerance for `df1 > 0, df2 > 4`; the
    /// closed form is the default throughout the crate.
    pub fn variance_roots(&self, method: RootMethod) -> (f64, f64) {
        let (ra, rb) = match method {
            RootMethod::ClosedForm => self.closed_form_roots(),
            RootMethod::Quadratic => {
                let [c0, c1, c2] = self.variance_coefficients();
                solve_quadratic(c0, c1, c2)
            }
        };
        if ra <= rb {
            (ra, rb)
        } else {
            (rb, ra)
        }
    }

    /// `pm = sqrt((df1 + df2 - 2) / (df2 - 2))`, roots
    /// `(df2/df1) * (-1 -/+ pm)`.
    fn closed_form_roots(&self) -> (f64, f64) {
        let pm = ((self.df1 + self.df2 - 2.0) / (self.df2 - 2.0)).sqrt();
        let scale = self.df2 / self.df1;
        (scale * (-1.0 - pm), scale * (-1.0 + pm))
    }

    // ========== Link constraint ==========

    /// Minimum feasible value of the linear predictor under the log-mean
    /// link: `ln(df2 / (df2 - 2))`.
    ///
    /// A linear predictor at or above this bound keeps the implied mean at
    /// or above [`mean_lower_bound`](Self::mean_lower_bound). NaN for
    /// `df2 <= 2`.
    #[inline]
    pub fn link_constraint(&self) -> f64 {
        (self.df2 / (self.df2 - 2.0)).ln()
    }
}

/// Stable quadratic solve for `c0 + c1*x + c2*x^2 = 0`.
///
/// A negative discriminant (conjugate pair) collapses to the shared real
/// part; for the variance quadratic the roots are real for valid degrees of
/// freedom, so this only absorbs floating noise.
fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> (f64, f64) {
    let disc = c1 * c1 - 4.0 * c2 * c0;
    if disc < 0.0 {
        let re = -c1 / (2.0 * c2);
        return (re, re);
    }
    // Sign-matched form avoids cancellation between -c1 and the radical.
    let q = -0.5 * (c1 + c1.signum() * disc.sqrt());
    if q == 0.0 {
        (0.0, 0.0)
    } else {
        (q / c2, c0 / q)
    }
}
