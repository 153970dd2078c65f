//! Noncentral F distribution: log-density and sampling.

use rand::Rng;
use rand_distr::{ChiSquared, Distribution, Poisson, StandardNormal};
use statrs::function::beta::ln_beta;
use statrs::function::gamma::ln_gamma;
use thiserror::Error;

use crate::core::NoncentralFFamily;

/// Terms examined per direction when summing the density series.
const MAX_SERIES_TERMS: usize = 10_000;

/// A series term this far (in log units) below the running maximum no
/// longer moves the sum at f64 precision.
const SERIES_LN_CUTOFF: f64 = -60.0;

/// Errors from constructing a noncentral F distribution.
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("df1 must be positive and finite, got {0}")]
    InvalidDf1(f64),
    #[error("df2 must be positive and finite, got {0}")]
    InvalidDf2(f64),
    #[error("ncp must be non-negative and finite, got {0}")]
    InvalidNcp(f64),
}

/// Noncentral F distribution with degrees of freedom `df1`, `df2` and
/// noncentrality parameter `ncp`.
///
/// The density is the Poisson(ncp/2) mixture whose k-th component is the
/// law of `((df1 + 2k) / df1)` times a central `F(df1 + 2k, df2)` variate.
/// In closed form each term keeps the original `df1/df2` ratio and bumps
/// only the numerator shape:
///
/// ```text
/// f(y) = sum_{k>=0}  pois(k; ncp/2) * (df1/df2)^(df1/2 + k)
///        * y^(df1/2 + k - 1) * (1 + df1 y / df2)^(-(df1 + df2)/2 - k)
///        / B(df1/2 + k, df2/2)
/// ```
///
/// `ncp = 0` reduces exactly to the central F distribution. Sampling uses
/// the chi-squared ratio representation with a caller-supplied random
/// number generator.
#[derive(Debug, Clone, Copy)]
pub struct NoncentralF {
    df1: f64,
    df2: f64,
    ncp: f64,
}

impl NoncentralF {
    /// Create a distribution, rejecting out-of-domain parameters.
    pub fn new(df1: f64, df2: f64, ncp: f64) -> Result<Self, DistributionError> {
        if !(df1 > 0.0) || !df1.is_finite() {
            return Err(DistributionError::InvalidDf1(df1));
        }
        if !(df2 > 0.0) || !df2.is_finite() {
            return Err(DistributionError::InvalidDf2(df2));
        }
        if !(ncp >= 0.0) || !ncp.is_finite() {
            return Err(DistributionError::InvalidNcp(ncp));
        }
        Ok(Self { df1, df2, ncp })
    }

    /// Numerator degrees of freedom.
    pub fn df1(&self) -> f64 {
        self.df1
    }

    /// Denominator degrees of freedom.
    pub fn df2(&self) -> f64 {
        self.df2
    }

    /// Noncentrality parameter.
    pub fn ncp(&self) -> f64 {
        self.ncp
    }

    /// Natural log of the density at `y`.
    ///
    /// Returns negative infinity outside the support (`y <= 0`). The mixture
    /// series is accumulated in log space outward from the modal Poisson
    /// weight and truncated once terms stop contributing, with a bounded
    /// term count; precision degrades for extreme `ncp`.
    pub fn ln_pdf(&self, y: f64) -> f64 {
        if y.is_nan() {
            return f64::NAN;
        }
        if y <= 0.0 {
            return f64::NEG_INFINITY;
        }
        if self.ncp == 0.0 {
            return central_f_ln_pdf(y, self.df1, self.df2);
        }

        let half = 0.5 * self.ncp;
        let b = 0.5 * self.df2;
        let ln_ratio = (self.df1 / self.df2).ln();
        let ln_y = y.ln();
        let ln_denom = (self.df1 * y / self.df2).ln_1p();
        let ln_term = |k: u64| -> f64 {
            let kf = k as f64;
            let a = 0.5 * self.df1 + kf;
            let ln_weight = -half + kf * half.ln() - ln_gamma(kf + 1.0);
            ln_weight + a * ln_ratio + (a - 1.0) * ln_y - (a + b) * ln_denom - ln_beta(a, b)
        };

        // Start at the modal Poisson index and fan out both ways.
        let k0 = half.floor() as u64;
        let first = ln_term(k0);
        if !first.is_finite() {
            return first;
        }

        let mut total = first;
        let mut best = first;

        let mut k = k0;
        for _ in 0..MAX_SERIES_TERMS {
            k += 1;
            let t = ln_term(k);
            if t < best + SERIES_LN_CUTOFF {
                break;
            }
            total = ln_add_exp(total, t);
            best = best.max(t);
        }

        let mut k = k0;
        for _ in 0..MAX_SERIES_TERMS {
            if k == 0 {
                break;
            }
            k -= 1;
            let t = ln_term(k);
            if t < best + SERIES_LN_CUTOFF {
                break;
            }
            total = ln_add_exp(total, t);
            best = best.max(t);
        }

        total
    }

    /// Density at `y`.
    pub fn pdf(&self, y: f64) -> f64 {
        self.ln_pdf(y).exp()
    }

    /// Mean of the distribution; non-finite for `df2 <= 2`.
    pub fn mean(&self) -> f64 {
        self.family().mean(self.ncp)
    }

    /// Variance of the distribution, via the variance quadratic of the
    /// family; meaningless for `df2 <= 4`.
    pub fn variance(&self) -> f64 {
        let family = self.family();
        family.variance_from_mean(family.mean(self.ncp))
    }

    fn family(&self) -> NoncentralFFamily {
        NoncentralFFamily::new(self.df1, self.df2)
    }
}

impl Distribution<f64> for NoncentralF {
    /// Draw one variate: a noncentral chi-squared over a central one,
    /// each scaled by its degrees of freedom.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let numerator = noncentral_chi2(rng, self.df1, self.ncp);
        let denominator = chi2(rng, self.df2);
        (numerator / self.df1) / (denominator / self.df2)
    }
}

/// `log(exp(a) + exp(b))` without leaving log space.
fn ln_add_exp(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if hi == f64::NEG_INFINITY {
        return hi;
    }
    hi + (lo - hi).exp().ln_1p()
}

/// Central F log-density through the log-beta normalizer.
fn central_f_ln_pdf(y: f64, d1: f64, d2: f64) -> f64 {
    let a = 0.5 * d1;
    let b = 0.5 * d2;
    a * (d1 / d2).ln() + (a - 1.0) * y.ln() - (a + b) * (d1 * y / d2).ln_1p() - ln_beta(a, b)
}

/// Noncentral chi-squared draw.
///
/// For `df >= 1` this uses the exact normal-shift form
/// `(Z + sqrt(ncp))^2 + chi2(df - 1)`; fractional `df` below one falls back
/// to the Poisson-mixture form `chi2(df + 2K)`, `K ~ Poisson(ncp/2)`.
fn noncentral_chi2<R: Rng + ?Sized>(rng: &mut R, df: f64, ncp: f64) -> f64 {
    if ncp == 0.0 {
        return chi2(rng, df);
    }
    if df >= 1.0 {
        let z: f64 = rng.sample(StandardNormal);
        let shifted = (z + ncp.sqrt()).powi(2);
        if df > 1.0 {
            shifted + chi2(rng, df - 1.0)
        } else {
            shifted
        }
    } else {
        let k: f64 = match Poisson::new(0.5 * ncp) {
            Ok(mixing) => mixing.sample(rng),
            Err(_) => f64::NAN,
        };
        chi2(rng, df + 2.0 * k)
    }
}

/// Central chi-squared draw; parameters are validated upstream, so a
/// constructor failure surfaces as NaN rather than a panic.
fn chi2<R: Rng + ?Sized>(rng: &mut R, df: f64) -> f64 {
    match ChiSquared::new(df) {
        Ok(dist) => dist.sample(rng),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use statrs::distribution::{Continuous, FisherSnedecor};

    #[test]
    fn test_new_rejects_invalid_parameters() {
        assert!(matches!(
            NoncentralF::new(0.0, 10.0, 1.0),
            Err(DistributionError::InvalidDf1(_))
        ));
        assert!(matches!(
            NoncentralF::new(-2.0, 10.0, 1.0),
            Err(DistributionError::InvalidDf1(_))
        ));
        assert!(matches!(
            NoncentralF::new(5.0, f64::INFINITY, 1.0),
            Err(DistributionError::InvalidDf2(_))
        ));
        assert!(matches!(
            NoncentralF::new(5.0, 10.0, -0.5),
            Err(DistributionError::InvalidNcp(_))
        ));
        assert!(matches!(
            NoncentralF::new(5.0, 10.0, f64::NAN),
            Err(DistributionError::InvalidNcp(_))
        ));
        assert!(NoncentralF::new(5.0, 10.0, 0.0).is_ok());
    }

    #[test]
    fn test_central_case_matches_fisher_snedecor() {
        let ncf = NoncentralF::new(3.0, 8.0, 0.0).expect("valid parameters");
        let central = FisherSnedecor::new(3.0, 8.0).expect("valid parameters");
        for &y in &[0.2, 0.7, 1.0, 1.8, 4.0, 12.0] {
            let ours = ncf.ln_pdf(y);
            let reference = central.ln_pdf(y);
            assert!(
                (ours - reference).abs() < 1e-10,
                "central reduction mismatch at y={y}: {ours} vs {reference}"
            );
        }
    }

    #[test]
    fn test_tiny_ncp_is_continuous_with_central() {
        let central = NoncentralF::new(4.0, 12.0, 0.0).expect("valid parameters");
        let nearly = NoncentralF::new(4.0, 12.0, 1e-12).expect("valid parameters");
        for &y in &[0.5, 1.0, 2.0, 5.0] {
            assert!((central.ln_pdf(y) - nearly.ln_pdf(y)).abs() < 1e-8);
        }
    }

    #[test]
    fn test_ln_pdf_outside_support() {
        let ncf = NoncentralF::new(5.0, 10.0, 3.0).expect("valid parameters");
        assert_eq!(ncf.ln_pdf(-1.0), f64::NEG_INFINITY);
        assert_eq!(ncf.ln_pdf(0.0), f64::NEG_INFINITY);
        assert!(ncf.ln_pdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_pdf_finite_and_positive_on_support() {
        let ncf = NoncentralF::new(5.0, 10.0, 3.0).expect("valid parameters");
        for &y in &[0.05, 0.5, 1.0, 2.0, 10.0, 80.0] {
            let p = ncf.pdf(y);
            assert!(p.is_finite() && p > 0.0, "pdf({y}) = {p}");
        }
    }

    #[test]
    fn test_large_ncp_stays_finite() {
        let ncf = NoncentralF::new(5.0, 10.0, 400.0).expect("valid parameters");
        let near_mode = ncf.ln_pdf(ncf.mean());
        assert!(near_mode.is_finite());
        // Far below the bulk the density is minute but still a number.
        assert!(ncf.ln_pdf(0.01) < near_mode);
    }

    #[test]
    fn test_mean_matches_family_formula() {
        let ncf = NoncentralF::new(5.0, 10.0, 3.0).expect("valid parameters");
        assert!((ncf.mean() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_reference_case() {
        let ncf = NoncentralF::new(5.0, 10.0, 3.0).expect("valid parameters");
        assert!((ncf.variance() - 19.0 / 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_sampling_yields_positive_finite_draws() {
        let mut rng = StdRng::seed_from_u64(7);
        for &(df1, df2, ncp) in &[
            (5.0, 10.0, 3.0),
            (1.0, 8.0, 2.0),  // shifted-normal square only
            (0.5, 9.0, 1.5),  // fractional df, Poisson mixture path
            (3.0, 6.0, 0.0),  // central
        ] {
            let ncf = NoncentralF::new(df1, df2, ncp).expect("valid parameters");
            for _ in 0..200 {
                let draw = ncf.sample(&mut rng);
                assert!(
                    draw.is_finite() && draw > 0.0,
                    "bad draw {draw} for df1={df1}, df2={df2}, ncp={ncp}"
                );
            }
        }
    }

    #[test]
    fn test_ln_add_exp() {
        let sum = ln_add_exp(0.0, 0.0);
        assert!((sum - std::f64::consts::LN_2).abs() < 1e-15);
        assert_eq!(ln_add_exp(f64::NEG_INFINITY, f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert!((ln_add_exp(-3.0, f64::NEG_INFINITY) - (-3.0)).abs() < 1e-15);
    }
}
