//! Conditional posterior of the VAR coefficients given `Σ⁻¹`.
//!
//! Purpose
//! -------
//! Implement the coefficient half of the Gibbs step. With `y = A x + u`,
//! `u_t ~ N(0, Σ)` and a normal prior `vec(A) ~ N(μ₀, Q₀⁻¹)`, the conditional
//! posterior of `a = vec(A)` is normal with
//!
//! - precision `Q = Q₀ + (x xᵀ) ⊗ Σ⁻¹`,
//! - mean `Q⁻¹ (Q₀ μ₀ + vec(Σ⁻¹ y xᵀ))`.
//!
//! Key behaviors
//! -------------
//! - [`draw_coefficients`] validates shapes, then forms and samples the
//!   posterior in one call.
//! - [`coefficient_posterior`] exposes the closed-form mean and covariance.
//! - Inside a chain, `x xᵀ`, `y xᵀ` and `Q₀ μ₀` are computed once
//!   and reused every iteration.
//!
//! Conventions
//! -----------
//! - `vec` stacks columns: `A[i, j] = a[j·k + i]`.
//! - A draw is `mean + L⁻ᵀ z` with `Q = L Lᵀ` and `z ~ N(0, I)`; `Q` is never
//!   inverted explicitly on the sampling path.
use crate::{
    errors::{BvarResult, ConfigError, NumericalResult},
    linalg::{SpdFactor, kron, symmetrize, tcrossprod},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// One posterior sample of `vec(A)` with its row count `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientDraw {
    values: Array1<f64>,
    k: usize,
}

impl CoefficientDraw {
    /// Wrap a stacked coefficient vector.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::ShapeMismatch` when `k == 0` or the length is not a
    ///   multiple of `k`.
    pub fn new(values: Array1<f64>, k: usize) -> BvarResult<CoefficientDraw> {
        if k == 0 || values.len() % k != 0 {
            return Err(ConfigError::ShapeMismatch {
                what: "coefficient draw",
                expected: (k, values.len() / k.max(1)),
                actual: (values.len(), 1),
            }
            .into());
        }
        Ok(CoefficientDraw { values, k })
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn n_vars(&self) -> usize {
        self.k
    }

    pub fn n_regressors(&self) -> usize {
        self.values.len() / self.k
    }

    /// The `k×m` coefficient matrix `A`.
    pub fn matrix(&self) -> Array2<f64> {
        let k = self.k;
        Array2::from_shape_fn((k, self.n_regressors()), |(i, j)| self.values[j * k + i])
    }
}

/// Closed-form conditional posterior of `vec(A)`.
#[derive(Debug, Clone)]
pub struct CoefficientPosterior {
    mean: Array1<f64>,
    precision: SpdFactor,
}

impl CoefficientPosterior {
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Posterior covariance `Q⁻¹`.
    pub fn covariance(&self) -> Array2<f64> {
        self.precision.inverse()
    }

    /// Draw `mean + L⁻ᵀ z`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> NumericalResult<Array1<f64>> {
        let z = standard_normal_vector(self.mean.len(), rng);
        let shift = self.precision.solve_upper_transpose(z.view())?;
        Ok(&self.mean + &shift)
    }
}

/// Data and prior terms of the coefficient update that do not depend on `Σ`.
#[derive(Debug, Clone)]
pub(crate) struct ConjugateStats {
    xx: Array2<f64>,
    yx: Array2<f64>,
    prior_term: Array1<f64>,
}

impl ConjugateStats {
    pub(crate) fn new(
        y: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>, prior_mean: ArrayView1<'_, f64>,
        prior_precision: ArrayView2<'_, f64>,
    ) -> ConjugateStats {
        ConjugateStats {
            xx: tcrossprod(x),
            yx: y.dot(&x.t()),
            prior_term: prior_precision.dot(&prior_mean),
        }
    }

    pub(crate) fn posterior(
        &self, prior_precision: ArrayView2<'_, f64>, sigma_inv: ArrayView2<'_, f64>,
    ) -> NumericalResult<CoefficientPosterior> {
        let mut precision = kron(self.xx.view(), sigma_inv);
        precision += &prior_precision;
        symmetrize(&mut precision);
        let factor = SpdFactor::new(precision.view(), "posterior coefficient precision")?;

        let weighted = sigma_inv.dot(&self.yx);
        let rhs: Array1<f64> =
            self.prior_term.iter().zip(weighted.t().iter()).map(|(p, w)| p + w).collect();
        let mean = factor.solve(rhs.view());
        Ok(CoefficientPosterior { mean, precision: factor })
    }
}

/// Closed-form conditional posterior of `vec(A)` given `Σ⁻¹`.
///
/// Parameters
/// ----------
/// - `y`: `k×n` responses.
/// - `x`: `m×n` regressors.
/// - `sigma_inv`: `k×k` innovation precision.
/// - `prior_mean`: length `k·m`.
/// - `prior_precision`: `k·m × k·m`; may be singular.
///
/// Errors
/// ------
/// - `ConfigError::ShapeMismatch` for inconsistent dimensions.
/// - `NumericalError::NotPositiveDefinite` (wrapped) when the posterior
///   precision cannot be factored.
pub fn coefficient_posterior(
    y: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>, sigma_inv: ArrayView2<'_, f64>,
    prior_mean: ArrayView1<'_, f64>, prior_precision: ArrayView2<'_, f64>,
) -> BvarResult<CoefficientPosterior> {
    check_shapes(y, x, sigma_inv, prior_mean, prior_precision)?;
    let stats = ConjugateStats::new(y, x, prior_mean, prior_precision);
    Ok(stats.posterior(prior_precision, sigma_inv)?)
}

/// Draw one coefficient vector from its conditional posterior.
///
/// Parameters
/// ----------
/// As for [`coefficient_posterior`], plus the random source `rng`.
///
/// Returns
/// -------
/// `BvarResult<CoefficientDraw>`
///   A draw of length `k·m`; `matrix()` recovers the `k×m` matrix `A`.
///
/// Errors
/// ------
/// - As for [`coefficient_posterior`]. No random numbers are consumed when
///   validation or factorization fails.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::{array, Array1, Array2};
/// # use rand::SeedableRng;
/// # use rand_xoshiro::Xoshiro256PlusPlus;
/// # use rust_bvar::sampler::draw_coefficients;
/// let y = array![[1.0, 0.5, 0.25]];
/// let x = array![[2.0, 1.0, 0.5]];
/// let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
/// let draw = draw_coefficients(
///     y.view(), x.view(), Array2::eye(1).view(),
///     Array1::zeros(1).view(), Array2::eye(1).view(), &mut rng,
/// ).unwrap();
/// assert_eq!(draw.values().len(), 1);
/// ```
pub fn draw_coefficients<R: Rng + ?Sized>(
    y: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>, sigma_inv: ArrayView2<'_, f64>,
    prior_mean: ArrayView1<'_, f64>, prior_precision: ArrayView2<'_, f64>, rng: &mut R,
) -> BvarResult<CoefficientDraw> {
    let posterior = coefficient_posterior(y, x, sigma_inv, prior_mean, prior_precision)?;
    let values = posterior.draw(rng)?;
    Ok(CoefficientDraw { values, k: y.nrows() })
}

pub(crate) fn draw_from_stats<R: Rng + ?Sized>(
    stats: &ConjugateStats, prior_precision: ArrayView2<'_, f64>, sigma_inv: ArrayView2<'_, f64>,
    k: usize, rng: &mut R,
) -> NumericalResult<CoefficientDraw> {
    let values = stats.posterior(prior_precision, sigma_inv)?.draw(rng)?;
    Ok(CoefficientDraw { values, k })
}

pub(crate) fn standard_normal_vector<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array1<f64> {
    Array1::from_shape_simple_fn(n, || StandardNormal.sample(&mut *rng))
}

fn check_shapes(
    y: ArrayView2<'_, f64>, x: ArrayView2<'_, f64>, sigma_inv: ArrayView2<'_, f64>,
    prior_mean: ArrayView1<'_, f64>, prior_precision: ArrayView2<'_, f64>,
) -> BvarResult<()> {
    let (k, n) = y.dim();
    let m = x.nrows();
    let km = k * m;
    if k == 0 || m == 0 || n == 0 {
        return Err(ConfigError::EmptySeries.into());
    }
    let checks = [
        ("x", (m, n), x.dim()),
        ("Sigma_inv", (k, k), sigma_inv.dim()),
        ("A_mean", (km, 1), (prior_mean.len(), 1)),
        ("A_precision", (km, km), prior_precision.dim()),
    ];
    for (what, expected, actual) in checks {
        if expected != actual {
            return Err(ConfigError::ShapeMismatch { what, expected, actual }.into());
        }
    }
    Ok(())
}
