//! Conditional posterior of the innovation covariance given the residuals.
//!
//! Purpose
//! -------
//! Implement the covariance half of the Gibbs step. With a Wishart prior
//! `Σ⁻¹ ~ W(S₀, ν₀)` and residuals `R` (`k×n`), the conditional posterior is
//! `Σ⁻¹ ~ W((S₀⁻¹ + R Rᵀ)⁻¹, ν₀ + n)`. The precision is drawn first and then
//! inverted to obtain `Σ`; both are returned together.
//!
//! Key behaviors
//! -------------
//! - [`draw_covariance`] validates shapes and degrees of freedom, factors the
//!   prior scale (failing before any random number is drawn), and samples.
//! - Wishart draws use the Bartlett decomposition: with `S = L Lᵀ`,
//!   `W = (L B)(L B)ᵀ` where `B` is lower-triangular, `B_ii² ~ χ²(ν − i)` and
//!   `B_ij ~ N(0, 1)` below the diagonal.
//! - `Σ` and `Σ⁻¹` are symmetrized before they are returned.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ν ≥ k`, so every chi-squared parameter `ν − i` (`i = 0..k`) is at least
//!   one.
//! - `Σ · Σ⁻¹ = I` up to floating-point error.
use crate::{
    errors::{BvarResult, ConfigError, NumericalError, NumericalResult},
    linalg::{SpdFactor, invert_spd, symmetrize, tcrossprod},
};
use ndarray::{Array2, ArrayView2};
use rand::Rng;
use rand_distr::{ChiSquared, Distribution, StandardNormal};

/// CovarianceDraw — innovation covariance `Σ` with its inverse.
///
/// Invariants
/// ----------
/// - Both matrices are `k×k`. Draws produced by the sampler are symmetric
///   positive-definite and mutually inverse; values wrapped with
///   [`CovarianceDraw::new`] are only shape-checked, and downstream
///   factorizations report any loss of definiteness.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceDraw {
    sigma: Array2<f64>,
    sigma_inv: Array2<f64>,
}

impl CovarianceDraw {
    /// Wrap a `(Σ, Σ⁻¹)` pair without re-deriving either.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::ShapeMismatch` unless both are square of equal size.
    pub fn new(sigma: Array2<f64>, sigma_inv: Array2<f64>) -> BvarResult<CovarianceDraw> {
        let k = sigma.nrows();
        if sigma.ncols() != k {
            return Err(ConfigError::ShapeMismatch {
                what: "Sigma",
                expected: (k, k),
                actual: sigma.dim(),
            }
            .into());
        }
        if sigma_inv.dim() != (k, k) {
            return Err(ConfigError::ShapeMismatch {
                what: "Sigma_inv",
                expected: (k, k),
                actual: sigma_inv.dim(),
            }
            .into());
        }
        Ok(CovarianceDraw { sigma, sigma_inv })
    }

    /// Build the pair from `Σ` alone by inverting it.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::ShapeMismatch` for a non-square input.
    /// - `NumericalError::NotPositiveDefinite` (wrapped) when `Σ` is not SPD.
    pub fn from_sigma(sigma: Array2<f64>) -> BvarResult<CovarianceDraw> {
        if sigma.nrows() != sigma.ncols() {
            return Err(ConfigError::ShapeMismatch {
                what: "Sigma",
                expected: (sigma.nrows(), sigma.nrows()),
                actual: sigma.dim(),
            }
            .into());
        }
        Ok(CovarianceDraw::spd_pair(sigma, "Sigma")?)
    }

    /// Invert an SPD `Σ` and pair it with its inverse.
    pub(crate) fn spd_pair(sigma: Array2<f64>, what: &'static str) -> NumericalResult<CovarianceDraw> {
        let sigma_inv = invert_spd(sigma.view(), what)?;
        Ok(CovarianceDraw { sigma, sigma_inv })
    }

    pub fn sigma(&self) -> &Array2<f64> {
        &self.sigma
    }

    pub fn sigma_inv(&self) -> &Array2<f64> {
        &self.sigma_inv
    }

    pub fn n_vars(&self) -> usize {
        self.sigma.nrows()
    }
}

/// Wishart prior on `Σ⁻¹` with the prior scale already inverted.
#[derive(Debug, Clone)]
pub(crate) struct WishartPrior {
    df: f64,
    scale_inv: Array2<f64>,
}

impl WishartPrior {
    /// Errors
    /// ------
    /// - `NumericalError::NotPositiveDefinite` when `scale` is not SPD.
    pub(crate) fn new(df: f64, scale: ArrayView2<'_, f64>) -> NumericalResult<WishartPrior> {
        let scale_inv = invert_spd(scale, "prior scale")?;
        Ok(WishartPrior { df, scale_inv })
    }

    /// Draw `(Σ, Σ⁻¹)` given residuals (`k×n`, `n` may be zero).
    pub(crate) fn draw<R: Rng + ?Sized>(
        &self, residuals: ArrayView2<'_, f64>, rng: &mut R,
    ) -> NumericalResult<CovarianceDraw> {
        let mut post_scale_inv = tcrossprod(residuals);
        post_scale_inv += &self.scale_inv;
        symmetrize(&mut post_scale_inv);
        let post_scale = invert_spd(post_scale_inv.view(), "posterior scale")?;
        let df = self.df + residuals.ncols() as f64;

        let factor = SpdFactor::new(post_scale.view(), "posterior scale")?;
        let mut sigma_inv = sample_wishart(&factor, df, rng)?;
        symmetrize(&mut sigma_inv);
        let sigma = invert_spd(sigma_inv.view(), "Sigma")?;
        Ok(CovarianceDraw { sigma, sigma_inv })
    }
}

/// Draw one innovation covariance from its conditional posterior.
///
/// Parameters
/// ----------
/// - `residuals`: `ArrayView2<f64>`
///   `k×n` residual matrix `y − A x` (`n = 0` samples from the prior).
/// - `prior_df`: `f64`
///   Prior degrees of freedom, finite and at least `k`.
/// - `prior_scale`: `ArrayView2<f64>`
///   `k×k` SPD prior scale.
/// - `rng`: random source.
///
/// Returns
/// -------
/// `BvarResult<CovarianceDraw>`
///   Symmetric `Σ` and `Σ⁻¹`.
///
/// Errors
/// ------
/// - `ConfigError::ShapeMismatch` / `InvalidDegreesOfFreedom` for bad inputs.
/// - `NumericalError::NotPositiveDefinite` (wrapped) when `prior_scale` is
///   not SPD; raised before any random number is drawn.
/// - `NumericalError::InvalidDistribution` / `NotPositiveDefinite` if the
///   draw itself degenerates.
pub fn draw_covariance<R: Rng + ?Sized>(
    residuals: ArrayView2<'_, f64>, prior_df: f64, prior_scale: ArrayView2<'_, f64>, rng: &mut R,
) -> BvarResult<CovarianceDraw> {
    let k = residuals.nrows();
    if k == 0 {
        return Err(ConfigError::EmptySeries.into());
    }
    if prior_scale.dim() != (k, k) {
        return Err(ConfigError::ShapeMismatch {
            what: "Sigma_scale",
            expected: (k, k),
            actual: prior_scale.dim(),
        }
        .into());
    }
    if !prior_df.is_finite() || prior_df < k as f64 {
        return Err(ConfigError::InvalidDegreesOfFreedom { df: prior_df, k }.into());
    }
    let prior = WishartPrior::new(prior_df, prior_scale)?;
    Ok(prior.draw(residuals, rng)?)
}

/// Bartlett draw from `W(L Lᵀ, df)`.
fn sample_wishart<R: Rng + ?Sized>(
    scale: &SpdFactor, df: f64, rng: &mut R,
) -> NumericalResult<Array2<f64>> {
    let k = scale.dim();
    let mut b = Array2::<f64>::zeros((k, k));
    for i in 0..k {
        let nu = df - i as f64;
        let chi = ChiSquared::new(nu)
            .map_err(|_| NumericalError::InvalidDistribution { what: "Wishart diagonal", df: nu })?;
        b[[i, i]] = chi.sample(&mut *rng).sqrt();
        for j in 0..i {
            b[[i, j]] = StandardNormal.sample(&mut *rng);
        }
    }
    let lb = scale.lower().dot(&b);
    let w = lb.dot(&lb.t());
    if w.iter().any(|v| !v.is_finite()) {
        return Err(NumericalError::NonFiniteResult { what: "Wishart draw" });
    }
    Ok(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BvarError;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Symmetry, definiteness and mutual inversion of draws.
    // - The Wishart mean `E[Σ⁻¹] = ν S` under the posterior update.
    // - Failure on a non-SPD prior scale before any randomness is consumed.
    // -------------------------------------------------------------------------

    fn residuals() -> Array2<f64> {
        array![[0.5, -0.3, 0.8, -1.1, 0.2], [0.1, 0.4, -0.6, 0.3, -0.2]]
    }

    #[test]
    // Purpose
    // -------
    // Verify the structural guarantees of a single draw.
    //
    // Given
    // -----
    // - 2×5 residuals, ν₀ = 4, S₀ = I.
    //
    // Expect
    // ------
    // - Σ and Σ⁻¹ exactly symmetric, Σ SPD, Σ·Σ⁻¹ ≈ I, and inverting Σ⁻¹
    //   again reproduces Σ.
    fn draw_is_symmetric_pd_and_mutually_inverse() {
        // Arrange
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let r = residuals();

        // Act
        let draw = draw_covariance(r.view(), 4.0, Array2::eye(2).view(), &mut rng).unwrap();

        // Assert
        let (s, si) = (draw.sigma(), draw.sigma_inv());
        assert_eq!(s[[0, 1]], s[[1, 0]]);
        assert_eq!(si[[0, 1]], si[[1, 0]]);
        assert!(SpdFactor::new(s.view(), "sigma").is_ok());
        let ident = s.dot(si);
        let round_trip = invert_spd(si.view(), "sigma_inv").unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(ident[[i, j]], expected, epsilon = 1e-10);
                assert_relative_eq!(round_trip[[i, j]], s[[i, j]], max_relative = 1e-10);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check the posterior parameters through the Wishart mean.
    //
    // Given
    // -----
    // - Residuals R, ν₀ = 3, S₀ = diag(0.5, 2); 20 000 draws.
    //
    // Expect
    // ------
    // - Average Σ⁻¹ ≈ (ν₀ + n)(S₀⁻¹ + R Rᵀ)⁻¹ within 3% per entry scale.
    fn draws_match_wishart_posterior_mean() {
        // Arrange
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let r = residuals();
        let scale = array![[0.5, 0.0], [0.0, 2.0]];
        let post_scale_inv = tcrossprod(r.view()) + &array![[2.0, 0.0], [0.0, 0.5]];
        let expected = invert_spd(post_scale_inv.view(), "s").unwrap() * (3.0 + 5.0);
        let n_draws = 20_000;

        // Act
        let mut acc = Array2::<f64>::zeros((2, 2));
        for _ in 0..n_draws {
            let d = draw_covariance(r.view(), 3.0, scale.view(), &mut rng).unwrap();
            acc += d.sigma_inv();
        }
        acc /= n_draws as f64;

        // Assert
        let tol = 0.03 * (expected[[0, 0]] * expected[[1, 1]]).sqrt();
        for i in 0..2 {
            for j in 0..2 {
                assert!((acc[[i, j]] - expected[[i, j]]).abs() < tol, "entry ({i}, {j})");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // A non-SPD prior scale fails numerically and leaves the RNG untouched.
    //
    // Given
    // -----
    // - An indefinite 2×2 scale and a seeded RNG; a clone of the RNG.
    //
    // Expect
    // ------
    // - `Numerical(NotPositiveDefinite)`; the next number from the RNG equals
    //   the clone's next number.
    fn non_pd_scale_fails_before_sampling() {
        // Arrange
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut twin = rng.clone();
        let bad = array![[1.0, 2.0], [2.0, 1.0]];

        // Act
        let err = draw_covariance(residuals().view(), 4.0, bad.view(), &mut rng).unwrap_err();

        // Assert
        assert_eq!(
            err,
            BvarError::Numerical(NumericalError::NotPositiveDefinite { what: "prior scale" })
        );
        assert_eq!(rng.gen::<u64>(), twin.gen::<u64>());
    }

    #[test]
    fn draw_covariance_rejects_low_df_and_bad_shapes() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let r = residuals();
        assert!(matches!(
            draw_covariance(r.view(), 1.5, Array2::eye(2).view(), &mut rng).unwrap_err(),
            BvarError::Configuration(ConfigError::InvalidDegreesOfFreedom { .. })
        ));
        assert!(matches!(
            draw_covariance(r.view(), 4.0, Array2::eye(3).view(), &mut rng).unwrap_err(),
            BvarError::Configuration(ConfigError::ShapeMismatch { .. })
        ));
        assert!(CovarianceDraw::new(Array2::eye(2), Array2::eye(3)).is_err());
    }
}
