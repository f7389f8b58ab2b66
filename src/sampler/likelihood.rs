//! Per-observation Gaussian log-likelihood of VAR residuals.
//!
//! For residual column `u_t` and innovation covariance `Σ`,
//!
//! `ℓ_t = −(k/2) ln(2π) − ½ ln|Σ| − ½ u_tᵀ Σ⁻¹ u_t`.
//!
//! The value is diagnostic only; the Gibbs chain never reads it.
use crate::{
    errors::{BvarResult, ConfigError},
    linalg::SpdFactor,
};
use ndarray::{Array1, ArrayView2, Axis};
use statrs::consts::LN_SQRT_2PI;

/// Evaluate `ℓ_t` for every residual column.
///
/// Parameters
/// ----------
/// - `residuals`: `ArrayView2<f64>`
///   `k×n` residuals; one log-density per column.
/// - `sigma`: `ArrayView2<f64>`
///   `k×k` covariance, used only for `ln|Σ|`.
/// - `sigma_inv`: `ArrayView2<f64>`
///   `k×k` precision, used for the quadratic form so `Σ` is never inverted.
///
/// Returns
/// -------
/// `BvarResult<Array1<f64>>`
///   Exactly `n` values; an empty vector when `n == 0`.
///
/// Errors
/// ------
/// - `ConfigError::ShapeMismatch` when `Σ` or `Σ⁻¹` is not `k×k`.
/// - `NumericalError::NotPositiveDefinite` (wrapped) when `Σ` cannot be
///   factored for its log-determinant.
pub fn log_likelihood(
    residuals: ArrayView2<'_, f64>, sigma: ArrayView2<'_, f64>, sigma_inv: ArrayView2<'_, f64>,
) -> BvarResult<Array1<f64>> {
    let k = residuals.nrows();
    for (what, actual) in [("Sigma", sigma.dim()), ("Sigma_inv", sigma_inv.dim())] {
        if actual != (k, k) {
            return Err(ConfigError::ShapeMismatch { what, expected: (k, k), actual }.into());
        }
    }
    let log_det = SpdFactor::new(sigma, "Sigma")?.log_det();
    Ok(log_likelihood_with(residuals, log_det, sigma_inv))
}

pub(crate) fn log_likelihood_with(
    residuals: ArrayView2<'_, f64>, log_det: f64, sigma_inv: ArrayView2<'_, f64>,
) -> Array1<f64> {
    let k = residuals.nrows() as f64;
    let weighted = sigma_inv.dot(&residuals);
    let quad = (&residuals * &weighted).sum_axis(Axis(0));
    quad.mapv(|q| -0.5 * (2.0 * k * LN_SQRT_2PI + log_det + q))
}
