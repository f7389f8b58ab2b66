//! Forecast-error variance decomposition from orthogonalized shocks.
use crate::{
    errors::{BvarError, BvarResult},
    irf::{request::VariableRef, wold::wold_coefficients},
    linalg::cholesky_lower,
    results::BvarResults,
};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Share of the forecast-error variance of `response` due to each shock.
///
/// Parameters
/// ----------
/// - `results`: `&BvarResults`
/// - `response`: variable name or index.
/// - `horizon`: `usize`
///   Last Wold horizon `n`; row `h` describes the `(h + 1)`-step-ahead
///   forecast error, which accumulates `Φ_0, …, Φ_h`.
///
/// Returns
/// -------
/// `BvarResult<Array2<f64>>`
///   `(horizon + 1) × k`; entry `(h, j)` is the posterior-mean share of
///   shock `j` (Cholesky ordering of the series), computed per draw as
///   `Σ_{i≤h} (Φ_i P)[r, j]² / Σ_{i≤h} (Φ_i Σ Φ_iᵀ)[r, r]`. Each row sums to
///   one.
///
/// Errors
/// ------
/// - `ConfigError::UnknownVariable` / `VariableIndexOutOfRange`.
/// - `BvarError::ImpulseResponseFailed` when a draw's `Σ` is not
///   positive-definite (`horizon: None`) or its Wold coefficients overflow.
pub fn forecast_error_variance_decomposition(
    results: &BvarResults, response: impl Into<VariableRef>, horizon: usize,
) -> BvarResult<Array2<f64>> {
    let r = response.into().resolve(results)?;
    let k = results.data().n_vars();
    let p = results.data().lags();

    let per_draw = results
        .draws()
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(index, draw)| {
            let fail = |horizon, source| BvarError::ImpulseResponseFailed { draw: index, horizon, source };
            let chol = cholesky_lower(draw.covariance.sigma().view(), "Sigma")
                .map_err(|err| fail(None, err))?;
            let a = draw.coefficients.matrix();
            let phis = wold_coefficients(a.view(), p, horizon).map_err(|(h, err)| fail(Some(h), err))?;

            let mut shares = Array2::<f64>::zeros((horizon + 1, k));
            let mut acc = Array1::<f64>::zeros(k);
            for (h, phi) in phis.iter().enumerate() {
                let theta = phi.row(r).dot(&chol);
                acc += &theta.mapv(|v| v * v);
                let total = acc.sum();
                shares.row_mut(h).assign(&(&acc / total));
            }
            Ok(shares)
        })
        .collect::<BvarResult<Vec<_>>>()?;

    let mut mean = Array2::<f64>::zeros((horizon + 1, k));
    for shares in &per_draw {
        mean += shares;
    }
    Ok(mean / per_draw.len() as f64)
}
