//! Shock vectors for the three identification schemes.
//!
//! The response of variable `r` at horizon `h` to impulse `j` is
//! `Φ_h[r, :] · s_j`, where the shock vector `s_j` is
//!
//! - `e_j` for forecast-error responses,
//! - `P[:, j]` with `Σ = P Pᵀ` (lower Cholesky) for orthogonalized responses,
//! - `Σ[:, j] / sqrt(Σ_jj)` for generalized responses.
//!
//! Orthogonalized shocks attribute contemporaneous correlation to variables
//! that come earlier in the series: the first variable's shock moves every
//! variable on impact, the last variable's shock moves only itself.
use crate::{
    errors::{NumericalError, NumericalResult},
    irf::request::IrfKind,
    linalg::cholesky_lower,
};
use ndarray::{Array1, ArrayView2};

/// Shock vector `s_j` for impulse `impulse` under `kind`.
///
/// Errors
/// ------
/// - `NumericalError::NotPositiveDefinite` when `Σ` fails the Cholesky
///   factorization (orthogonalized) or has a non-positive variance
///   `Σ_jj` (generalized).
pub fn shock_vector(
    kind: IrfKind, sigma: ArrayView2<'_, f64>, impulse: usize,
) -> NumericalResult<Array1<f64>> {
    let k = sigma.nrows();
    match kind {
        IrfKind::ForecastError => {
            let mut e = Array1::<f64>::zeros(k);
            e[impulse] = 1.0;
            Ok(e)
        }
        IrfKind::Orthogonalized => {
            let p = cholesky_lower(sigma, "Sigma")?;
            Ok(p.column(impulse).to_owned())
        }
        IrfKind::Generalized => {
            let var = sigma[[impulse, impulse]];
            if !(var.is_finite() && var > 0.0) {
                return Err(NumericalError::NotPositiveDefinite { what: "Sigma" });
            }
            Ok(sigma.column(impulse).mapv(|v| v / var.sqrt()))
        }
    }
}
