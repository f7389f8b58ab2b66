//! Companion form and Wold (moving-average) coefficients of a VAR(p).
//!
//! Purpose
//! -------
//! Turn one coefficient matrix `A = [A_1 … A_p | D]` into the sequence
//! `Φ_0 = I, Φ_1, …, Φ_n` shared by every impulse-response variant.
//!
//! Key behaviors
//! -------------
//! - [`companion_matrix`] stacks the lag blocks into the `kp×kp` operator
//!   `C` that advances `(y_t, …, y_{t−p+1})` by one period. Deterministic
//!   columns of `A` are ignored.
//! - [`wold_coefficients`] iterates `M_h = C M_{h−1}` from `M_0 = Jᵀ`
//!   (identity in the top `k×k` block) and reads `Φ_h` as the top `k×k`
//!   block of `M_h`, i.e. `Φ_h = J Cʰ Jᵀ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The first `k·p` columns of `A` hold the lag blocks in order
//!   (`A_1` in columns `0..k`, `A_2` in `k..2k`, …).
//! - Explosive systems may overflow at long horizons; non-finite
//!   coefficients are reported with the offending horizon.
use crate::errors::{NumericalError, NumericalResult};
use ndarray::{Array2, ArrayView2, s};

/// Companion matrix of a VAR(p).
///
/// Parameters
/// ----------
/// - `a`: `ArrayView2<f64>`
///   `k×m` coefficients with `m ≥ k·p`.
/// - `p`: `usize`
///   Lag order, at least 1.
///
/// Returns
/// -------
/// `Array2<f64>`
///   `kp×kp`: first block row `[A_1 … A_p]`, identity blocks on the first
///   block sub-diagonal, zeros elsewhere.
///
/// Panics
/// ------
/// - If `a` has fewer than `k·p` columns; callers pass validated results.
pub fn companion_matrix(a: ArrayView2<'_, f64>, p: usize) -> Array2<f64> {
    let k = a.nrows();
    let kp = k * p;
    let mut c = Array2::<f64>::zeros((kp, kp));
    c.slice_mut(s![0..k, ..]).assign(&a.slice(s![.., 0..kp]));
    for i in k..kp {
        c[[i, i - k]] = 1.0;
    }
    c
}

/// Wold coefficients `Φ_0, …, Φ_horizon`.
///
/// Returns
/// -------
/// `Result<Vec<Array2<f64>>, (usize, NumericalError)>`
///   `horizon + 1` matrices of shape `k×k`; `Φ_0 = I`.
///
/// Errors
/// ------
/// - `(h, NumericalError::NonFiniteResult)` for the first horizon whose
///   coefficients are not finite.
pub fn wold_coefficients(
    a: ArrayView2<'_, f64>, p: usize, horizon: usize,
) -> Result<Vec<Array2<f64>>, (usize, NumericalError)> {
    let k = a.nrows();
    let c = companion_matrix(a, p);
    let mut state = Array2::<f64>::zeros((k * p, k));
    state.slice_mut(s![0..k, ..]).assign(&Array2::<f64>::eye(k));

    let mut phis = Vec::with_capacity(horizon + 1);
    phis.push(Array2::<f64>::eye(k));
    for h in 1..=horizon {
        state = c.dot(&state);
        let phi = state.slice(s![0..k, ..]).to_owned();
        finite(&phi).map_err(|err| (h, err))?;
        phis.push(phi);
    }
    Ok(phis)
}

fn finite(m: &Array2<f64>) -> NumericalResult<()> {
    if m.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(NumericalError::NonFiniteResult { what: "Wold coefficients" })
    }
}
