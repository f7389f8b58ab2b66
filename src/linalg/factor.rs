//! linalg::factor — Cholesky-based kernels for SPD matrices.
//!
//! Purpose
//! -------
//! Factor symmetric positive-definite matrices once and reuse the factor for
//! every downstream operation a sampler step needs: solving the posterior
//! mean, forming `L⁻ᵀ z` for a multivariate-normal draw, inverting a
//! precision matrix, and evaluating `ln|Σ|`.
//!
//! Key behaviors
//! -------------
//! - [`SpdFactor::new`] rejects non-finite input and reports a failed
//!   factorization as [`NumericalError::NotPositiveDefinite`]; shape checks
//!   belong to the callers, which validate dimensions eagerly.
//! - [`symmetrize`] replaces `A` by `(A + Aᵀ)/2`.
//! - [`check_symmetric`] locates the first asymmetric entry, used by prior
//!   validation.
//!
//! Conventions
//! -----------
//! - "Lower factor" means `L` with `A = L Lᵀ` and positive diagonal.
//! - Every fallible routine takes a `what` label that is carried into the
//!   error so failures name the matrix that broke.
use crate::{
    errors::{NumericalError, NumericalResult},
    linalg::bridge::{from_dmatrix, from_dvector, to_dmatrix, to_dvector},
};
use nalgebra::{Cholesky, Dyn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Relative tolerance used by [`check_symmetric`].
pub const SYMMETRY_TOL: f64 = 1e-8;

/// SpdFactor — Cholesky factorization of an SPD matrix.
///
/// Purpose
/// -------
/// Hold `A = L Lᵀ` so that several solves and derived quantities can be
/// computed from a single factorization.
///
/// Fields
/// ------
/// - `chol`: `nalgebra::Cholesky<f64, Dyn>`
///   Factorization of the `n×n` input.
///
/// Invariants
/// ----------
/// - The factored matrix was finite and numerically positive-definite.
///
/// Notes
/// -----
/// - Only the lower triangle of the input is read; an asymmetric input is
///   silently treated as its lower-triangle reflection.
#[derive(Debug, Clone)]
pub struct SpdFactor {
    chol: Cholesky<f64, Dyn>,
}

impl SpdFactor {
    /// Factor an SPD matrix.
    ///
    /// Parameters
    /// ----------
    /// - `a`: `ArrayView2<f64>`
    ///   Square matrix to factor.
    /// - `what`: `&'static str`
    ///   Label reported on failure (e.g. `"posterior precision"`).
    ///
    /// Returns
    /// -------
    /// `NumericalResult<SpdFactor>`
    ///
    /// Errors
    /// ------
    /// - `NumericalError::NonFiniteResult`
    ///   Any entry of `a` is NaN/±inf.
    /// - `NumericalError::NotPositiveDefinite`
    ///   `a` is not square or the factorization encounters a non-positive pivot.
    pub fn new(a: ArrayView2<'_, f64>, what: &'static str) -> NumericalResult<SpdFactor> {
        if a.nrows() != a.ncols() {
            return Err(NumericalError::NotPositiveDefinite { what });
        }
        if a.iter().any(|v| !v.is_finite()) {
            return Err(NumericalError::NonFiniteResult { what });
        }
        let chol = to_dmatrix(a).cholesky().ok_or(NumericalError::NotPositiveDefinite { what })?;
        // A zero pivot passes nalgebra's check but leaves a singular factor.
        if chol.l_dirty().diagonal().iter().any(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(NumericalError::NotPositiveDefinite { what });
        }
        Ok(SpdFactor { chol })
    }

    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.chol.l_dirty().nrows()
    }

    /// Lower-triangular factor `L` (upper triangle zeroed).
    pub fn lower(&self) -> Array2<f64> {
        from_dmatrix(&self.chol.l())
    }

    /// `A⁻¹`, symmetrized.
    pub fn inverse(&self) -> Array2<f64> {
        let mut inv = from_dmatrix(&self.chol.inverse());
        symmetrize(&mut inv);
        inv
    }

    /// Solve `A x = b`.
    pub fn solve(&self, b: ArrayView1<'_, f64>) -> Array1<f64> {
        from_dvector(&self.chol.solve(&to_dvector(b)))
    }

    /// Solve `Lᵀ x = b`.
    ///
    /// With `A = L Lᵀ` a precision matrix and `b ~ N(0, I)`, the solution has
    /// covariance `L⁻ᵀ L⁻¹ = A⁻¹`; this is how precision-parameterized normal
    /// draws are formed without inverting `A`.
    pub fn solve_upper_transpose(&self, b: ArrayView1<'_, f64>) -> NumericalResult<Array1<f64>> {
        let l = self.chol.l();
        let x = l
            .tr_solve_lower_triangular(&to_dvector(b))
            .ok_or(NumericalError::NotPositiveDefinite { what: "triangular factor" })?;
        Ok(from_dvector(&x))
    }

    /// `ln|A| = 2 Σ ln L_ii`.
    pub fn log_det(&self) -> f64 {
        2.0 * self.chol.l_dirty().diagonal().iter().map(|d| d.ln()).sum::<f64>()
    }
}

/// Lower Cholesky factor `P` with `A = P Pᵀ`.
pub fn cholesky_lower(a: ArrayView2<'_, f64>, what: &'static str) -> NumericalResult<Array2<f64>> {
    Ok(SpdFactor::new(a, what)?.lower())
}

/// Inverse of an SPD matrix through its Cholesky factor.
///
/// Errors
/// ------
/// - `NumericalError::NotPositiveDefinite` / `NonFiniteResult` from
///   [`SpdFactor::new`], or `NonFiniteResult` when the inverse overflows.
pub fn invert_spd(a: ArrayView2<'_, f64>, what: &'static str) -> NumericalResult<Array2<f64>> {
    let inv = SpdFactor::new(a, what)?.inverse();
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(NumericalError::NonFiniteResult { what });
    }
    Ok(inv)
}

/// Replace `a` by `(a + aᵀ) / 2` in place. `a` must be square.
pub fn symmetrize(a: &mut Array2<f64>) {
    let n = a.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = 0.5 * (a[[i, j]] + a[[j, i]]);
            a[[i, j]] = avg;
            a[[j, i]] = avg;
        }
    }
}

/// First `(row, col)` with `|a_ij − a_ji| > tol · max(1, |a_ij|, |a_ji|)`.
pub fn check_symmetric(a: ArrayView2<'_, f64>) -> Option<(usize, usize)> {
    let n = a.nrows();
    for i in 0..n {
        for j in (i + 1)..n {
            let (u, l) = (a[[i, j]], a[[j, i]]);
            let scale = 1.0_f64.max(u.abs()).max(l.abs());
            if (u - l).abs() > SYMMETRY_TOL * scale {
                return Some((i, j));
            }
        }
    }
    None
}
