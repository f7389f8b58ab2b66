//! linalg — matrix kernels shared by the samplers and the IRF engine.
//!
//! Purpose
//! -------
//! Collect the small set of dense linear-algebra routines the estimation code
//! relies on: Cholesky factorization, inversion of symmetric positive-definite
//! (SPD) matrices, symmetrization, and Kronecker / cross products. Arrays are
//! `ndarray` types throughout the public API; factorizations run on
//! `nalgebra` through a copy bridge.
//!
//! Key behaviors
//! -------------
//! - [`SpdFactor`] wraps a Cholesky factorization and exposes the operations
//!   the samplers need (solve, inverse, log-determinant, lower factor,
//!   transposed triangular solve) without re-factoring.
//! - [`invert_spd`] and [`cholesky_lower`] are one-shot conveniences that
//!   fail with [`NumericalError::NotPositiveDefinite`] instead of panicking.
//! - [`symmetrize`] removes floating-point drift from matrices that are
//!   symmetric in exact arithmetic.
//! - [`kron`] and [`tcrossprod`] build the conjugate-update products
//!   `(x xᵀ) ⊗ Σ⁻¹`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs to factorizations are square; only the lower triangle is read by
//!   the Cholesky routine, so callers symmetrize first when drift matters.
//! - Non-finite inputs are rejected before factorization.
//!
//! [`NumericalError::NotPositiveDefinite`]: crate::errors::NumericalError::NotPositiveDefinite

pub mod bridge;
pub mod factor;
pub mod products;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::bridge::{from_dmatrix, from_dvector, to_dmatrix, to_dvector};
pub use self::factor::{SpdFactor, check_symmetric, cholesky_lower, invert_spd, symmetrize};
pub use self::products::{kron, tcrossprod};

pub mod prelude {
    pub use super::factor::{SpdFactor, cholesky_lower, invert_spd, symmetrize};
    pub use super::products::{kron, tcrossprod};
}
