//! irf — impulse responses and variance decompositions from posterior draws.
//!
//! Purpose
//! -------
//! Turn the coefficient and covariance draws held in a
//! [`BvarResults`](crate::results::BvarResults) into dynamic multipliers:
//! response paths to forecast-error, orthogonalized or generalized shocks,
//! summarized across draws, and forecast-error variance shares.
//!
//! Key behaviors
//! -------------
//! - [`wold_coefficients`] derives `Φ_0 = I, Φ_1, …, Φ_n` from the companion
//!   form of each draw.
//! - [`shock_vector`] builds the impulse vector for the chosen
//!   identification scheme.
//! - [`impulse_response`] evaluates an [`IrfRequest`] over every draw in
//!   parallel and reports a point estimate with optional credible bounds.
//! - [`forecast_error_variance_decomposition`] averages per-draw Cholesky
//!   variance shares.
//!
//! Invariants & assumptions
//! ------------------------
//! - Horizon 0 is the contemporaneous effect; every path has `horizon + 1`
//!   entries.
//! - Orthogonalized results depend on the column order of the series; the
//!   first variable is treated as contemporaneously exogenous.
//! - Configuration checks happen before any draw is processed; numerical
//!   failures carry the index of the offending draw.
//!
//! Conventions
//! -----------
//! - Variables are addressed by name or by 0-based index via
//!   [`VariableRef`].
//! - Credible bounds are equal-tailed; `ci_level` is the coverage.

pub mod engine;
pub mod fevd;
pub mod identification;
pub mod request;
pub mod wold;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::engine::{ImpulseResponse, impulse_response};
pub use self::fevd::forecast_error_variance_decomposition;
pub use self::identification::shock_vector;
pub use self::request::{IrfKind, IrfRequest, VariableRef};
pub use self::wold::{companion_matrix, wold_coefficients};

pub mod prelude {
    pub use super::engine::{ImpulseResponse, impulse_response};
    pub use super::fevd::forecast_error_variance_decomposition;
    pub use super::request::{IrfKind, IrfRequest, VariableRef};
}
