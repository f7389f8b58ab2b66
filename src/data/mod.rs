//! data — validated series and VAR regression matrices.
//!
//! Purpose
//! -------
//! Turn a raw multivariate time series into the `(y, x)` pair the Gibbs
//! sampler consumes. This module owns the only place where raw observations
//! enter the estimation stack, so every downstream component may rely on the
//! invariants established here.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeriesMatrix`] validates a `T×k` panel (rows = time, columns =
//!   variables) and attaches unique variable names.
//! - [`Deterministic`] selects the deterministic rows appended to the
//!   regressors (none, constant, trend, or both).
//! - [`VarData`] builds `y` (`k×n`) and `x` (`m×n`) for a VAR(p), with
//!   `n = T − p` and `m = k·p + d`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All observations are finite; names are unique and there is one per
//!   variable.
//! - `p ≥ 1` and `T > p`, so at least one regression column exists.
//! - Columns of `y` and `x` index the same time point.
//!
//! Conventions
//! -----------
//! - Within a column of `x`, lag blocks come first (`y_{t−1}` in rows
//!   `0..k`, `y_{t−2}` in rows `k..2k`, …), followed by the deterministic
//!   rows. Coefficient matrices `A` (`k×m`) share this column ordering, which
//!   the IRF engine relies on when it reads the lag blocks `A_1, …, A_p`.
//! - The trend counts `1..=n` over the effective sample.
//!
//! Testing notes
//! -------------
//! - Unit tests cover validation failures, lag alignment on a hand-checked
//!   series, and the placement of deterministic rows.

pub mod lags;
pub mod series;

pub use self::lags::{Deterministic, VarData};
pub use self::series::TimeSeriesMatrix;

pub mod prelude {
    pub use super::lags::{Deterministic, VarData};
    pub use super::series::TimeSeriesMatrix;
}
