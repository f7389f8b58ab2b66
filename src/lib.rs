//! rust_bvar — Bayesian vector autoregressions estimated by Gibbs sampling.
//!
//! Purpose
//! -------
//! Serve as the crate root: estimate a VAR(p) under a conjugate
//! Normal–Wishart prior, keep the posterior draws, and derive impulse
//! responses, variance decompositions and convergence diagnostics from them.
//!
//! Key behaviors
//! -------------
//! - [`data`] turns a `T×k` series into the aligned `(y, x)` lag matrices.
//! - [`sampler`] holds the prior, the two conditional-posterior draws, the
//!   Gaussian log-likelihood and the Gibbs driver (single or multi-chain).
//! - [`results`] stores retained draws and computes split R̂ across chains.
//! - [`irf`] evaluates forecast-error, orthogonalized and generalized
//!   impulse responses with credible bands, plus variance decompositions.
//! - [`linalg`] collects the SPD factorizations and matrix products shared by
//!   the rest of the crate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Public inputs and outputs are `ndarray` types; `nalgebra` is used only
//!   inside [`linalg`] for factorizations.
//! - Coefficient draws are stored as `vec(A)` in column-major order, so
//!   `A[i, j] = a[j·k + i]`.
//! - Every fallible operation returns [`errors::BvarResult`]; configuration
//!   problems are reported before any random number is drawn.
//!
//! Conventions
//! -----------
//! - Time runs along rows of the input series and along columns of the lag
//!   matrices (`y` is `k×n`, `x` is `m×n`).
//! - Variables are addressed by name or by 0-based index.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: `TimeSeriesMatrix` → `VarData` → `PriorSpec` +
//!   `GibbsOptions` → `GibbsSampler::run` → `impulse_response` /
//!   `forecast_error_variance_decomposition`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/integration_bvar_pipeline.rs`
//!   runs the full pipeline on a simulated VAR(1).

pub mod data;
pub mod errors;
pub mod irf;
pub mod linalg;
pub mod results;
pub mod sampler;
pub mod utils;
