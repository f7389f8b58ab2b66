//! Gibbs options — iteration counts, thinning, seeding and logging.
//!
//! Purpose
//! -------
//! Collect the run-level configuration of a Gibbs chain in one validated
//! carrier so the driver never deals with ad-hoc flags.
//!
//! Conventions
//! -----------
//! - Iterations are numbered `1..=iterations`. Iterations `1..=burnin` are
//!   warm-up; iteration `i > burnin` is stored when
//!   `(i − burnin − 1) % thin == 0`.
//! - With `thin = 1` exactly `iterations − burnin` draws are stored.
use crate::errors::{BvarResult, ConfigError};
use ndarray::Array2;

/// GibbsOptions — validated run configuration.
///
/// Fields
/// ------
/// - `iterations`: total number of Gibbs iterations (`> burnin`).
/// - `burnin`: warm-up iterations whose draws are discarded.
/// - `thin`: keep every `thin`-th post-burn-in draw (`≥ 1`, default 1).
/// - `track_likelihood`: evaluate per-observation log-likelihoods for stored
///   draws (default `true`).
/// - `seed`: RNG seed; `None` draws a fresh seed, which is recorded in the
///   results metadata.
/// - `initial_sigma`: starting `Σ`; `None` draws it from the Wishart prior.
/// - `verbose`: attach a terminal logger (default `false`).
#[derive(Debug, Clone, PartialEq)]
pub struct GibbsOptions {
    pub iterations: usize,
    pub burnin: usize,
    pub thin: usize,
    pub track_likelihood: bool,
    pub seed: Option<u64>,
    pub initial_sigma: Option<Array2<f64>>,
    pub verbose: bool,
}

impl GibbsOptions {
    /// Create options with the required iteration counts.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidIterations` unless `iterations > burnin`.
    pub fn new(iterations: usize, burnin: usize) -> BvarResult<GibbsOptions> {
        if iterations <= burnin {
            return Err(ConfigError::InvalidIterations { iterations, burnin }.into());
        }
        Ok(GibbsOptions {
            iterations,
            burnin,
            thin: 1,
            track_likelihood: true,
            seed: None,
            initial_sigma: None,
            verbose: false,
        })
    }

    /// Set the thinning interval.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidThin` when `thin == 0`.
    pub fn with_thin(mut self, thin: usize) -> BvarResult<GibbsOptions> {
        if thin == 0 {
            return Err(ConfigError::InvalidThin { thin }.into());
        }
        self.thin = thin;
        Ok(self)
    }

    pub fn with_track_likelihood(mut self, track: bool) -> GibbsOptions {
        self.track_likelihood = track;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> GibbsOptions {
        self.seed = Some(seed);
        self
    }

    /// Start every chain from a fixed `Σ`; its shape is checked against the
    /// model when the sampler is built.
    pub fn with_initial_sigma(mut self, sigma: Array2<f64>) -> GibbsOptions {
        self.initial_sigma = Some(sigma);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> GibbsOptions {
        self.verbose = verbose;
        self
    }

    /// Whether iteration `i` (1-based) is stored.
    pub fn is_retained(&self, iteration: usize) -> bool {
        iteration > self.burnin && (iteration - self.burnin - 1) % self.thin == 0
    }

    /// Number of draws a completed chain stores.
    pub fn n_retained(&self) -> usize {
        (self.iterations - self.burnin - 1) / self.thin + 1
    }
}
