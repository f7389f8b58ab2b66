//! Gibbs driver — iterate, discard burn-in, thin, store.
//!
//! Purpose
//! -------
//! Run the two-block Gibbs sampler for a Bayesian VAR: each iteration draws
//! `vec(A) | Σ⁻¹, y` and then `Σ⁻¹ | A, y`, and retained iterations are
//! appended to a [`DrawStore`]. A completed chain becomes a [`BvarResults`].
//!
//! Key behaviors
//! -------------
//! - [`GibbsChain`] is an explicit state machine
//!   (`Initializing → BurningIn → Sampling → Done`) owning all mutable state
//!   of one chain: the running `(Σ, Σ⁻¹)`, the RNG and the store. Callers can
//!   advance it one iteration at a time with [`GibbsChain::step`] and
//!   checkpoint between iterations.
//! - [`GibbsSampler`] validates the model once and runs one chain
//!   ([`GibbsSampler::run`]) or several independent chains in parallel
//!   ([`GibbsSampler::run_chains`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Within an iteration the coefficient draw uses the previous iteration's
//!   `Σ⁻¹`; the covariance draw uses residuals from this iteration's `A`.
//! - Burn-in iterations update the running state but store nothing.
//! - Any numerical failure aborts the chain with
//!   [`BvarError::SamplerFailed`]; the stored draws are dropped and the chain
//!   enters the terminal `Failed` phase. Iteration `0` in the error denotes
//!   initialization.
//! - Likelihood values are evaluated only for stored iterations and never
//!   feed back into the chain.
//!
//! Conventions
//! -----------
//! - Iterations are 1-based. Seeds: chain `c` of a sampler seeded with `s`
//!   uses `s + c` (wrapping); an unseeded chain draws a fresh seed and
//!   records it in [`SamplerMetadata`].
//! - Logging goes through `slog`; the default logger discards records unless
//!   `GibbsOptions::verbose` is set.
use crate::{
    data::VarData,
    errors::{BvarError, BvarResult, ConfigError, NumericalResult},
    linalg::SpdFactor,
    results::{BvarResults, MultiChainResults, SamplerMetadata},
    sampler::{
        coefficients::{ConjugateStats, draw_from_stats},
        covariance::{CovarianceDraw, WishartPrior},
        likelihood::log_likelihood_with,
        options::GibbsOptions,
        prior::PriorSpec,
        store::{Draw, DrawStore},
    },
    utils::build_logger,
};
use ndarray::Array2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use slog::{Logger, debug, error, info, o};

/// Lifecycle of a single chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainPhase {
    /// Priors validated; the initial `Σ` has not been fixed yet.
    Initializing,
    BurningIn,
    Sampling,
    Done,
    /// A numerical failure aborted the chain.
    Failed,
}

/// GibbsChain — one chain's mutable state and its transition function.
///
/// Purpose
/// -------
/// Advance a single Gibbs chain one iteration at a time. All state that
/// changes across iterations is owned here, so independent chains can run on
/// different threads without sharing anything mutable.
///
/// Fields
/// ------
/// - `data`, `prior`, `options`: borrowed, immutable inputs.
/// - `stats`: `x xᵀ`, `y xᵀ` and `Q₀ μ₀`, computed once.
/// - `wishart`: prior degrees of freedom and inverted prior scale.
/// - `covariance`: running `(Σ, Σ⁻¹)`; `None` until initialization.
/// - `iteration`: last completed iteration (0 before the first).
/// - `store`: retained draws.
pub struct GibbsChain<'a> {
    data: &'a VarData,
    prior: &'a PriorSpec,
    options: &'a GibbsOptions,
    chain: usize,
    seed: u64,
    stats: ConjugateStats,
    wishart: WishartPrior,
    covariance: Option<CovarianceDraw>,
    iteration: usize,
    phase: ChainPhase,
    store: DrawStore,
    rng: Xoshiro256PlusPlus,
    logger: Logger,
}

impl<'a> GibbsChain<'a> {
    /// Validate inputs and prepare a chain in the `Initializing` phase.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&VarData`
    /// - `prior`: `&PriorSpec`
    ///   Checked against `k` and `m` of `data`.
    /// - `options`: `&GibbsOptions`
    /// - `chain`: `usize`
    ///   Chain index, used for seeding, logging and error reports.
    /// - `logger`: `Logger`
    ///
    /// Errors
    /// ------
    /// - `BvarError::Configuration` for prior or initial-`Σ` shape problems.
    /// - `BvarError::SamplerFailed { iteration: 0, .. }` when the prior scale
    ///   is not positive-definite. No random numbers are drawn in either case.
    pub fn new(
        data: &'a VarData, prior: &'a PriorSpec, options: &'a GibbsOptions, chain: usize,
        logger: Logger,
    ) -> BvarResult<GibbsChain<'a>> {
        check_model(data, prior, options)?;
        let wishart = WishartPrior::new(prior.sigma_df, prior.sigma_scale.view())
            .map_err(|source| BvarError::SamplerFailed { chain, iteration: 0, source })?;
        let stats = ConjugateStats::new(
            data.y().view(),
            data.x().view(),
            prior.a_mean.view(),
            prior.a_precision.view(),
        );
        let seed = options.seed.map(|s| s.wrapping_add(chain as u64)).unwrap_or_else(rand::random);
        Ok(GibbsChain {
            data,
            prior,
            options,
            chain,
            seed,
            stats,
            wishart,
            covariance: None,
            iteration: 0,
            phase: ChainPhase::Initializing,
            store: DrawStore::with_capacity(options.n_retained()),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            logger: logger.new(o!("chain" => chain)),
        })
    }

    pub fn phase(&self) -> ChainPhase {
        self.phase
    }

    /// Last completed iteration (0 before the first).
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws retained so far.
    pub fn draws(&self) -> &DrawStore {
        &self.store
    }

    /// Running `(Σ, Σ⁻¹)`, available once initialization has completed.
    pub fn current_covariance(&self) -> Option<&CovarianceDraw> {
        self.covariance.as_ref()
    }

    /// Perform one transition and return the new phase.
    ///
    /// - `Initializing`: fix the initial `Σ` (caller-supplied or drawn from
    ///   the Wishart prior).
    /// - `BurningIn` / `Sampling`: run one Gibbs iteration.
    /// - `Done` / `Failed`: no-op.
    ///
    /// Errors
    /// ------
    /// - `BvarError::SamplerFailed` carrying the chain index and the
    ///   iteration that failed; the chain moves to `Failed` and its draws are
    ///   discarded.
    pub fn step(&mut self) -> BvarResult<ChainPhase> {
        let next = match (self.phase, self.covariance.take()) {
            (ChainPhase::Done | ChainPhase::Failed, current) => {
                self.covariance = current;
                return Ok(self.phase);
            }
            (ChainPhase::Initializing, _) | (_, None) => self.initialize(),
            (_, Some(current)) => self.iterate(current),
        };
        match next {
            Ok(covariance) => {
                self.covariance = Some(covariance);
                self.advance_phase();
                Ok(self.phase)
            }
            Err(source) => {
                let iteration = if self.phase == ChainPhase::Initializing {
                    0
                } else {
                    self.iteration + 1
                };
                error!(self.logger, "gibbs chain failed"; "iteration" => iteration, "error" => %source);
                self.phase = ChainPhase::Failed;
                self.store = DrawStore::new();
                Err(BvarError::SamplerFailed { chain: self.chain, iteration, source })
            }
        }
    }

    /// Drive the chain to `Done` and package the stored draws.
    ///
    /// Errors
    /// ------
    /// - The first error returned by [`GibbsChain::step`]; no partial
    ///   results are produced.
    pub fn run(mut self) -> BvarResult<BvarResults> {
        while self.step()? != ChainPhase::Done {}
        let metadata = SamplerMetadata {
            iterations: self.options.iterations,
            burnin: self.options.burnin,
            thin: self.options.thin,
            seed: self.seed,
            chain: self.chain,
        };
        BvarResults::new(self.data.clone(), self.store, metadata)
    }

    fn initialize(&mut self) -> NumericalResult<CovarianceDraw> {
        let k = self.data.n_vars();
        info!(
            self.logger, "gibbs chain started";
            "k" => k,
            "m" => self.data.n_regressors(),
            "n" => self.data.n_obs(),
            "iterations" => self.options.iterations,
            "burnin" => self.options.burnin,
            "thin" => self.options.thin,
            "seed" => self.seed
        );
        match &self.options.initial_sigma {
            Some(sigma) => CovarianceDraw::spd_pair(sigma.clone(), "initial Sigma"),
            None => self.wishart.draw(Array2::<f64>::zeros((k, 0)).view(), &mut self.rng),
        }
    }

    fn iterate(&mut self, current: CovarianceDraw) -> NumericalResult<CovarianceDraw> {
        let i = self.iteration + 1;
        let (y, x) = (self.data.y(), self.data.x());

        let coefficients = draw_from_stats(
            &self.stats,
            self.prior.a_precision.view(),
            current.sigma_inv().view(),
            self.data.n_vars(),
            &mut self.rng,
        )?;
        let residuals = y - &coefficients.matrix().dot(x);
        let covariance = self.wishart.draw(residuals.view(), &mut self.rng)?;

        if self.options.is_retained(i) {
            let log_likelihood = if self.options.track_likelihood {
                let log_det = SpdFactor::new(covariance.sigma().view(), "Sigma")?.log_det();
                Some(log_likelihood_with(residuals.view(), log_det, covariance.sigma_inv().view()))
            } else {
                None
            };
            self.store.push(Draw { coefficients, covariance: covariance.clone(), log_likelihood });
        }
        Ok(covariance)
    }

    fn advance_phase(&mut self) {
        let (iterations, burnin) = (self.options.iterations, self.options.burnin);
        if self.phase != ChainPhase::Initializing {
            self.iteration += 1;
        }
        let i = self.iteration;
        let report_every = (iterations / 10).max(1);
        if i > 0 && i % report_every == 0 && i < iterations {
            debug!(self.logger, "gibbs progress"; "iteration" => i, "stored" => self.store.len());
        }
        self.phase = if i >= iterations {
            info!(self.logger, "gibbs chain finished"; "stored" => self.store.len());
            ChainPhase::Done
        } else if i >= burnin {
            if i == burnin && burnin > 0 {
                info!(self.logger, "burn-in complete"; "iteration" => i);
            }
            ChainPhase::Sampling
        } else {
            ChainPhase::BurningIn
        };
    }
}

/// GibbsSampler — validated model plus run configuration.
///
/// Purpose
/// -------
/// Own the data, prior and options of an estimation run and hand out
/// independent [`GibbsChain`]s.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::{array, Array2};
/// # use rust_bvar::data::{Deterministic, TimeSeriesMatrix, VarData};
/// # use rust_bvar::sampler::{GibbsOptions, GibbsSampler, PriorSpec};
/// let series = TimeSeriesMatrix::new(
///     array![[0.1, 0.3], [0.4, 0.2], [0.2, 0.5], [0.6, 0.1], [0.3, 0.4], [0.5, 0.2]],
///     None,
/// ).unwrap();
/// let data = VarData::new(&series, 1, Deterministic::Constant).unwrap();
/// let prior = PriorSpec::normal_wishart(2, 3, 0.1, 4.0, Array2::eye(2)).unwrap();
/// let options = GibbsOptions::new(50, 10).unwrap().with_seed(1);
/// let results = GibbsSampler::new(data, prior, options).unwrap().run().unwrap();
/// assert_eq!(results.n_draws(), 40);
/// ```
pub struct GibbsSampler {
    data: VarData,
    prior: PriorSpec,
    options: GibbsOptions,
    logger: Logger,
}

impl GibbsSampler {
    /// Validate the prior and options against `data`.
    ///
    /// Errors
    /// ------
    /// - `BvarError::Configuration` for any dimension, symmetry or
    ///   degrees-of-freedom problem.
    pub fn new(data: VarData, prior: PriorSpec, options: GibbsOptions) -> BvarResult<GibbsSampler> {
        check_model(&data, &prior, &options)?;
        let logger = build_logger(options.verbose);
        Ok(GibbsSampler { data, prior, options, logger })
    }

    /// Replace the logger built from `options.verbose`.
    pub fn with_logger(mut self, logger: Logger) -> GibbsSampler {
        self.logger = logger;
        self
    }

    pub fn data(&self) -> &VarData {
        &self.data
    }

    pub fn prior(&self) -> &PriorSpec {
        &self.prior
    }

    pub fn options(&self) -> &GibbsOptions {
        &self.options
    }

    /// A fresh chain with index `index`.
    pub fn chain(&self, index: usize) -> BvarResult<GibbsChain<'_>> {
        GibbsChain::new(&self.data, &self.prior, &self.options, index, self.logger.clone())
    }

    /// Run chain 0 to completion.
    pub fn run(&self) -> BvarResult<BvarResults> {
        self.chain(0)?.run()
    }

    /// Run `chains` independent chains in parallel.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidChainCount` when `chains == 0`.
    /// - The error of a failing chain; all results are discarded.
    pub fn run_chains(&self, chains: usize) -> BvarResult<MultiChainResults> {
        if chains == 0 {
            return Err(ConfigError::InvalidChainCount { chains }.into());
        }
        let results = (0..chains)
            .into_par_iter()
            .map(|index| self.chain(index).and_then(GibbsChain::run))
            .collect::<BvarResult<Vec<_>>>()?;
        MultiChainResults::new(results)
    }
}

fn check_model(data: &VarData, prior: &PriorSpec, options: &GibbsOptions) -> BvarResult<()> {
    let k = data.n_vars();
    prior.validate(k, data.n_regressors())?;
    if let Some(sigma) = &options.initial_sigma {
        if sigma.dim() != (k, k) {
            return Err(ConfigError::ShapeMismatch {
                what: "initial Sigma",
                expected: (k, k),
                actual: sigma.dim(),
            }
            .into());
        }
    }
    if options.iterations <= options.burnin {
        return Err(ConfigError::InvalidIterations {
            iterations: options.iterations,
            burnin: options.burnin,
        }
        .into());
    }
    if options.thin == 0 {
        return Err(ConfigError::InvalidThin { thin: 0 }.into());
    }
    Ok(())
}
