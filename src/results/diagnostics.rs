//! Multi-chain results and split-R̂ convergence diagnostics.
//!
//! Purpose
//! -------
//! Hold the output of several independent Gibbs chains for the same model and
//! summarize how well they agree. The split potential-scale-reduction factor
//! compares between- and within-chain variance after cutting every chain in
//! half, so that a drifting chain disagrees with itself.
//!
//! Conventions
//! -----------
//! - With `N` draws per chain, each chain contributes halves of `⌊N/2⌋`
//!   draws; when `N` is odd the middle draw is dropped.
//! - For `M` half-chains of length `L` with means `θ̄_j` and sample variances
//!   `s_j²`: `B = L · var(θ̄_j)`, `W = mean(s_j²)`,
//!   `R̂ = sqrt(((L − 1)/L · W + B/L) / W)`.
//! - A parameter with zero within-chain variance gets `R̂ = NaN`.
use crate::{
    errors::{BvarResult, ConfigError},
    results::container::BvarResults,
    sampler::DrawStore,
};
use ndarray::Array1;
use statrs::statistics::Statistics;

/// MultiChainResults — per-chain results for one model, in chain order.
///
/// Invariants
/// ----------
/// - At least one chain.
/// - All chains share `k`, `m` and the number of stored draws.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiChainResults {
    chains: Vec<BvarResults>,
}

impl MultiChainResults {
    /// Errors
    /// ------
    /// - `ConfigError::InvalidChainCount` for an empty vector.
    /// - `ConfigError::IncompatibleChains` when dimensions or draw counts
    ///   differ.
    pub fn new(chains: Vec<BvarResults>) -> BvarResult<MultiChainResults> {
        let first = chains.first().ok_or(ConfigError::InvalidChainCount { chains: 0 })?;
        let dims = |r: &BvarResults| (r.data().n_vars(), r.data().n_regressors());
        for other in &chains[1..] {
            if dims(other) != dims(first) {
                return Err(ConfigError::IncompatibleChains { reason: "model dimensions differ" }
                    .into());
            }
            if other.n_draws() != first.n_draws() {
                return Err(ConfigError::IncompatibleChains { reason: "draw counts differ" }.into());
            }
        }
        Ok(MultiChainResults { chains })
    }

    pub fn chains(&self) -> &[BvarResults] {
        &self.chains
    }

    pub fn n_chains(&self) -> usize {
        self.chains.len()
    }

    /// Split R̂ for every element of `vec(A)`.
    ///
    /// Returns
    /// -------
    /// `BvarResult<Array1<f64>>`
    ///   Length `k·m`, in the stacking order of the coefficient draws. Values
    ///   close to 1 indicate agreement between (half-)chains. A parameter
    ///   that never moves within any half-chain gets `1.0` when all halves
    ///   sit at the same value and `+inf` when they are stuck at different
    ///   values.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InsufficientDraws` when chains hold fewer than 4
    ///   draws.
    pub fn split_rhat(&self) -> BvarResult<Array1<f64>> {
        let n_draws = self.chains[0].n_draws();
        if n_draws < 4 {
            return Err(ConfigError::InsufficientDraws { required: 4, actual: n_draws }.into());
        }
        let n_params = self.chains[0].data().n_vars() * self.chains[0].data().n_regressors();
        let rhat = (0..n_params)
            .map(|p| {
                let traces: Vec<Vec<f64>> = self
                    .chains
                    .iter()
                    .map(|c| c.draws().iter().map(|d| d.coefficients.values()[p]).collect())
                    .collect();
                split_potential_scale_reduction(&traces)
            })
            .collect();
        Ok(rhat)
    }

    /// Concatenate all chains' draws into one container, in chain order.
    ///
    /// The metadata of chain 0 is kept.
    pub fn pooled(&self) -> BvarResult<BvarResults> {
        let first = &self.chains[0];
        let mut draws = DrawStore::with_capacity(first.n_draws() * self.n_chains());
        for chain in &self.chains {
            draws.extend(chain.draws().clone());
        }
        BvarResults::new(first.data().clone(), draws, *first.metadata())
    }
}

fn split_potential_scale_reduction(traces: &[Vec<f64>]) -> f64 {
    let halves: Vec<&[f64]> = traces
        .iter()
        .flat_map(|t| {
            let half = t.len() / 2;
            [&t[..half], &t[t.len() - half..]]
        })
        .collect();
    let len = halves[0].len() as f64;
    let means: Vec<f64> = halves.iter().map(|h| h.iter().mean()).collect();
    let within = halves.iter().map(|h| h.iter().variance()).mean();
    let between = len * means.iter().variance();
    if within == 0.0 {
        return if between == 0.0 { 1.0 } else { f64::INFINITY };
    }
    let pooled = (len - 1.0) / len * within + between / len;
    (pooled / within).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Deterministic, TimeSeriesMatrix, VarData},
        errors::BvarError,
        results::SamplerMetadata,
        sampler::{CoefficientDraw, CovarianceDraw},
    };
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Split R̂ on hand-made traces (agreeing vs drifting chains).
    // - Odd-length splitting and pooling order.
    // - Compatibility checks between chains.
    // -------------------------------------------------------------------------

    fn results_from_trace(trace: &[f64], chain: usize) -> BvarResults {
        let series = TimeSeriesMatrix::new(array![[1.0], [2.0], [1.5]], None).unwrap();
        let data = VarData::new(&series, 1, Deterministic::None).unwrap();
        let coefs = trace
            .iter()
            .map(|&v| CoefficientDraw::new(array![v], 1).unwrap())
            .collect();
        let covs = trace.iter().map(|_| CovarianceDraw::from_sigma(Array2::eye(1)).unwrap()).collect();
        let meta = SamplerMetadata { iterations: trace.len(), burnin: 0, thin: 1, seed: 0, chain };
        BvarResults::from_parts(data, coefs, covs, meta).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Check split R̂ against a hand computation.
    //
    // Given
    // -----
    // - Two chains [1, 2, 3, 4] and [2, 3, 4, 5]; halves [1,2], [3,4],
    //   [2,3], [4,5] with means 1.5, 3.5, 2.5, 4.5 and variances 0.5.
    //
    // Expect
    // ------
    // - W = 0.5, B = 2 · var(1.5, 3.5, 2.5, 4.5) = 2 · 5/3,
    //   R̂ = sqrt((0.5·0.5 + B/2) / 0.5).
    fn split_rhat_matches_hand_computation() {
        // Arrange
        let multi = MultiChainResults::new(vec![
            results_from_trace(&[1.0, 2.0, 3.0, 4.0], 0),
            results_from_trace(&[2.0, 3.0, 4.0, 5.0], 1),
        ])
        .unwrap();

        // Act
        let rhat = multi.split_rhat().unwrap();

        // Assert
        let b = 2.0 * 5.0 / 3.0;
        let expected = ((0.5 * 0.5 + b / 2.0) / 0.5_f64).sqrt();
        assert_eq!(rhat.len(), 1);
        assert_relative_eq!(rhat[0], expected, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Well-mixed chains give R̂ ≈ 1; odd lengths drop the middle draw.
    //
    // Given
    // -----
    // - Two identical alternating traces of length 9.
    //
    // Expect
    // ------
    // - Halves [1,-1,1,-1] and [-1,1,-1,1] have equal means, so R̂ is
    //   sqrt((L−1)/L) < 1 exactly.
    fn split_rhat_drops_middle_of_odd_chains() {
        let trace = [1.0, -1.0, 1.0, -1.0, 7.0, -1.0, 1.0, -1.0, 1.0];
        let multi = MultiChainResults::new(vec![
            results_from_trace(&trace, 0),
            results_from_trace(&trace, 1),
        ])
        .unwrap();
        let rhat = multi.split_rhat().unwrap();
        assert_relative_eq!(rhat[0], (3.0_f64 / 4.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Zero within-chain variance yields a defined R̂.
    //
    // Given
    // -----
    // - Two chains frozen at 0.25, then two chains frozen at 0.25 and 0.75.
    //
    // Expect
    // ------
    // - R̂ = 1 for the common value and +inf for the disagreeing chains;
    //   never NaN.
    fn split_rhat_handles_constant_traces() {
        let same = MultiChainResults::new(vec![
            results_from_trace(&[0.25; 6], 0),
            results_from_trace(&[0.25; 6], 1),
        ])
        .unwrap();
        let apart = MultiChainResults::new(vec![
            results_from_trace(&[0.25; 6], 0),
            results_from_trace(&[0.75; 6], 1),
        ])
        .unwrap();

        assert_eq!(same.split_rhat().unwrap()[0], 1.0);
        let rhat = apart.split_rhat().unwrap()[0];
        assert!(rhat.is_infinite() && rhat > 0.0);
    }

    #[test]
    fn pooled_concatenates_in_chain_order() {
        let multi = MultiChainResults::new(vec![
            results_from_trace(&[1.0, 2.0], 0),
            results_from_trace(&[3.0, 4.0], 1),
        ])
        .unwrap();
        let pooled = multi.pooled().unwrap();
        let values: Vec<f64> = pooled.draws().iter().map(|d| d.coefficients.values()[0]).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(
            multi.split_rhat().unwrap_err(),
            BvarError::Configuration(ConfigError::InsufficientDraws { required: 4, actual: 2 })
        ));
    }

    #[test]
    fn incompatible_chains_are_rejected() {
        let err = MultiChainResults::new(vec![
            results_from_trace(&[1.0, 2.0], 0),
            results_from_trace(&[3.0, 4.0, 5.0], 1),
        ])
        .unwrap_err();
        assert!(matches!(err, BvarError::Configuration(ConfigError::IncompatibleChains { .. })));
        assert!(MultiChainResults::new(vec![]).is_err());
    }
}
