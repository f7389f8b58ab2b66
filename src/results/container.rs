//! BvarResults — immutable snapshot of a completed Gibbs run.
use crate::{
    data::VarData,
    errors::{BvarResult, ConfigError},
    sampler::{CoefficientDraw, CovarianceDraw, Draw, DrawStore},
};
use ndarray::{Array1, Array2};

/// Run settings recorded alongside the draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerMetadata {
    pub iterations: usize,
    pub burnin: usize,
    pub thin: usize,
    /// Seed actually used by the chain's RNG.
    pub seed: u64,
    /// Chain index within a multi-chain run (0 for single runs).
    pub chain: usize,
}

/// BvarResults — data, retained draws and run metadata.
///
/// Purpose
/// -------
/// Decouple estimation from analysis: the impulse-response engine and the
/// convergence diagnostics read only this container.
///
/// Invariants
/// ----------
/// - At least one draw.
/// - Every coefficient draw has length `k·m`; every `Σ` and `Σ⁻¹` is `k×k`.
/// - Log-likelihoods are either absent on every draw or present on every
///   draw with length `n`.
/// - Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BvarResults {
    data: VarData,
    draws: DrawStore,
    metadata: SamplerMetadata,
}

impl BvarResults {
    /// Validate and wrap the output of a run.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::NoDraws` for an empty store.
    /// - `ConfigError::ShapeMismatch` for a wrongly sized coefficient or
    ///   covariance draw.
    /// - `ConfigError::DrawCountMismatch` when log-likelihoods are present on
    ///   some draws only, or have the wrong length.
    pub fn new(data: VarData, draws: DrawStore, metadata: SamplerMetadata) -> BvarResult<BvarResults> {
        if draws.is_empty() {
            return Err(ConfigError::NoDraws.into());
        }
        let (k, m, n) = (data.n_vars(), data.n_regressors(), data.n_obs());
        let tracked = draws.iter().filter(|d| d.log_likelihood.is_some()).count();
        if tracked != 0 && tracked != draws.len() {
            return Err(ConfigError::DrawCountMismatch {
                what: "log-likelihood",
                expected: draws.len(),
                actual: tracked,
            }
            .into());
        }
        for draw in &draws {
            if draw.coefficients.n_vars() != k || draw.coefficients.values().len() != k * m {
                return Err(ConfigError::ShapeMismatch {
                    what: "coefficient draw",
                    expected: (k * m, 1),
                    actual: (draw.coefficients.values().len(), 1),
                }
                .into());
            }
            if draw.covariance.sigma().dim() != (k, k) || draw.covariance.sigma_inv().dim() != (k, k)
            {
                return Err(ConfigError::ShapeMismatch {
                    what: "covariance draw",
                    expected: (k, k),
                    actual: draw.covariance.sigma().dim(),
                }
                .into());
            }
            if let Some(ll) = &draw.log_likelihood {
                if ll.len() != n {
                    return Err(ConfigError::DrawCountMismatch {
                        what: "log-likelihood values",
                        expected: n,
                        actual: ll.len(),
                    }
                    .into());
                }
            }
        }
        Ok(BvarResults { data, draws, metadata })
    }

    /// Assemble a container from separate coefficient and covariance
    /// collections, as produced by external samplers.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::DrawCountMismatch` when the collections differ in
    ///   length; otherwise as for [`BvarResults::new`].
    pub fn from_parts(
        data: VarData, coefficients: Vec<CoefficientDraw>, covariances: Vec<CovarianceDraw>,
        metadata: SamplerMetadata,
    ) -> BvarResult<BvarResults> {
        if coefficients.len() != covariances.len() {
            return Err(ConfigError::DrawCountMismatch {
                what: "covariance draws",
                expected: coefficients.len(),
                actual: covariances.len(),
            }
            .into());
        }
        let draws: Vec<Draw> = coefficients
            .into_iter()
            .zip(covariances)
            .map(|(coefficients, covariance)| Draw { coefficients, covariance, log_likelihood: None })
            .collect();
        BvarResults::new(data, DrawStore::from(draws), metadata)
    }

    pub fn data(&self) -> &VarData {
        &self.data
    }

    pub fn draws(&self) -> &DrawStore {
        &self.draws
    }

    pub fn metadata(&self) -> &SamplerMetadata {
        &self.metadata
    }

    pub fn n_draws(&self) -> usize {
        self.draws.len()
    }

    pub fn names(&self) -> &[String] {
        self.data.names()
    }

    /// `k×m` coefficient matrix of draw `draw`.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::DrawIndexOutOfRange`.
    pub fn coefficient_matrix(&self, draw: usize) -> BvarResult<Array2<f64>> {
        self.draws
            .get(draw)
            .map(|d| d.coefficients.matrix())
            .ok_or_else(|| ConfigError::DrawIndexOutOfRange { index: draw, draws: self.n_draws() }.into())
    }

    /// Element-wise mean of the coefficient matrices.
    pub fn posterior_mean_coefficients(&self) -> Array2<f64> {
        let (k, m) = (self.data.n_vars(), self.data.n_regressors());
        let mut acc = Array1::<f64>::zeros(k * m);
        for draw in &self.draws {
            acc += draw.coefficients.values();
        }
        acc /= self.n_draws() as f64;
        Array2::from_shape_fn((k, m), |(i, j)| acc[j * k + i])
    }

    /// Element-wise mean of the `Σ` draws.
    pub fn posterior_mean_sigma(&self) -> Array2<f64> {
        let k = self.data.n_vars();
        let mut acc = Array2::<f64>::zeros((k, k));
        for draw in &self.draws {
            acc += draw.covariance.sigma();
        }
        acc / self.n_draws() as f64
    }

    /// Per-draw total log-likelihood, when tracked.
    pub fn log_likelihood_totals(&self) -> Option<Array1<f64>> {
        self.draws.iter().map(|d| d.log_likelihood.as_ref().map(|ll| ll.sum())).collect()
    }

    /// Position of `name` among the series.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::UnknownVariable`.
    pub fn variable_index(&self, name: &str) -> BvarResult<usize> {
        self.data
            .names()
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| ConfigError::UnknownVariable { name: name.to_string() }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Deterministic, TimeSeriesMatrix},
        errors::BvarError,
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction-time validation of draw shapes and counts.
    // - Posterior-mean accessors and variable lookup.
    // -------------------------------------------------------------------------

    fn data() -> VarData {
        let series = TimeSeriesMatrix::new(
            array![[1.0, 2.0], [2.0, 1.0], [3.0, 0.5], [2.5, 1.5]],
            Some(vec!["gdp".into(), "rate".into()]),
        )
        .unwrap();
        VarData::new(&series, 1, Deterministic::None).unwrap()
    }

    fn metadata() -> SamplerMetadata {
        SamplerMetadata { iterations: 2, burnin: 0, thin: 1, seed: 0, chain: 0 }
    }

    fn coef(values: [f64; 4]) -> CoefficientDraw {
        CoefficientDraw::new(Array1::from(values.to_vec()), 2).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Posterior means average the stored draws.
    //
    // Given
    // -----
    // - Two draws with coefficients 1..4 and 3..6 and Σ = I, 3I.
    //
    // Expect
    // ------
    // - Mean A = [[2, 4], [3, 5]] (column-major), mean Σ = 2I.
    fn posterior_means_average_draws() {
        // Arrange
        let covs = vec![
            CovarianceDraw::from_sigma(Array2::eye(2)).unwrap(),
            CovarianceDraw::from_sigma(Array2::eye(2) * 3.0).unwrap(),
        ];

        // Act
        let results = BvarResults::from_parts(
            data(),
            vec![coef([1.0, 2.0, 3.0, 4.0]), coef([3.0, 4.0, 5.0, 6.0])],
            covs,
            metadata(),
        )
        .unwrap();

        // Assert
        assert_eq!(results.posterior_mean_coefficients(), array![[2.0, 4.0], [3.0, 5.0]]);
        assert_relative_eq!(results.posterior_mean_sigma()[[1, 1]], 2.0, epsilon = 1e-12);
        assert_eq!(results.coefficient_matrix(1).unwrap(), array![[3.0, 5.0], [4.0, 6.0]]);
        assert!(results.log_likelihood_totals().is_none());
        assert_eq!(results.variable_index("rate").unwrap(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Construction fails eagerly on inconsistent inputs.
    //
    // Given
    // -----
    // - Mismatched collection lengths, an empty store, a wrongly sized
    //   coefficient draw.
    //
    // Expect
    // ------
    // - `DrawCountMismatch`, `NoDraws`, `ShapeMismatch`.
    fn construction_rejects_inconsistent_draws() {
        // Arrange
        let sigma = CovarianceDraw::from_sigma(Array2::eye(2)).unwrap();
        let short = CoefficientDraw::new(array![1.0, 2.0], 2).unwrap();

        // Act
        let count = BvarResults::from_parts(data(), vec![coef([0.0; 4])], vec![], metadata());
        let empty = BvarResults::new(data(), DrawStore::new(), metadata());
        let shape = BvarResults::from_parts(data(), vec![short], vec![sigma], metadata());

        // Assert
        assert!(matches!(
            count.unwrap_err(),
            BvarError::Configuration(ConfigError::DrawCountMismatch { .. })
        ));
        assert_eq!(empty.unwrap_err(), BvarError::Configuration(ConfigError::NoDraws));
        assert!(matches!(
            shape.unwrap_err(),
            BvarError::Configuration(ConfigError::ShapeMismatch { what: "coefficient draw", .. })
        ));
    }

    #[test]
    fn lookups_report_unknown_names_and_indices() {
        let results = BvarResults::from_parts(
            data(),
            vec![coef([0.0; 4])],
            vec![CovarianceDraw::from_sigma(Array2::eye(2)).unwrap()],
            metadata(),
        )
        .unwrap();
        assert_eq!(
            results.variable_index("cpi").unwrap_err(),
            BvarError::Configuration(ConfigError::UnknownVariable { name: "cpi".into() })
        );
        assert!(results.coefficient_matrix(1).is_err());
    }
}
