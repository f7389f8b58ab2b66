//! Impulse-response engine — per-draw paths and cross-draw summaries.
//!
//! Purpose
//! -------
//! Evaluate an [`IrfRequest`] against a [`BvarResults`]: compute the response
//! path for every stored draw, then summarize each horizon independently
//! across draws.
//!
//! Key behaviors
//! -------------
//! - Variable references and the credible level are checked before any draw
//!   is touched.
//! - Per-draw work (Wold coefficients, shock vector, path) runs in parallel
//!   over draws with `rayon`.
//! - A numerical failure on any draw aborts the request with
//!   [`BvarError::ImpulseResponseFailed`]; no sentinel values are
//!   substituted.
use crate::{
    errors::{BvarError, BvarResult, ConfigError, NumericalError},
    irf::{
        identification::shock_vector,
        request::{IrfKind, IrfRequest},
        wold::wold_coefficients,
    },
    results::BvarResults,
    sampler::Draw,
    utils::{DrawSummary, summarize_draws},
};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// ImpulseResponse — summarized response path of one impulse/response pair.
///
/// Fields
/// ------
/// - `kind`, `impulse`, `response`: the resolved request (0-based indices).
/// - `point`: `Array1<f64>`
///   Point estimate per horizon, length `horizon + 1`.
/// - `lower`, `upper`: `Option<Array1<f64>>`
///   Equal-tailed credible bounds when a level was requested.
/// - `paths`: `Array2<f64>`
///   Per-draw paths, `n_draws × (horizon + 1)`, in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseResponse {
    pub kind: IrfKind,
    pub impulse: usize,
    pub response: usize,
    pub point: Array1<f64>,
    pub lower: Option<Array1<f64>>,
    pub upper: Option<Array1<f64>>,
    pub paths: Array2<f64>,
}

impl ImpulseResponse {
    /// Last horizon `n`.
    pub fn horizon(&self) -> usize {
        self.point.len() - 1
    }
}

/// Compute a summarized impulse-response path.
///
/// Parameters
/// ----------
/// - `results`: `&BvarResults`
///   Stored draws; each contributes one path.
/// - `request`: `&IrfRequest`
///
/// Returns
/// -------
/// `BvarResult<ImpulseResponse>`
///   Exactly `horizon + 1` entries per path; entry 0 is the impact response.
///
/// Errors
/// ------
/// - `ConfigError::UnknownVariable` / `VariableIndexOutOfRange` /
///   `InvalidCredibleLevel`, raised before any computation.
/// - `BvarError::ImpulseResponseFailed { draw, horizon, .. }` when a draw's
///   `Σ` cannot be factored (`horizon: None`) or its Wold coefficients
///   overflow (`horizon: Some(h)`).
///
/// Examples
/// --------
/// ```rust,ignore
/// let request = IrfRequest::new("gdp", "rate", 12, IrfKind::Orthogonalized).ci_level(0.9)?;
/// let irf = impulse_response(&results, &request)?;
/// assert_eq!(irf.point.len(), 13);
/// ```
pub fn impulse_response(results: &BvarResults, request: &IrfRequest) -> BvarResult<ImpulseResponse> {
    let impulse = request.impulse.resolve(results)?;
    let response = request.response.resolve(results)?;
    if let Some(level) = request.ci_level {
        if !(level > 0.0 && level < 1.0) {
            return Err(ConfigError::InvalidCredibleLevel { level }.into());
        }
    }
    let p = results.data().lags();
    let horizon = request.horizon;

    let paths: Vec<Array1<f64>> = results
        .draws()
        .as_slice()
        .par_iter()
        .enumerate()
        .map(|(index, draw)| {
            draw_path(draw, p, request.kind, impulse, response, horizon).map_err(
                |(h, source)| BvarError::ImpulseResponseFailed { draw: index, horizon: h, source },
            )
        })
        .collect::<BvarResult<Vec<_>>>()?;

    let n_draws = paths.len();
    let mut matrix = Array2::<f64>::zeros((n_draws, horizon + 1));
    for (mut row, path) in matrix.rows_mut().into_iter().zip(&paths) {
        row.assign(path);
    }

    let summaries: Vec<DrawSummary> = matrix
        .columns()
        .into_iter()
        .map(|col| summarize_draws(col.to_vec(), request.point, request.ci_level))
        .collect();
    let (point, lower, upper) = split_summaries(&summaries, request.ci_level.is_some());

    Ok(ImpulseResponse { kind: request.kind, impulse, response, point, lower, upper, paths: matrix })
}

fn draw_path(
    draw: &Draw, p: usize, kind: IrfKind, impulse: usize, response: usize, horizon: usize,
) -> Result<Array1<f64>, (Option<usize>, NumericalError)> {
    let shock =
        shock_vector(kind, draw.covariance.sigma().view(), impulse).map_err(|err| (None, err))?;
    let a = draw.coefficients.matrix();
    let phis = wold_coefficients(a.view(), p, horizon).map_err(|(h, err)| (Some(h), err))?;
    Ok(phis.iter().map(|phi| phi.row(response).dot(&shock)).collect())
}

fn split_summaries(
    summaries: &[DrawSummary], bounds: bool,
) -> (Array1<f64>, Option<Array1<f64>>, Option<Array1<f64>>) {
    let point = summaries.iter().map(|s| s.point).collect();
    if !bounds {
        return (point, None, None);
    }
    let lower = summaries.iter().map(|s| s.lower.unwrap_or(f64::NAN)).collect();
    let upper = summaries.iter().map(|s| s.upper.unwrap_or(f64::NAN)).collect();
    (point, Some(lower), Some(upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Deterministic, TimeSeriesMatrix, VarData},
        results::SamplerMetadata,
        sampler::{CoefficientDraw, CovarianceDraw},
        utils::PointEstimate,
    };
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The diagonal VAR(1) benchmark where all three schemes give 0.5^h.
    // - Horizon 0 and the impact responses of feir and oir.
    // - Ordering dependence of oir vs ordering invariance of gir.
    // - Eager lookup failures and per-draw numerical failures.
    // - Mean/median summaries and credible bounds across draws.
    // -------------------------------------------------------------------------

    fn results_with(coefs: Vec<Array1<f64>>, sigmas: Vec<Array2<f64>>) -> BvarResults {
        let series = TimeSeriesMatrix::new(
            array![[0.1, 0.2], [0.3, 0.1], [0.2, 0.4]],
            Some(vec!["gdp".into(), "rate".into()]),
        )
        .unwrap();
        let data = VarData::new(&series, 1, Deterministic::None).unwrap();
        let coefs = coefs.into_iter().map(|c| CoefficientDraw::new(c, 2).unwrap()).collect();
        let covs = sigmas
            .into_iter()
            .map(|s| {
                let inv = crate::linalg::invert_spd(s.view(), "s").unwrap_or_else(|_| s.clone());
                CovarianceDraw::new(s, inv).unwrap()
            })
            .collect();
        let meta = SamplerMetadata { iterations: 1, burnin: 0, thin: 1, seed: 0, chain: 0 };
        BvarResults::from_parts(data, coefs, covs, meta).unwrap()
    }

    fn diagonal_results() -> BvarResults {
        // A = diag(0.5, 0.5) stacked column-major, Σ = I.
        results_with(vec![array![0.5, 0.0, 0.0, 0.5]], vec![Array2::eye(2)])
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the hand-constructed benchmark.
    //
    // Given
    // -----
    // - A = diag(0.5, 0.5), Σ = I, same-variable impulse/response, n = 6.
    //
    // Expect
    // ------
    // - feir, oir and gir all equal 0.5^h for h = 0..=6.
    fn diagonal_var_gives_geometric_decay_for_all_kinds() {
        // Arrange
        let results = diagonal_results();

        for kind in [IrfKind::ForecastError, IrfKind::Orthogonalized, IrfKind::Generalized] {
            // Act
            let irf = impulse_response(&results, &IrfRequest::new("gdp", "gdp", 6, kind)).unwrap();

            // Assert
            assert_eq!(irf.horizon(), 6);
            for h in 0..=6 {
                assert_relative_eq!(irf.point[h], 0.5_f64.powi(h as i32), epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Horizon 0 returns only the impact entry.
    //
    // Given
    // -----
    // - Σ = [[4, 2], [2, 5]] (P = [[2, 0], [1, 2]]), impulse 0, response 1.
    //
    // Expect
    // ------
    // - feir: [Φ_0[1, 0]] = [0]; oir: [P[1, 0]] = [1].
    fn horizon_zero_returns_impact_entry() {
        // Arrange
        let results = results_with(vec![array![0.5, 0.1, 0.2, 0.3]], vec![array![[4.0, 2.0], [2.0, 5.0]]]);

        // Act
        let fe = impulse_response(&results, &IrfRequest::new(0usize, 1usize, 0, IrfKind::ForecastError))
            .unwrap();
        let oi = impulse_response(&results, &IrfRequest::new(0usize, 1usize, 0, IrfKind::Orthogonalized))
            .unwrap();

        // Assert
        assert_eq!(fe.point.len(), 1);
        assert_eq!(fe.point[0], 0.0);
        assert_eq!(oi.point.len(), 1);
        assert_relative_eq!(oi.point[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Orthogonalized responses depend on variable ordering; generalized ones
    // do not.
    //
    // Given
    // -----
    // - A = 0, Σ = [[1, 0.8], [0.8, 1]] and the same model with the variables
    //   swapped (Σ is symmetric under the swap).
    //
    // Expect
    // ------
    // - oir impact of the first variable on the second is 0.8, of the second
    //   on the first is 0; gir gives 0.8 both ways.
    fn oir_depends_on_ordering_gir_does_not() {
        // Arrange
        let results = results_with(vec![Array1::zeros(4)], vec![array![[1.0, 0.8], [0.8, 1.0]]]);
        let req = |i: &str, r: &str, kind| IrfRequest::new(i, r, 0, kind);

        // Act
        let o_fwd = impulse_response(&results, &req("gdp", "rate", IrfKind::Orthogonalized)).unwrap();
        let o_bwd = impulse_response(&results, &req("rate", "gdp", IrfKind::Orthogonalized)).unwrap();
        let g_fwd = impulse_response(&results, &req("gdp", "rate", IrfKind::Generalized)).unwrap();
        let g_bwd = impulse_response(&results, &req("rate", "gdp", IrfKind::Generalized)).unwrap();

        // Assert
        assert_relative_eq!(o_fwd.point[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(o_bwd.point[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(g_fwd.point[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(g_bwd.point[0], 0.8, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Unknown names fail as configuration errors; a non-PD Σ on one draw
    // fails the whole request with the draw index.
    //
    // Given
    // -----
    // - A name absent from the series; a second draw with an indefinite Σ.
    //
    // Expect
    // ------
    // - `UnknownVariable`; `ImpulseResponseFailed { draw: 1, horizon: None }`.
    fn lookup_and_numerical_failures() {
        // Arrange
        let good = diagonal_results();
        let bad = results_with(
            vec![array![0.5, 0.0, 0.0, 0.5], array![0.5, 0.0, 0.0, 0.5]],
            vec![Array2::eye(2), array![[1.0, 2.0], [2.0, 1.0]]],
        );

        // Act
        let lookup =
            impulse_response(&good, &IrfRequest::new("cpi", "gdp", 4, IrfKind::ForecastError)).unwrap_err();
        let numeric =
            impulse_response(&bad, &IrfRequest::new("gdp", "gdp", 4, IrfKind::Orthogonalized)).unwrap_err();

        // Assert
        assert_eq!(
            lookup,
            BvarError::Configuration(ConfigError::UnknownVariable { name: "cpi".into() })
        );
        assert_eq!(
            numeric,
            BvarError::ImpulseResponseFailed {
                draw: 1,
                horizon: None,
                source: NumericalError::NotPositiveDefinite { what: "Sigma" },
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Summaries reduce each horizon across draws.
    //
    // Given
    // -----
    // - Three draws with A = diag(a) for a ∈ {0.2, 0.4, 0.9}, Σ = I, feir.
    //
    // Expect
    // ------
    // - Horizon 1: mean 0.5, median 0.4; bounds bracket the point estimate.
    fn summaries_use_mean_median_and_bounds() {
        // Arrange
        let coefs = [0.2, 0.4, 0.9].iter().map(|&a| array![a, 0.0, 0.0, a]).collect();
        let results = results_with(coefs, vec![Array2::eye(2); 3]);
        let base = IrfRequest::new("gdp", "gdp", 2, IrfKind::ForecastError);

        // Act
        let mean = impulse_response(&results, &base.clone().ci_level(0.5).unwrap()).unwrap();
        let median = impulse_response(&results, &base.point(PointEstimate::Median)).unwrap();

        // Assert
        assert_relative_eq!(mean.point[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(median.point[1], 0.4, epsilon = 1e-12);
        let (lo, hi) = (mean.lower.as_ref().unwrap(), mean.upper.as_ref().unwrap());
        assert!(lo[1] <= mean.point[1] && mean.point[1] <= hi[1]);
        assert!(median.lower.is_none());
        assert_eq!(mean.paths.dim(), (3, 3));
    }
}
