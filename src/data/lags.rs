//! Lag-matrix construction for VAR(p) models.
use crate::{
    data::series::{TimeSeriesMatrix, check_unique_names},
    errors::{BvarResult, ConfigError},
};
use ndarray::{Array2, s};

/// Deterministic terms appended to the regressor matrix.
///
/// - `None`: no deterministic rows.
/// - `Constant`: one row of ones.
/// - `Trend`: one row `1, 2, …, n`.
/// - `Both`: constant row followed by trend row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deterministic {
    None,
    #[default]
    Constant,
    Trend,
    Both,
}

impl Deterministic {
    /// Number of deterministic rows `d`.
    pub fn n_terms(&self) -> usize {
        match self {
            Deterministic::None => 0,
            Deterministic::Constant | Deterministic::Trend => 1,
            Deterministic::Both => 2,
        }
    }
}

/// VarData — response and regressor matrices of a VAR(p).
///
/// Purpose
/// -------
/// Hold the aligned `(y, x)` pair consumed by the Gibbs sampler, together with
/// the metadata (names, lag order, deterministic terms) needed to interpret
/// coefficient draws later.
///
/// Fields
/// ------
/// - `y`: `Array2<f64>`
///   `k×n` responses; column `t` is the observation at time `t + p`.
/// - `x`: `Array2<f64>`
///   `m×n` regressors; column `t` stacks `y_{t+p−1}, …, y_{t}` followed by
///   the deterministic rows.
/// - `names`: `Vec<String>`
///   Variable names in column order of the source series.
/// - `lags`: `usize`
///   Lag order `p`.
/// - `deterministic`: [`Deterministic`]
///
/// Invariants
/// ----------
/// - `y.ncols() == x.ncols() == n ≥ 1`.
/// - `x.nrows() == k·p + deterministic.n_terms()`.
/// - Both matrices are immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct VarData {
    y: Array2<f64>,
    x: Array2<f64>,
    names: Vec<String>,
    lags: usize,
    deterministic: Deterministic,
}

impl VarData {
    /// Build `(y, x)` for a VAR(p) from a validated series.
    ///
    /// Parameters
    /// ----------
    /// - `series`: `&TimeSeriesMatrix`
    ///   `T×k` panel with rows ordered in time.
    /// - `p`: `usize`
    ///   Lag order; must be at least 1.
    /// - `deterministic`: [`Deterministic`]
    ///   Deterministic rows appended after the lag blocks.
    ///
    /// Returns
    /// -------
    /// `BvarResult<VarData>`
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidLagOrder` when `p == 0`.
    /// - `ConfigError::InsufficientObservations` when `T ≤ p`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_bvar::data::{Deterministic, TimeSeriesMatrix, VarData};
    /// let series = TimeSeriesMatrix::new(array![[1.0], [2.0], [3.0], [4.0]], None).unwrap();
    /// let data = VarData::new(&series, 1, Deterministic::Constant).unwrap();
    /// assert_eq!(data.y().dim(), (1, 3));
    /// assert_eq!(data.x().dim(), (2, 3));
    /// ```
    pub fn new(
        series: &TimeSeriesMatrix, p: usize, deterministic: Deterministic,
    ) -> BvarResult<VarData> {
        if p == 0 {
            return Err(ConfigError::InvalidLagOrder { p }.into());
        }
        let t = series.n_obs();
        if t <= p {
            return Err(ConfigError::InsufficientObservations { observations: t, p }.into());
        }
        let k = series.n_vars();
        let n = t - p;
        let values = series.values();

        let y = values.slice(s![p.., ..]).t().to_owned();

        let d = deterministic.n_terms();
        let mut x = Array2::<f64>::zeros((k * p + d, n));
        for lag in 1..=p {
            let block = values.slice(s![p - lag..t - lag, ..]);
            x.slice_mut(s![(lag - 1) * k..lag * k, ..]).assign(&block.t());
        }
        let det_row = k * p;
        match deterministic {
            Deterministic::None => {}
            Deterministic::Constant => x.row_mut(det_row).fill(1.0),
            Deterministic::Trend => fill_trend(&mut x, det_row),
            Deterministic::Both => {
                x.row_mut(det_row).fill(1.0);
                fill_trend(&mut x, det_row + 1);
            }
        }

        Ok(VarData { y, x, names: series.names().to_vec(), lags: p, deterministic })
    }

    /// Wrap externally prepared matrices.
    ///
    /// For callers with their own lag builder. Checks that column counts agree,
    /// that `x` has room for `p` lag blocks, and that all entries are finite.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::ShapeMismatch`, `NameCountMismatch`, `DuplicateName`,
    ///   `InvalidLagOrder`, `NonFiniteData`, or `EmptySeries`.
    pub fn from_matrices(
        y: Array2<f64>, x: Array2<f64>, names: Vec<String>, lags: usize,
        deterministic: Deterministic,
    ) -> BvarResult<VarData> {
        let (k, n) = y.dim();
        if k == 0 || n == 0 {
            return Err(ConfigError::EmptySeries.into());
        }
        if lags == 0 {
            return Err(ConfigError::InvalidLagOrder { p: lags }.into());
        }
        let m = k * lags + deterministic.n_terms();
        if x.dim() != (m, n) {
            return Err(ConfigError::ShapeMismatch { what: "x", expected: (m, n), actual: x.dim() }
                .into());
        }
        if names.len() != k {
            return Err(ConfigError::NameCountMismatch { expected: k, actual: names.len() }.into());
        }
        check_unique_names(&names)?;
        for mat in [&y, &x] {
            if let Some(((row, col), &value)) = mat.indexed_iter().find(|(_, v)| !v.is_finite()) {
                return Err(ConfigError::NonFiniteData { row, col, value }.into());
            }
        }
        Ok(VarData { y, x, names, lags, deterministic })
    }

    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn lags(&self) -> usize {
        self.lags
    }

    pub fn deterministic(&self) -> Deterministic {
        self.deterministic
    }

    /// Number of endogenous variables `k`.
    pub fn n_vars(&self) -> usize {
        self.y.nrows()
    }

    /// Number of regressors per equation `m`.
    pub fn n_regressors(&self) -> usize {
        self.x.nrows()
    }

    /// Effective sample size `n = T − p`.
    pub fn n_obs(&self) -> usize {
        self.y.ncols()
    }
}

fn fill_trend(x: &mut Array2<f64>, row: usize) {
    for (t, v) in x.row_mut(row).iter_mut().enumerate() {
        *v = (t + 1) as f64;
    }
}
