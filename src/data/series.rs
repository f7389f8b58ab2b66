//! Named, validated multivariate time series.
use crate::errors::{BvarResult, ConfigError};
use ndarray::Array2;
use std::collections::HashSet;

/// `TimeSeriesMatrix` — `T×k` panel of finite observations with variable names.
///
/// Purpose
/// -------
/// Represent the endogenous series of a VAR. Rows index time in ascending
/// order; columns index variables. The container is immutable once built.
///
/// Fields
/// ------
/// - `values`: `Array2<f64>`
///   Observations, `T×k`.
/// - `names`: `Vec<String>`
///   One unique name per column. Variable order matters for orthogonalized
///   impulse responses: the Cholesky factor attributes contemporaneous
///   correlation to earlier variables first.
///
/// Invariants
/// ----------
/// - `T ≥ 1`, `k ≥ 1`, all entries finite.
/// - `names.len() == k` and names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesMatrix {
    values: Array2<f64>,
    names: Vec<String>,
}

impl TimeSeriesMatrix {
    /// Validate and wrap a `T×k` panel.
    ///
    /// Parameters
    /// ----------
    /// - `values`: `Array2<f64>`
    ///   Observations with rows = time and columns = variables.
    /// - `names`: `Option<Vec<String>>`
    ///   Variable names; when `None`, `y1, …, yk` are used.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::EmptySeries` when `T == 0` or `k == 0`.
    /// - `ConfigError::NonFiniteData` at the first NaN/±inf (row-major scan).
    /// - `ConfigError::NameCountMismatch` / `DuplicateName` for bad names.
    pub fn new(values: Array2<f64>, names: Option<Vec<String>>) -> BvarResult<TimeSeriesMatrix> {
        let (t, k) = values.dim();
        if t == 0 || k == 0 {
            return Err(ConfigError::EmptySeries.into());
        }
        if let Some(((row, col), &value)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFiniteData { row, col, value }.into());
        }
        let names = match names {
            Some(names) => {
                if names.len() != k {
                    return Err(ConfigError::NameCountMismatch { expected: k, actual: names.len() }
                        .into());
                }
                check_unique_names(&names)?;
                names
            }
            None => (1..=k).map(|i| format!("y{i}")).collect(),
        };
        Ok(TimeSeriesMatrix { values, names })
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of time points `T`.
    pub fn n_obs(&self) -> usize {
        self.values.nrows()
    }

    /// Number of variables `k`.
    pub fn n_vars(&self) -> usize {
        self.values.ncols()
    }
}

/// Reject the first repeated variable name.
pub(crate) fn check_unique_names(names: &[String]) -> BvarResult<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::DuplicateName { name: name.clone() }.into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BvarError;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Check the happy path and the default naming scheme.
    //
    // Given
    // -----
    // - A 3×2 finite panel without names.
    //
    // Expect
    // ------
    // - Names `y1`, `y2`; dimensions `T = 3`, `k = 2`.
    fn series_default_names_and_dims() {
        // Arrange
        let values = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];

        // Act
        let series = TimeSeriesMatrix::new(values, None).unwrap();

        // Assert
        assert_eq!(series.names(), &["y1".to_string(), "y2".to_string()]);
        assert_eq!(series.n_obs(), 3);
        assert_eq!(series.n_vars(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Exercise every validation branch.
    //
    // Given
    // -----
    // - An empty panel, a panel with NaN at (1, 0), a wrong name count, and
    //   duplicated names.
    //
    // Expect
    // ------
    // - The matching `ConfigError` variant for each.
    fn series_rejects_invalid_input() {
        // Arrange
        let empty = Array2::<f64>::zeros((0, 2));
        let nan = array![[1.0, 2.0], [f64::NAN, 4.0]];
        let ok = array![[1.0, 2.0], [3.0, 4.0]];

        // Act / Assert
        assert_eq!(
            TimeSeriesMatrix::new(empty, None).unwrap_err(),
            BvarError::Configuration(ConfigError::EmptySeries)
        );
        match TimeSeriesMatrix::new(nan, None).unwrap_err() {
            BvarError::Configuration(ConfigError::NonFiniteData { row, col, .. }) => {
                assert_eq!((row, col), (1, 0));
            }
            other => panic!("expected NonFiniteData, got {other:?}"),
        }
        assert_eq!(
            TimeSeriesMatrix::new(ok.clone(), Some(vec!["a".into()])).unwrap_err(),
            BvarError::Configuration(ConfigError::NameCountMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(
            TimeSeriesMatrix::new(ok, Some(vec!["a".into(), "a".into()])).unwrap_err(),
            BvarError::Configuration(ConfigError::DuplicateName { name: "a".into() })
        );
    }
}
