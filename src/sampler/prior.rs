//! Normal–Wishart prior specification for VAR coefficients and covariance.
use crate::{
    errors::{BvarResult, ConfigError},
    linalg::check_symmetric,
};
use ndarray::{Array1, Array2};

/// PriorSpec — conjugate prior for `(vec(A), Σ⁻¹)`.
///
/// Purpose
/// -------
/// Carry the four prior inputs of the Gibbs sampler: a multivariate-normal
/// prior on the stacked coefficients and a Wishart prior on the innovation
/// precision. Every field is required; there are no implicit defaults.
///
/// Fields
/// ------
/// - `a_mean`: `Array1<f64>`
///   Prior mean of `vec(A)`, length `k·m` (column-major stacking of the
///   `k×m` coefficient matrix).
/// - `a_precision`: `Array2<f64>`
///   Prior precision of `vec(A)`, `k·m × k·m`, symmetric. May be singular
///   (zero rows encode flat priors) as long as the data make the posterior
///   precision positive-definite.
/// - `sigma_df`: `f64`
///   Prior degrees of freedom, at least `k`.
/// - `sigma_scale`: `Array2<f64>`
///   Prior scale, `k×k`, symmetric positive-definite.
///
/// Invariants
/// ----------
/// - Shapes, finiteness and symmetry are checked by [`PriorSpec::validate`]
///   against the model dimensions. Positive-definiteness of `sigma_scale` is
///   a numerical property and is checked when the scale is factored.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorSpec {
    pub a_mean: Array1<f64>,
    pub a_precision: Array2<f64>,
    pub sigma_df: f64,
    pub sigma_scale: Array2<f64>,
}

impl PriorSpec {
    /// Start a builder with no fields set.
    pub fn builder() -> PriorSpecBuilder {
        PriorSpecBuilder::default()
    }

    /// Zero-mean coefficient prior with scalar precision and a Wishart prior
    /// on `Σ⁻¹`.
    ///
    /// Parameters
    /// ----------
    /// - `k`, `m`: `usize`
    ///   Number of variables and regressors per equation.
    /// - `coef_precision`: `f64`
    ///   Diagonal of the coefficient prior precision; `0` gives a flat prior.
    /// - `sigma_df`: `f64`
    /// - `sigma_scale`: `Array2<f64>`
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidPrecision` for a negative or non-finite
    ///   `coef_precision`.
    /// - Anything [`PriorSpec::validate`] reports.
    pub fn normal_wishart(
        k: usize, m: usize, coef_precision: f64, sigma_df: f64, sigma_scale: Array2<f64>,
    ) -> BvarResult<PriorSpec> {
        if !coef_precision.is_finite() || coef_precision < 0.0 {
            return Err(ConfigError::InvalidPrecision { value: coef_precision }.into());
        }
        let km = k * m;
        let prior = PriorSpec {
            a_mean: Array1::zeros(km),
            a_precision: Array2::eye(km) * coef_precision,
            sigma_df,
            sigma_scale,
        };
        prior.validate(k, m)?;
        Ok(prior)
    }

    /// Check the prior against a model with `k` variables and `m` regressors.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::ShapeMismatch` for any wrongly sized field.
    /// - `ConfigError::NonFiniteInput` for NaN/±inf entries.
    /// - `ConfigError::NotSymmetric` when `a_precision` or `sigma_scale` is
    ///   not symmetric within a relative tolerance of `1e-8`.
    /// - `ConfigError::InvalidDegreesOfFreedom` when `sigma_df` is non-finite
    ///   or below `k`.
    pub fn validate(&self, k: usize, m: usize) -> BvarResult<()> {
        let km = k * m;
        if self.a_mean.len() != km {
            return Err(ConfigError::ShapeMismatch {
                what: "A_mean",
                expected: (km, 1),
                actual: (self.a_mean.len(), 1),
            }
            .into());
        }
        check_finite("A_mean", self.a_mean.iter())?;

        if self.a_precision.dim() != (km, km) {
            return Err(ConfigError::ShapeMismatch {
                what: "A_precision",
                expected: (km, km),
                actual: self.a_precision.dim(),
            }
            .into());
        }
        check_finite("A_precision", self.a_precision.iter())?;
        if let Some((row, col)) = check_symmetric(self.a_precision.view()) {
            return Err(ConfigError::NotSymmetric { what: "A_precision", row, col }.into());
        }

        if !self.sigma_df.is_finite() || self.sigma_df < k as f64 {
            return Err(ConfigError::InvalidDegreesOfFreedom { df: self.sigma_df, k }.into());
        }

        if self.sigma_scale.dim() != (k, k) {
            return Err(ConfigError::ShapeMismatch {
                what: "Sigma_scale",
                expected: (k, k),
                actual: self.sigma_scale.dim(),
            }
            .into());
        }
        check_finite("Sigma_scale", self.sigma_scale.iter())?;
        if let Some((row, col)) = check_symmetric(self.sigma_scale.view()) {
            return Err(ConfigError::NotSymmetric { what: "Sigma_scale", row, col }.into());
        }
        Ok(())
    }
}

fn check_finite<'a>(what: &'static str, mut values: impl Iterator<Item = &'a f64>) -> BvarResult<()> {
    match values.find(|v| !v.is_finite()) {
        Some(&value) => Err(ConfigError::NonFiniteInput { what, value }.into()),
        None => Ok(()),
    }
}

/// Builder for [`PriorSpec`] that reports which required field is missing.
#[derive(Debug, Clone, Default)]
pub struct PriorSpecBuilder {
    a_mean: Option<Array1<f64>>,
    a_precision: Option<Array2<f64>>,
    sigma_df: Option<f64>,
    sigma_scale: Option<Array2<f64>>,
}

impl PriorSpecBuilder {
    pub fn a_mean(mut self, a_mean: Array1<f64>) -> Self {
        self.a_mean = Some(a_mean);
        self
    }

    pub fn a_precision(mut self, a_precision: Array2<f64>) -> Self {
        self.a_precision = Some(a_precision);
        self
    }

    pub fn sigma_df(mut self, sigma_df: f64) -> Self {
        self.sigma_df = Some(sigma_df);
        self
    }

    pub fn sigma_scale(mut self, sigma_scale: Array2<f64>) -> Self {
        self.sigma_scale = Some(sigma_scale);
        self
    }

    /// Assemble the prior.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::MissingPriorField` naming the first absent field, in
    ///   the order `A_mean`, `A_precision`, `Sigma_df`, `Sigma_scale`.
    ///
    /// Notes
    /// -----
    /// - Dimensions are not known here; call [`PriorSpec::validate`] (the
    ///   sampler does so on construction).
    pub fn build(self) -> BvarResult<PriorSpec> {
        let missing = |field| ConfigError::MissingPriorField { field };
        Ok(PriorSpec {
            a_mean: self.a_mean.ok_or_else(|| missing("A_mean"))?,
            a_precision: self.a_precision.ok_or_else(|| missing("A_precision"))?,
            sigma_df: self.sigma_df.ok_or_else(|| missing("Sigma_df"))?,
            sigma_scale: self.sigma_scale.ok_or_else(|| missing("Sigma_scale"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BvarError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Missing-field reporting in the builder.
    // - Shape, symmetry and degrees-of-freedom validation.
    // - The scalar-precision convenience constructor.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure each missing field is named in the error.
    //
    // Given
    // -----
    // - Builders with all but one field set.
    //
    // Expect
    // ------
    // - `MissingPriorField` with the absent field's name.
    fn builder_reports_missing_field() {
        // Arrange
        let full = PriorSpec::builder()
            .a_mean(Array1::zeros(2))
            .a_precision(Array2::eye(2))
            .sigma_df(3.0)
            .sigma_scale(Array2::eye(1));

        // Act
        let no_df = PriorSpecBuilder { sigma_df: None, ..full.clone() }.build();
        let no_mean = PriorSpecBuilder { a_mean: None, ..full.clone() }.build();

        // Assert
        assert_eq!(
            no_df.unwrap_err(),
            BvarError::Configuration(ConfigError::MissingPriorField { field: "Sigma_df" })
        );
        assert_eq!(
            no_mean.unwrap_err(),
            BvarError::Configuration(ConfigError::MissingPriorField { field: "A_mean" })
        );
        assert!(full.build().is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Exercise the validation branches of `PriorSpec::validate`.
    //
    // Given
    // -----
    // - A valid prior for k = 1, m = 2 and three corrupted copies.
    //
    // Expect
    // ------
    // - The valid prior passes; shape, symmetry and df errors are reported.
    fn validate_checks_shapes_symmetry_and_df() {
        // Arrange
        let prior = PriorSpec {
            a_mean: array![0.0, 0.0],
            a_precision: array![[1.0, 0.2], [0.2, 1.0]],
            sigma_df: 1.0,
            sigma_scale: array![[1.0]],
        };
        let asym = PriorSpec { a_precision: array![[1.0, 0.2], [0.0, 1.0]], ..prior.clone() };
        let low_df = PriorSpec { sigma_df: 0.5, ..prior.clone() };

        // Act / Assert
        assert!(prior.validate(1, 2).is_ok());
        assert!(matches!(
            prior.validate(2, 2).unwrap_err(),
            BvarError::Configuration(ConfigError::ShapeMismatch { what: "A_mean", .. })
        ));
        assert_eq!(
            asym.validate(1, 2).unwrap_err(),
            BvarError::Configuration(ConfigError::NotSymmetric {
                what: "A_precision",
                row: 0,
                col: 1
            })
        );
        assert!(matches!(
            low_df.validate(1, 2).unwrap_err(),
            BvarError::Configuration(ConfigError::InvalidDegreesOfFreedom { k: 1, .. })
        ));
    }

    #[test]
    fn normal_wishart_builds_scaled_identity() {
        let prior = PriorSpec::normal_wishart(2, 3, 0.5, 4.0, Array2::eye(2)).unwrap();
        assert_eq!(prior.a_mean.len(), 6);
        assert_eq!(prior.a_precision[[5, 5]], 0.5);
        assert_eq!(prior.a_precision[[0, 1]], 0.0);
        assert!(PriorSpec::normal_wishart(2, 3, -1.0, 4.0, Array2::eye(2)).is_err());
    }
}
