//! Impulse-response requests: variable references, identification schemes,
//! and summary options.
use crate::{
    errors::{BvarResult, ConfigError},
    results::BvarResults,
    utils::PointEstimate,
};
use std::str::FromStr;

/// A variable addressed by name or by 0-based column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableRef {
    Name(String),
    Index(usize),
}

impl VariableRef {
    /// Resolve against the series of `results`.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::UnknownVariable` / `VariableIndexOutOfRange`.
    pub fn resolve(&self, results: &BvarResults) -> BvarResult<usize> {
        match self {
            VariableRef::Name(name) => results.variable_index(name),
            VariableRef::Index(index) => {
                let k = results.data().n_vars();
                if *index < k {
                    Ok(*index)
                } else {
                    Err(ConfigError::VariableIndexOutOfRange { index: *index, k }.into())
                }
            }
        }
    }
}

impl From<&str> for VariableRef {
    fn from(name: &str) -> VariableRef {
        VariableRef::Name(name.to_string())
    }
}

impl From<String> for VariableRef {
    fn from(name: String) -> VariableRef {
        VariableRef::Name(name)
    }
}

impl From<usize> for VariableRef {
    fn from(index: usize) -> VariableRef {
        VariableRef::Index(index)
    }
}

/// Identification scheme of the impulse.
///
/// - `ForecastError` (`"feir"`): unit shock to one reduced-form innovation.
/// - `Orthogonalized` (`"oir"`): one-standard-deviation structural shock from
///   the lower Cholesky factor of `Σ`; depends on the column order of the
///   series.
/// - `Generalized` (`"gir"`): shock `Σ e_j / sqrt(Σ_jj)`, invariant to
///   ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrfKind {
    ForecastError,
    Orthogonalized,
    Generalized,
}

impl IrfKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrfKind::ForecastError => "feir",
            IrfKind::Orthogonalized => "oir",
            IrfKind::Generalized => "gir",
        }
    }
}

impl FromStr for IrfKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<IrfKind, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "feir" => Ok(IrfKind::ForecastError),
            "oir" => Ok(IrfKind::Orthogonalized),
            "gir" => Ok(IrfKind::Generalized),
            _ => Err(ConfigError::InvalidIrfKind { name: s.to_string() }),
        }
    }
}

/// IrfRequest — one impulse/response pair, horizon and summary settings.
///
/// Fields
/// ------
/// - `impulse`, `response`: [`VariableRef`]
/// - `horizon`: `usize`
///   Last horizon `n`; the path has `n + 1` entries, index 0 being the
///   contemporaneous effect.
/// - `kind`: [`IrfKind`]
/// - `ci_level`: `Option<f64>`
///   Coverage of the equal-tailed credible band (e.g. 0.95), strictly inside
///   (0, 1). `None` skips the bounds.
/// - `point`: [`PointEstimate`]
///   Mean (default) or median across draws.
#[derive(Debug, Clone, PartialEq)]
pub struct IrfRequest {
    pub impulse: VariableRef,
    pub response: VariableRef,
    pub horizon: usize,
    pub kind: IrfKind,
    pub ci_level: Option<f64>,
    pub point: PointEstimate,
}

impl IrfRequest {
    pub fn new(
        impulse: impl Into<VariableRef>, response: impl Into<VariableRef>, horizon: usize,
        kind: IrfKind,
    ) -> IrfRequest {
        IrfRequest {
            impulse: impulse.into(),
            response: response.into(),
            horizon,
            kind,
            ci_level: None,
            point: PointEstimate::Mean,
        }
    }

    /// Request credible bounds with coverage `level`.
    ///
    /// Errors
    /// ------
    /// - `ConfigError::InvalidCredibleLevel` unless `0 < level < 1`.
    pub fn ci_level(mut self, level: f64) -> BvarResult<IrfRequest> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ConfigError::InvalidCredibleLevel { level }.into());
        }
        self.ci_level = Some(level);
        Ok(self)
    }

    pub fn point(mut self, point: PointEstimate) -> IrfRequest {
        self.point = point;
        self
    }
}
