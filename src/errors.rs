//! errors — configuration and numerical failures for BVAR estimation.
//!
//! Purpose
//! -------
//! Provide the crate-wide error surface. Failures fall into two families:
//! configuration problems (shapes, names, missing prior fields) that are
//! detected eagerly when an object or request is constructed, and numerical
//! problems (a matrix that must be positive-definite is not, a factorization
//! fails) that surface at the exact operation that breaks.
//!
//! Key behaviors
//! -------------
//! - [`ConfigError`] enumerates invalid inputs with the offending values.
//! - [`NumericalError`] enumerates failed factorizations and non-finite
//!   results, tagged with the operation that produced them.
//! - [`BvarError`] wraps both and adds the location of a failure inside a
//!   longer computation (Gibbs iteration, IRF draw and horizon).
//!
//! Conventions
//! -----------
//! - Indices in messages are 0-based, except Gibbs iterations, which are
//!   reported 1-based to match the `1..=iterations` loop.
//! - Low-level kernels return [`NumericalResult`]; everything callers touch
//!   returns [`BvarResult`].

/// Crate-wide result alias.
pub type BvarResult<T> = Result<T, BvarError>;

/// Result alias for linear-algebra kernels and single sampler steps.
pub type NumericalResult<T> = Result<T, NumericalError>;

/// Unified error type for estimation and post-estimation analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum BvarError {
    /// Invalid configuration detected before any computation ran.
    Configuration(ConfigError),

    /// Numerical failure in a standalone kernel or sampler call.
    Numerical(NumericalError),

    /// A Gibbs chain aborted; no draws from the chain are returned.
    SamplerFailed { chain: usize, iteration: usize, source: NumericalError },

    /// An impulse-response request aborted on a single draw.
    ImpulseResponseFailed { draw: usize, horizon: Option<usize>, source: NumericalError },
}

impl BvarError {
    /// `true` for failures caused by invalid inputs.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BvarError::Configuration(_))
    }

    /// `true` for failures raised by a numerical operation.
    pub fn is_numerical(&self) -> bool {
        !self.is_configuration()
    }
}

impl std::error::Error for BvarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BvarError::Configuration(err) => Some(err),
            BvarError::Numerical(err) => Some(err),
            BvarError::SamplerFailed { source, .. } => Some(source),
            BvarError::ImpulseResponseFailed { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for BvarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BvarError::Configuration(err) => write!(f, "Configuration error: {err}"),
            BvarError::Numerical(err) => write!(f, "Numerical error: {err}"),
            BvarError::SamplerFailed { chain, iteration, source } => {
                write!(f, "Gibbs chain {chain} failed at iteration {iteration}: {source}")
            }
            BvarError::ImpulseResponseFailed { draw, horizon: Some(h), source } => {
                write!(f, "Impulse response failed for draw {draw} at horizon {h}: {source}")
            }
            BvarError::ImpulseResponseFailed { draw, horizon: None, source } => {
                write!(f, "Impulse response failed for draw {draw}: {source}")
            }
        }
    }
}

impl From<ConfigError> for BvarError {
    fn from(err: ConfigError) -> BvarError {
        BvarError::Configuration(err)
    }
}

impl From<NumericalError> for BvarError {
    fn from(err: NumericalError) -> BvarError {
        BvarError::Numerical(err)
    }
}

/// Invalid shapes, names, and options.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    // ---- Data ----
    /// Series has no observations or no variables.
    EmptySeries,

    /// A data point is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Variable names do not match the number of series.
    NameCountMismatch { expected: usize, actual: usize },

    /// The same variable name appears twice.
    DuplicateName { name: String },

    /// Lag order must be at least one.
    InvalidLagOrder { p: usize },

    /// Not enough observations for the requested lag order.
    InsufficientObservations { observations: usize, p: usize },

    // ---- Shapes ----
    /// A matrix or vector has the wrong dimensions.
    ShapeMismatch { what: &'static str, expected: (usize, usize), actual: (usize, usize) },

    /// A matrix that must be symmetric is not.
    NotSymmetric { what: &'static str, row: usize, col: usize },

    /// Non-finite entry in a prior or option.
    NonFiniteInput { what: &'static str, value: f64 },

    // ---- Priors / options ----
    /// A required prior field was not supplied.
    MissingPriorField { field: &'static str },

    /// Scalar coefficient prior precision must be finite and non-negative.
    InvalidPrecision { value: f64 },

    /// Prior degrees of freedom below the dimension of Σ.
    InvalidDegreesOfFreedom { df: f64, k: usize },

    /// Burn-in must leave at least one iteration to store.
    InvalidIterations { iterations: usize, burnin: usize },

    /// Thinning interval must be positive.
    InvalidThin { thin: usize },

    /// At least one chain is required.
    InvalidChainCount { chains: usize },

    // ---- Results / analysis ----
    /// Draw collections disagree in length.
    DrawCountMismatch { what: &'static str, expected: usize, actual: usize },

    /// Container holds no draws.
    NoDraws,

    /// Draw index outside `0..draws`.
    DrawIndexOutOfRange { index: usize, draws: usize },

    /// Variable name not present among the series.
    UnknownVariable { name: String },

    /// Variable index outside `0..k`.
    VariableIndexOutOfRange { index: usize, k: usize },

    /// Credible level must lie strictly inside (0, 1).
    InvalidCredibleLevel { level: f64 },

    /// Chains disagree on model dimensions.
    IncompatibleChains { reason: &'static str },

    /// Too few draws for a diagnostic.
    InsufficientDraws { required: usize, actual: usize },

    /// Unrecognized impulse-response type name.
    InvalidIrfKind { name: String },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Data ----
            ConfigError::EmptySeries => write!(f, "Input series is empty."),
            ConfigError::NonFiniteData { row, col, value } => {
                write!(f, "Data point at ({row}, {col}) is non-finite: {value}")
            }
            ConfigError::NameCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} variable names, got {actual}")
            }
            ConfigError::DuplicateName { name } => {
                write!(f, "Variable name '{name}' appears more than once")
            }
            ConfigError::InvalidLagOrder { p } => {
                write!(f, "Lag order must be at least 1; got {p}")
            }
            ConfigError::InsufficientObservations { observations, p } => {
                write!(f, "{observations} observations are not enough for a VAR({p})")
            }
            // ---- Shapes ----
            ConfigError::ShapeMismatch { what, expected, actual } => {
                write!(
                    f,
                    "{what} has shape {}x{}; expected {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            ConfigError::NotSymmetric { what, row, col } => {
                write!(f, "{what} must be symmetric; entries ({row}, {col}) and ({col}, {row}) differ")
            }
            ConfigError::NonFiniteInput { what, value } => {
                write!(f, "{what} must be finite; got {value}")
            }
            // ---- Priors / options ----
            ConfigError::MissingPriorField { field } => {
                write!(f, "Required prior field '{field}' was not supplied")
            }
            ConfigError::InvalidPrecision { value } => {
                write!(f, "Coefficient prior precision must be finite and >= 0; got {value}")
            }
            ConfigError::InvalidDegreesOfFreedom { df, k } => {
                write!(f, "Prior degrees of freedom must be finite and >= {k}; got {df}")
            }
            ConfigError::InvalidIterations { iterations, burnin } => {
                write!(f, "Iterations ({iterations}) must exceed burn-in ({burnin})")
            }
            ConfigError::InvalidThin { thin } => {
                write!(f, "Thinning interval must be at least 1; got {thin}")
            }
            ConfigError::InvalidChainCount { chains } => {
                write!(f, "At least one chain is required; got {chains}")
            }
            // ---- Results / analysis ----
            ConfigError::DrawCountMismatch { what, expected, actual } => {
                write!(f, "{what}: expected {expected} draws, got {actual}")
            }
            ConfigError::NoDraws => write!(f, "Results container holds no draws."),
            ConfigError::DrawIndexOutOfRange { index, draws } => {
                write!(f, "Draw index {index} is out of range for {draws} stored draws")
            }
            ConfigError::UnknownVariable { name } => {
                write!(f, "Variable '{name}' is not among the series")
            }
            ConfigError::VariableIndexOutOfRange { index, k } => {
                write!(f, "Variable index {index} is out of range for {k} series")
            }
            ConfigError::InvalidCredibleLevel { level } => {
                write!(f, "Credible level must lie in (0, 1); got {level}")
            }
            ConfigError::IncompatibleChains { reason } => {
                write!(f, "Chains cannot be combined: {reason}")
            }
            ConfigError::InsufficientDraws { required, actual } => {
                write!(f, "At least {required} draws per chain are required; got {actual}")
            }
            ConfigError::InvalidIrfKind { name } => {
                write!(f, "Unknown impulse-response type '{name}'; expected 'feir', 'oir' or 'gir'")
            }
        }
    }
}

/// Failed factorizations and non-finite numerical output.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalError {
    /// Cholesky factorization failed; the matrix is not positive-definite.
    NotPositiveDefinite { what: &'static str },

    /// A computation produced NaN/±inf.
    NonFiniteResult { what: &'static str },

    /// Wishart/chi-squared parameters rejected by the sampler backend.
    InvalidDistribution { what: &'static str, df: f64 },
}

impl std::error::Error for NumericalError {}

impl std::fmt::Display for NumericalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericalError::NotPositiveDefinite { what } => {
                write!(f, "{what} is not positive-definite")
            }
            NumericalError::NonFiniteResult { what } => {
                write!(f, "{what} contains non-finite values")
            }
            NumericalError::InvalidDistribution { what, df } => {
                write!(f, "Cannot sample {what} with {df} degrees of freedom")
            }
        }
    }
}
