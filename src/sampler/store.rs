//! Ordered storage of retained Gibbs draws.
use crate::sampler::{coefficients::CoefficientDraw, covariance::CovarianceDraw};
use ndarray::Array1;

/// One retained Gibbs iteration.
///
/// Fields
/// ------
/// - `coefficients`: draw of `vec(A)`.
/// - `covariance`: `(Σ, Σ⁻¹)` drawn in the same iteration.
/// - `log_likelihood`: per-observation log-densities under this iteration's
///   `(A, Σ)`, or `None` when likelihood tracking is off.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub coefficients: CoefficientDraw,
    pub covariance: CovarianceDraw,
    pub log_likelihood: Option<Array1<f64>>,
}

/// DrawStore — append-only sequence of [`Draw`]s in iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawStore {
    draws: Vec<Draw>,
}

impl DrawStore {
    pub fn new() -> DrawStore {
        DrawStore::default()
    }

    pub fn with_capacity(capacity: usize) -> DrawStore {
        DrawStore { draws: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, draw: Draw) {
        self.draws.push(draw);
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Draw> {
        self.draws.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Draw> {
        self.draws.iter()
    }

    pub fn as_slice(&self) -> &[Draw] {
        &self.draws
    }

    /// Append all draws of `other`, preserving order.
    pub fn extend(&mut self, other: DrawStore) {
        self.draws.extend(other.draws);
    }
}

impl From<Vec<Draw>> for DrawStore {
    fn from(draws: Vec<Draw>) -> DrawStore {
        DrawStore { draws }
    }
}

impl<'a> IntoIterator for &'a DrawStore {
    type Item = &'a Draw;
    type IntoIter = std::slice::Iter<'a, Draw>;

    fn into_iter(self) -> Self::IntoIter {
        self.draws.iter()
    }
}
