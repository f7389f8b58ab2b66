//! Copies between `ndarray` and `nalgebra` containers.
//!
//! `ndarray` is the storage type of the public API; `nalgebra` supplies the
//! Cholesky and triangular solves. Conversions are plain element copies, done
//! column by column to follow `DMatrix`'s column-major layout.
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Copy a 2-D `ndarray` view into a freshly allocated `DMatrix`.
pub fn to_dmatrix(a: ArrayView2<'_, f64>) -> DMatrix<f64> {
    let (rows, cols) = a.dim();
    let mut out = DMatrix::<f64>::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            out[(i, j)] = a[[i, j]];
        }
    }
    out
}

/// Copy a `DMatrix` back into an owned `Array2`.
pub fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

pub fn to_dvector(v: ArrayView1<'_, f64>) -> DVector<f64> {
    DVector::from_iterator(v.len(), v.iter().copied())
}

pub fn from_dvector(v: &DVector<f64>) -> Array1<f64> {
    Array1::from_iter(v.iter().copied())
}
