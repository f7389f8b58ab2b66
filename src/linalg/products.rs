//! Kronecker and cross products for the conjugate coefficient update.
//!
//! With `y = A x + u`, `u ~ N(0, Σ)` and `a = vec(A)` stacked column-major,
//! the likelihood contributes `(x xᵀ) ⊗ Σ⁻¹` to the precision of `a`. These
//! helpers build exactly those two pieces.
use ndarray::{Array2, ArrayView2};

/// Kronecker product `a ⊗ b`.
pub fn kron(a: ArrayView2<'_, f64>, b: ArrayView2<'_, f64>) -> Array2<f64> {
    ndarray::linalg::kron(&a, &b)
}

/// `x xᵀ` (R's `tcrossprod`), symmetric by construction.
pub fn tcrossprod(x: ArrayView2<'_, f64>) -> Array2<f64> {
    x.dot(&x.t())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Verify block layout of the Kronecker product.
    //
    // Given
    // -----
    // - `a = [[1, 2], [3, 4]]`, `b = I₂`.
    //
    // Expect
    // ------
    // - Block (i, j) equals `a[i, j] · b`.
    fn kron_places_scaled_blocks() {
        // Arrange
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 0.0], [0.0, 1.0]];

        // Act
        let k = kron(a.view(), b.view());

        // Assert
        assert_eq!(k.dim(), (4, 4));
        assert_eq!(k[[0, 2]], 2.0);
        assert_eq!(k[[1, 3]], 2.0);
        assert_eq!(k[[0, 3]], 0.0);
        assert_eq!(k[[3, 1]], 3.0);
        assert_eq!(k[[3, 3]], 4.0);
    }

    #[test]
    fn tcrossprod_sums_outer_products_of_columns() {
        let x = array![[1.0, 2.0, 0.0], [0.0, 1.0, -1.0]];
        let xx = tcrossprod(x.view());
        assert_eq!(xx, array![[5.0, 2.0], [2.0, 2.0]]);
    }
}
