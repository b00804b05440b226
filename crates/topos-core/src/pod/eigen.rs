//! Symmetric eigendecomposition of the projection matrix.
//!
//! Uses `faer`'s self-adjoint solver and reorders the eigenpairs to
//! descending eigenvalue order (the solver's natural order is ascending).

use faer::{Mat, Side};
use ndarray::{Array1, Array2};

use super::PodError;

fn array_to_faer(array: &Array2<f64>) -> Mat<f64> {
    let (rows, cols) = array.dim();
    Mat::from_fn(rows, cols, |i, j| array[[i, j]])
}

/// Compute all eigenvalues and eigenvectors of a symmetric matrix, sorted
/// by descending eigenvalue. Eigenvector columns are reordered to match.
///
/// Only the lower triangle of `projection` is read; the caller guarantees
/// symmetry (the Gram matrix and its filtered form both are).
///
/// A solver convergence failure is returned as
/// [`PodError::EigenFailure`] — the caller decides whether that ends the
/// run. No partial results escape this function.
pub fn sorted_eigenpairs(
    projection: &Array2<f64>,
) -> Result<(Array1<f64>, Array2<f64>), PodError> {
    let n = projection.nrows();
    let matrix = array_to_faer(projection);

    let eig = matrix
        .as_ref()
        .self_adjoint_eigen(Side::Lower)
        .map_err(|err| PodError::EigenFailure(format!("{err:?}")))?;

    let diag = eig.S();
    let vectors = eig.U();

    // Argsort descending; stable so equal eigenvalues keep solver order.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| diag[b].partial_cmp(&diag[a]).unwrap_or(std::cmp::Ordering::Equal));

    let eigenvalues = Array1::from_shape_fn(n, |i| diag[order[i]]);
    let eigenvectors = Array2::from_shape_fn((n, n), |(i, j)| vectors[(i, order[j])]);

    Ok((eigenvalues, eigenvectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_diagonal_matrix_eigenpairs() {
        let p = array![[1.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 2.0]];
        let (values, vectors) = sorted_eigenpairs(&p).unwrap();

        assert_relative_eq!(values[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(values[1], 2.0, epsilon = 1e-12);
        assert_relative_eq!(values[2], 1.0, epsilon = 1e-12);

        // Each eigenvector is a signed unit basis vector matching its value.
        assert_relative_eq!(vectors[[1, 0]].abs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(vectors[[2, 1]].abs(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(vectors[[0, 2]].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eigenvalues_descending_and_trace_preserved() {
        let p = array![
            [2.0, 0.5, 0.1],
            [0.5, 1.5, 0.3],
            [0.1, 0.3, 1.0]
        ];
        let (values, _) = sorted_eigenpairs(&p).unwrap();
        for w in values.windows(2) {
            assert!(w[0] >= w[1] - 1e-12, "eigenvalues must be non-increasing");
        }
        let trace = 2.0 + 1.5 + 1.0;
        assert_relative_eq!(values.sum(), trace, epsilon = 1e-10);
    }

    #[test]
    fn test_eigenvectors_orthonormal() {
        let p = array![
            [4.0, 1.0, 0.0, 0.2],
            [1.0, 3.0, 0.5, 0.0],
            [0.0, 0.5, 2.0, 0.3],
            [0.2, 0.0, 0.3, 1.0]
        ];
        let (_, vectors) = sorted_eigenpairs(&p).unwrap();
        let gram = vectors.t().dot(&vectors);
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(gram[[i, j]], expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_reconstruction_from_eigenpairs() {
        // P = V Λ Vᵀ must hold after the descending reorder.
        let p = array![[2.0, -1.0], [-1.0, 2.0]];
        let (values, vectors) = sorted_eigenpairs(&p).unwrap();
        let lambda = Array2::from_diag(&values);
        let rebuilt = vectors.dot(&lambda).dot(&vectors.t());
        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(rebuilt[[i, j]], p[[i, j]], epsilon = 1e-10);
            }
        }
    }
}
