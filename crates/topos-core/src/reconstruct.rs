//! Reconstruction of fields from a stored mode basis.
//!
//! Given spatial modes $\Phi$ and a fresh set of snapshots $M$, the
//! projection coefficients and the recombined field are
//!
//! $$ c_{kl} = \sum_{j} \sum_{i} \Phi_{i + R j,\,l} \, M_{i + R j,\,k},
//!    \qquad \tilde{M}_{:,k} = \sum_{l} c_{kl} \, \Phi_{:,l} $$
//!
//! where `R` is the spatial row count and `j` runs over variable blocks.
//! The coefficients are plain inner products against the mode columns, not
//! eigenvalue-normalised POD coefficients.

use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Project each snapshot column onto each mode column.
///
/// `modes` has shape `(rows * variable_count, mode_count)` and `snapshots`
/// `(rows * variable_count, snapshot_count)`; both use the
/// `spatial_index + rows * variable_index` row layout. Returns the
/// coefficient matrix, shape `(snapshot_count, mode_count)`.
///
/// Parallel over modes — each task owns one output column. The inner sums
/// run variable-block by variable-block, spatial index innermost, so the
/// per-element summation order is fixed and results are deterministic.
pub fn project_coefficients(
    modes: &Array2<f64>,
    snapshots: &Array2<f64>,
    rows: usize,
    variable_count: usize,
) -> Array2<f64> {
    let mode_count = modes.ncols();
    let snapshot_count = snapshots.ncols();

    let per_mode: Vec<Array1<f64>> = (0..mode_count)
        .into_par_iter()
        .map(|l| {
            let mut column = Array1::<f64>::zeros(snapshot_count);
            for k in 0..snapshot_count {
                let mut acc = 0.0;
                for j in 0..variable_count {
                    for i in 0..rows {
                        let row = i + rows * j;
                        acc += modes[[row, l]] * snapshots[[row, k]];
                    }
                }
                column[k] = acc;
            }
            column
        })
        .collect();

    let mut coefficients = Array2::<f64>::zeros((snapshot_count, mode_count));
    for (l, column) in per_mode.into_iter().enumerate() {
        coefficients.column_mut(l).assign(&column);
    }
    coefficients
}

/// Recombine reconstructed fields from modes and projection coefficients.
///
/// Returns a matrix of shape `(rows * variable_count, snapshot_count)` in
/// the same row layout as the input snapshots. Parallel over snapshots —
/// each task owns one output column; the sum over modes is sequential.
pub fn reconstruct_fields(modes: &Array2<f64>, coefficients: &Array2<f64>) -> Array2<f64> {
    let space_size = modes.nrows();
    let mode_count = modes.ncols();
    let snapshot_count = coefficients.nrows();

    let per_snapshot: Vec<Array1<f64>> = (0..snapshot_count)
        .into_par_iter()
        .map(|k| {
            let mut column = Array1::<f64>::zeros(space_size);
            for l in 0..mode_count {
                column.scaled_add(coefficients[[k, l]], &modes.column(l));
            }
            column
        })
        .collect();

    let mut reconstructed = Array2::<f64>::zeros((space_size, snapshot_count));
    for (k, column) in per_snapshot.into_iter().enumerate() {
        reconstructed.column_mut(k).assign(&column);
    }
    reconstructed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_coefficients_are_inner_products() {
        // Two variables on two spatial points: rows = 2, layout i + 2j.
        let modes = array![[1.0, 0.0], [0.0, 1.0], [0.0, 0.0], [2.0, 0.0]];
        let snapshots = array![[3.0], [4.0], [5.0], [6.0]];
        let c = project_coefficients(&modes, &snapshots, 2, 2);

        assert_eq!(c.dim(), (1, 2));
        // <mode0, snap0> = 1*3 + 2*6 = 15; <mode1, snap0> = 1*4.
        assert_relative_eq!(c[[0, 0]], 15.0, epsilon = 1e-14);
        assert_relative_eq!(c[[0, 1]], 4.0, epsilon = 1e-14);
    }

    #[test]
    fn test_reconstruct_combines_mode_columns() {
        let modes = array![[1.0, 0.0], [0.0, 2.0]];
        let coefficients = array![[3.0, 0.5], [-1.0, 1.0]];
        let rec = reconstruct_fields(&modes, &coefficients);

        assert_eq!(rec.dim(), (2, 2));
        assert_relative_eq!(rec[[0, 0]], 3.0, epsilon = 1e-14);
        assert_relative_eq!(rec[[1, 0]], 1.0, epsilon = 1e-14);
        assert_relative_eq!(rec[[0, 1]], -1.0, epsilon = 1e-14);
        assert_relative_eq!(rec[[1, 1]], 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_projection_onto_orthonormal_basis_is_lossless() {
        // Snapshots lying in the span of an orthonormal mode basis come
        // back exactly: project then recombine is the identity there.
        let modes = array![
            [1.0, 0.0],
            [0.0, 1.0],
            [0.0, 0.0]
        ];
        let snapshots = array![
            [0.7, -2.0],
            [1.3, 0.4],
            [0.0, 0.0]
        ];
        let c = project_coefficients(&modes, &snapshots, 3, 1);
        let rec = reconstruct_fields(&modes, &c);
        for (a, b) in rec.iter().zip(snapshots.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }
}
