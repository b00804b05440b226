//! Normalised temporal Gram (projection) matrix.

use ndarray::Array2;

/// Compute the normalised projection matrix
/// $P = \frac{1}{T} M^{\mathsf{T}} M$
/// from a snapshot matrix `M` with one column per time sample.
///
/// The result is symmetric and positive-semidefinite, shape `(T, T)`.
pub fn projection_matrix(snapshots: &Array2<f64>) -> Array2<f64> {
    let snapshot_count = snapshots.ncols();
    snapshots.t().dot(snapshots) / snapshot_count as f64
}
