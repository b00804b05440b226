//! Synthesis of spatial modes and temporal coefficients.
//!
//! Method-of-snapshots recovery: each spatial mode is a linear combination
//! of snapshot columns weighted by its normalised temporal coefficients.
//! Modes are independent of one another, so the loop over retained modes is
//! data-parallel — each task owns exactly one chronos row and one mode
//! column of the output.

use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Compute the retained spatial modes and their chronos.
///
/// For retained mode `i` and snapshot `j`:
///
/// ```text
/// factor       = λ[i] * T
/// chronos[i,j] = sqrt(factor) * v[j,i]
/// mode[:,i]   += (chronos[i,j] / factor) * M[:,j]
/// ```
///
/// Returns `(modes, chronos)` with shapes `(rows·vars, mode_count)` and
/// `(mode_count, T)`. The per-column accumulation over `j` is sequential,
/// so results are deterministic for fixed inputs.
///
/// The division by `factor` is unconditional: eigenvalues at or below zero
/// (possible after SPOD filtering) propagate as non-finite entries rather
/// than being clamped. RIC truncation normally discards such modes first.
pub fn compute_modes(
    snapshots: &Array2<f64>,
    eigenvalues: &Array1<f64>,
    eigenvectors: &Array2<f64>,
    mode_count: usize,
) -> (Array2<f64>, Array2<f64>) {
    let space_size = snapshots.nrows();
    let snapshot_count = snapshots.ncols();

    let per_mode: Vec<(Array1<f64>, Array1<f64>)> = (0..mode_count)
        .into_par_iter()
        .map(|i| {
            let factor = eigenvalues[i] * snapshot_count as f64;
            let amplitude = factor.sqrt();

            let mut chronos_row = Array1::<f64>::zeros(snapshot_count);
            let mut mode_column = Array1::<f64>::zeros(space_size);

            for j in 0..snapshot_count {
                let coefficient = amplitude * eigenvectors[[j, i]];
                chronos_row[j] = coefficient;
                mode_column.scaled_add(coefficient / factor, &snapshots.column(j));
            }

            (mode_column, chronos_row)
        })
        .collect();

    let mut modes = Array2::<f64>::zeros((space_size, mode_count));
    let mut chronos = Array2::<f64>::zeros((mode_count, snapshot_count));
    for (i, (mode_column, chronos_row)) in per_mode.into_iter().enumerate() {
        modes.column_mut(i).assign(&mode_column);
        chronos.row_mut(i).assign(&chronos_row);
    }

    (modes, chronos)
}
