//! The snapshot POD pipeline.
//!
//! Stages, in order: normalised temporal Gram matrix ([`gram`]), optional
//! SPOD smoothing ([`spectral`]), symmetric eigendecomposition sorted by
//! descending eigenvalue ([`eigen`]), energy-based truncation
//! ([`truncate`]), and synthesis of spatial modes and temporal coefficients
//! ([`modes`]). [`decompose`] runs them all.

pub mod eigen;
pub mod gram;
pub mod modes;
pub mod spectral;
pub mod truncate;

use ndarray::Array2;
use thiserror::Error;

use crate::types::{Decomposition, PodSettings};

/// Errors that can occur during a decomposition.
#[derive(Debug, Error)]
pub enum PodError {
    #[error("Eigendecomposition failed to converge: {0}")]
    EigenFailure(String),

    #[error("Invalid snapshot data: {0}")]
    InvalidInput(String),
}

/// Run the full method-of-snapshots decomposition.
///
/// `snapshots` has shape `(rows * variable_count, snapshot_count)`: one
/// column per time sample, row index encoding
/// `spatial_index + rows * variable_index`. The matrix is read-only here.
///
/// On eigensolver failure an error is returned and no result exists to
/// persist — callers that write results only do so after this returns `Ok`.
pub fn decompose(
    snapshots: &Array2<f64>,
    settings: &PodSettings,
) -> Result<Decomposition, PodError> {
    let snapshot_count = snapshots.ncols();
    if snapshot_count == 0 {
        return Err(PodError::InvalidInput("no snapshot columns".into()));
    }

    // A run cannot request more modes than available snapshots.
    let mut requested = settings.requested_modes;
    if requested > snapshot_count {
        log::info!(
            "requested modes ({}) exceed available snapshots ({}); adjusted",
            requested,
            snapshot_count
        );
        requested = snapshot_count;
    }

    let mut projection = gram::projection_matrix(snapshots);

    if let Some(filter) = &settings.filter {
        let kernel = spectral::build_kernel(filter.kind, filter.half_width);
        projection = spectral::filter_projection_matrix(&projection, &kernel);
    }

    let (eigenvalues, eigenvectors) = eigen::sorted_eigenpairs(&projection)?;

    let ric_count = truncate::ric_mode_count(&eigenvalues, settings.target_ric);
    let selected = ric_count.min(requested);

    let (spatial_modes, chronos) =
        modes::compute_modes(snapshots, &eigenvalues, &eigenvectors, selected);

    Ok(Decomposition {
        eigenvalues,
        chronos,
        modes: spatial_modes,
        selected_modes: selected,
    })
}
