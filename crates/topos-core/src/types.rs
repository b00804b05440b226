//! Core types shared across the Topos framework.
//!
//! This module defines the settings consumed by the decomposition pipeline
//! and the containers its results are returned in. Settings are plain value
//! objects constructed once by the caller (typically the CLI) and passed by
//! reference into the pipeline; nothing here is mutated after construction.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Shape of the SPOD smoothing kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Uniform (box) kernel: every tap carries the same weight.
    Box,
    /// Truncated Gaussian: `exp(-x²)` sampled over a fixed span of
    /// ±2.285 standard deviations across the kernel support.
    Gaussian,
}

/// SPOD filter configuration. The kernel has `2 * half_width + 1` taps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpectralSettings {
    pub kind: FilterKind,
    pub half_width: usize,
}

/// Parameters defining a decomposition run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodSettings {
    /// Number of modes requested by the caller. Clamped to the snapshot
    /// count before RIC truncation is applied.
    pub requested_modes: usize,
    /// Relative information content target in `(0, 1]`: the fraction of
    /// cumulative eigenvalue-magnitude energy to retain.
    pub target_ric: f64,
    /// Optional SPOD smoothing of the temporal correlation matrix.
    pub filter: Option<SpectralSettings>,
}

impl Default for PodSettings {
    fn default() -> Self {
        Self {
            requested_modes: usize::MAX,
            target_ric: 0.9,
            filter: None,
        }
    }
}

/// Results of a decomposition run.
///
/// `eigenvalues` always covers the full spectrum (one per snapshot) so that
/// the persisted `eigenValues.bin` matches the original contract; `chronos`
/// and `modes` are truncated to the selected mode count.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// All eigenvalues of the (filtered) projection matrix, descending.
    pub eigenvalues: Array1<f64>,
    /// Temporal coefficients, shape `(selected_modes, snapshot_count)`.
    /// Each row is one mode's time history.
    pub chronos: Array2<f64>,
    /// Spatial mode shapes, shape `(rows * variable_count, selected_modes)`.
    pub modes: Array2<f64>,
    /// Number of modes retained after RIC truncation and the request cap.
    pub selected_modes: usize,
}
