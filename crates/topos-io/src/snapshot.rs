//! Point-cloud snapshot files.
//!
//! A snapshot file holds one line per spatial point, whitespace-delimited
//! numeric columns. The first `column_offset` tokens of each line are
//! skipped; the next `variable_count` tokens are the data. The spatial size
//! is established once from a reference file (the first in the list) and
//! every other file is required to match it.
//!
//! Loading is data-parallel: one task per file, each owning exactly one
//! column of the snapshot matrix.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use rayon::prelude::*;
use thiserror::Error;

/// Errors during snapshot file probing or loading.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("{path}: parse error at line {line}: {message}")]
    Format {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Reference file {0} has no rows")]
    EmptyReference(PathBuf),

    #[error("No snapshot files were given")]
    NoSnapshots,
}

/// Spatial row count and raw column count of one snapshot file, assumed
/// identical across all snapshots of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointCloudInfo {
    /// Number of spatial points (lines).
    pub rows: usize,
    /// Raw whitespace-delimited column count of the first line.
    pub columns: usize,
}

/// What to do when a snapshot file cannot be opened or parsed.
///
/// `BestEffort` reproduces the historical behaviour: the failure is logged
/// once and the affected matrix column stays zero. `Strict` fails the whole
/// load on the first bad file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFilePolicy {
    #[default]
    BestEffort,
    Strict,
}

/// Establish the spatial size from a reference snapshot file.
///
/// `rows` is the line count, `columns` the whitespace-token count of the
/// first line. An unreadable or empty reference is always an error — the
/// snapshot matrix cannot be shaped without it, whatever the policy.
pub fn probe_point_cloud(path: &Path) -> Result<PointCloudInfo, SnapshotError> {
    let content = std::fs::read_to_string(path)?;
    let mut lines = content.lines();

    let first = lines
        .next()
        .ok_or_else(|| SnapshotError::EmptyReference(path.to_path_buf()))?;
    let columns = first.split_whitespace().count();
    let rows = 1 + lines.count();

    Ok(PointCloudInfo { rows, columns })
}

/// Parse one snapshot file into a flat column of length
/// `rows * variable_count`, laid out as `spatial_index + rows * variable_index`.
fn parse_point_cloud(
    path: &Path,
    info: &PointCloudInfo,
    variable_count: usize,
    column_offset: usize,
) -> Result<Vec<f64>, SnapshotError> {
    let content = std::fs::read_to_string(path)?;
    let mut data = vec![0.0; info.rows * variable_count];

    let mut row = 0;
    for (line_idx, line) in content.lines().enumerate() {
        if row >= info.rows {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < column_offset + variable_count {
            return Err(SnapshotError::Format {
                path: path.to_path_buf(),
                line: line_idx + 1,
                message: format!(
                    "expected at least {} columns, found {}",
                    column_offset + variable_count,
                    tokens.len()
                ),
            });
        }
        for variable in 0..variable_count {
            let token = tokens[column_offset + variable];
            let value: f64 = token.parse().map_err(|_| SnapshotError::Format {
                path: path.to_path_buf(),
                line: line_idx + 1,
                message: format!("invalid number: {token}"),
            })?;
            data[row + info.rows * variable] = value;
        }
        row += 1;
    }

    if row != info.rows {
        return Err(SnapshotError::Format {
            path: path.to_path_buf(),
            line: row,
            message: format!("expected {} rows, found {}", info.rows, row),
        });
    }

    Ok(data)
}

/// Load every snapshot file into a single matrix of shape
/// `(rows * variable_count, snapshot_count)`.
///
/// The first path is the reference file that fixes the spatial size. Files
/// are parsed in parallel, one task per file; each task owns one column of
/// the output, so no synchronisation is needed. Per-file failures are
/// routed through `policy`; under [`MissingFilePolicy::BestEffort`] a
/// warning is emitted exactly once per failing file and its column stays
/// zero, so the output shape is fixed regardless of per-file anomalies.
pub fn load_snapshot_matrix(
    paths: &[PathBuf],
    variable_count: usize,
    column_offset: usize,
    policy: MissingFilePolicy,
) -> Result<(Array2<f64>, PointCloudInfo), SnapshotError> {
    let reference = paths.first().ok_or(SnapshotError::NoSnapshots)?;
    let info = probe_point_cloud(reference)?;
    if info.rows == 0 {
        return Err(SnapshotError::EmptyReference(reference.clone()));
    }

    let columns: Vec<Result<Vec<f64>, SnapshotError>> = paths
        .par_iter()
        .map(|path| parse_point_cloud(path, &info, variable_count, column_offset))
        .collect();

    let mut matrix = Array2::<f64>::zeros((info.rows * variable_count, paths.len()));
    for (snapshot, column) in columns.into_iter().enumerate() {
        match column {
            Ok(values) => {
                for (row, value) in values.into_iter().enumerate() {
                    matrix[[row, snapshot]] = value;
                }
            }
            Err(err) => match policy {
                MissingFilePolicy::Strict => return Err(err),
                MissingFilePolicy::BestEffort => {
                    log::warn!(
                        "unable to load snapshot file {}: {err}; column left zero",
                        paths[snapshot].display()
                    );
                }
            },
        }
    }

    Ok((matrix, info))
}
