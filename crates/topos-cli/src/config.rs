//! Immutable run configuration built once from the parsed command line.

use std::path::{Path, PathBuf};

use topos_core::types::{FilterKind, SpectralSettings};
use topos_io::snapshot::MissingFilePolicy;

/// Configuration for a decomposition run.
#[derive(Debug, Clone)]
pub struct DecomposeConfig {
    pub variables: usize,
    pub column_offset: usize,
    pub requested_modes: usize,
    pub target_ric: f64,
    pub filter: Option<SpectralSettings>,
    pub policy: MissingFilePolicy,
    pub times_file: PathBuf,
    pub input_dir: PathBuf,
    pub data_file: String,
    pub chronos_dir: PathBuf,
    pub modes_dir: PathBuf,
}

/// Configuration for a reconstruction run.
#[derive(Debug, Clone)]
pub struct ReconstructConfig {
    pub variables: usize,
    pub column_offset: usize,
    pub policy: MissingFilePolicy,
    pub times_file: PathBuf,
    pub input_dir: PathBuf,
    pub data_file: String,
    pub modes_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Map the numeric SPOD selector onto filter settings: 0 disables the
/// filter, 1 selects the box kernel, 2 the truncated Gaussian.
pub fn spectral_settings(spod_type: u8, half_width: usize) -> Option<SpectralSettings> {
    match spod_type {
        0 => None,
        1 => Some(SpectralSettings {
            kind: FilterKind::Box,
            half_width,
        }),
        _ => Some(SpectralSettings {
            kind: FilterKind::Gaussian,
            half_width,
        }),
    }
}

pub fn policy_from_flag(strict: bool) -> MissingFilePolicy {
    if strict {
        MissingFilePolicy::Strict
    } else {
        MissingFilePolicy::BestEffort
    }
}

/// Form one snapshot path per time entry: `<input>/<entry>/<data-file>`.
pub fn snapshot_paths(input_dir: &Path, entries: &[String], data_file: &str) -> Vec<PathBuf> {
    entries
        .iter()
        .map(|entry| input_dir.join(entry).join(data_file))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spod_selector_mapping() {
        assert!(spectral_settings(0, 5).is_none());
        let box_filter = spectral_settings(1, 3).unwrap();
        assert_eq!(box_filter.kind, FilterKind::Box);
        assert_eq!(box_filter.half_width, 3);
        let gauss = spectral_settings(2, 7).unwrap();
        assert_eq!(gauss.kind, FilterKind::Gaussian);
    }

    #[test]
    fn test_snapshot_paths_follow_layout() {
        let entries = vec!["0.01".to_string(), "0.02".to_string()];
        let paths = snapshot_paths(Path::new("data"), &entries, "cloud.dat");
        assert_eq!(paths[0], Path::new("data/0.01/cloud.dat"));
        assert_eq!(paths[1], Path::new("data/0.02/cloud.dat"));
    }
}
