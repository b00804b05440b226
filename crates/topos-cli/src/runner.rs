//! Pipeline runners: tie together snapshot loading, the core numerics, and
//! binary persistence, with staged progress reporting.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use topos_core::pod;
use topos_core::reconstruct::{project_coefficients, reconstruct_fields};
use topos_core::types::PodSettings;
use topos_io::snapshot::MissingFilePolicy;
use topos_io::{binary, snapshot, timelist};

use crate::config::{self, DecomposeConfig, ReconstructConfig};

/// Run a full decomposition: load snapshots, decompose, persist results.
///
/// Nothing is written unless the decomposition succeeds; a write failure on
/// one output is skipped with a warning under the best-effort policy and
/// aborts the run under the strict policy.
pub fn run_decomposition(cfg: &DecomposeConfig) -> Result<()> {
    println!("Starting POD routine");

    let entries = timelist::read_time_entries(&cfg.times_file)
        .with_context(|| format!("reading times file {}", cfg.times_file.display()))?;
    anyhow::ensure!(!entries.is_empty(), "times file lists no snapshots");
    let paths = config::snapshot_paths(&cfg.input_dir, &entries, &cfg.data_file);

    let start = Instant::now();
    println!("Reading {} snapshot files...", paths.len());
    let (snapshots, info) =
        snapshot::load_snapshot_matrix(&paths, cfg.variables, cfg.column_offset, cfg.policy)?;
    println!("  done in {:.3}s", start.elapsed().as_secs_f64());
    println!(
        "Files have {} rows and {} columns; data read from columns {} to {}.",
        info.rows,
        info.columns,
        cfg.column_offset + 1,
        cfg.column_offset + cfg.variables
    );

    let settings = PodSettings {
        requested_modes: cfg.requested_modes,
        target_ric: cfg.target_ric,
        filter: cfg.filter,
    };
    let start = Instant::now();
    println!("Computing decomposition...");
    let result = pod::decompose(&snapshots, &settings)?;
    println!(
        "  done in {:.3}s; {} modes retained at RIC target {}",
        start.elapsed().as_secs_f64(),
        result.selected_modes,
        cfg.target_ric
    );

    let start = Instant::now();
    println!("Writing results...");
    let eigenvalues = result.eigenvalues.to_vec();
    write_or_skip(cfg.policy, &cfg.chronos_dir.join("eigenValues.bin"), |path| {
        binary::write_vector(path, &eigenvalues)
    })?;
    write_or_skip(cfg.policy, &cfg.chronos_dir.join("chronos.bin"), |path| {
        binary::write_matrix(path, &result.chronos)
    })?;
    write_or_skip(cfg.policy, &cfg.modes_dir.join("mode.bin"), |path| {
        binary::write_matrix(path, &result.modes)
    })?;
    println!("  done in {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Run a reconstruction: load snapshots and stored modes, project, recombine.
///
/// The mode count is inferred from the size of `mode.bin` and the spatial
/// size of the freshly loaded snapshots — the cross-run contract of the
/// header-less format.
pub fn run_reconstruction(cfg: &ReconstructConfig) -> Result<()> {
    println!("Starting reconstruction routine");

    let entries = timelist::read_time_entries(&cfg.times_file)
        .with_context(|| format!("reading times file {}", cfg.times_file.display()))?;
    anyhow::ensure!(!entries.is_empty(), "times file lists no snapshots");
    let paths = config::snapshot_paths(&cfg.input_dir, &entries, &cfg.data_file);

    let start = Instant::now();
    println!("Reading {} snapshot files...", paths.len());
    let (snapshots, info) =
        snapshot::load_snapshot_matrix(&paths, cfg.variables, cfg.column_offset, cfg.policy)?;
    println!("  done in {:.3}s", start.elapsed().as_secs_f64());

    let space_size = info.rows * cfg.variables;
    let mode_path = cfg.modes_dir.join("mode.bin");
    let start = Instant::now();
    println!("Reading modes...");
    let modes = binary::read_matrix(&mode_path, space_size)
        .with_context(|| format!("reading {}", mode_path.display()))?;
    println!(
        "  done in {:.3}s; {} modes of {} values",
        start.elapsed().as_secs_f64(),
        modes.ncols(),
        space_size
    );

    let start = Instant::now();
    println!("Computing coefficients...");
    let coefficients = project_coefficients(&modes, &snapshots, info.rows, cfg.variables);
    println!("  done in {:.3}s", start.elapsed().as_secs_f64());

    let start = Instant::now();
    println!("Computing reconstructed fields...");
    let reconstructed = reconstruct_fields(&modes, &coefficients);
    println!("  done in {:.3}s", start.elapsed().as_secs_f64());

    let start = Instant::now();
    println!("Writing reconstructed fields...");
    write_or_skip(cfg.policy, &cfg.output_dir.join("reconstruction.bin"), |path| {
        binary::write_matrix(path, &reconstructed)
    })?;
    println!("  done in {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Apply the missing-file policy to an output write: best-effort skips a
/// failed destination with a warning, strict propagates the error.
fn write_or_skip<F>(policy: MissingFilePolicy, path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    match write(path) {
        Ok(()) => Ok(()),
        Err(err) => match policy {
            MissingFilePolicy::Strict => {
                Err(err).with_context(|| format!("writing {}", path.display()))
            }
            MissingFilePolicy::BestEffort => {
                log::warn!("skipping {}: {err}", path.display());
                Ok(())
            }
        },
    }
}
