//! Topos command-line interface.
//!
//! Two entry points over the same snapshot layout:
//! ```sh
//! topos decompose -v 3 -n 20 -t 8 --times-file times.txt \
//!     --input-dir data --data-file cloud.dat \
//!     --chronos-dir out/chronos --modes-dir out/modes
//! topos reconstruct -v 3 -t 8 --times-file times.txt \
//!     --input-dir data --data-file cloud.dat \
//!     --modes-dir out/modes --output-dir out/rec
//! ```

mod config;
mod runner;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "topos")]
#[command(about = "Topos: snapshot POD/SPOD decomposition and reconstruction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompose a snapshot series into POD modes and chronos.
    Decompose {
        /// Number of data values per spatial point.
        #[arg(short = 'v', long, value_parser = parse_positive)]
        variables: usize,
        /// Data columns to skip at the start of each line.
        #[arg(long, default_value_t = 0)]
        column_offset: usize,
        /// Number of modes to write (clamped to the snapshot count).
        #[arg(short = 'n', long, value_parser = parse_positive)]
        modes: usize,
        /// Number of worker threads.
        #[arg(short = 't', long, value_parser = parse_positive)]
        threads: usize,
        /// Relative information content target in [0, 1].
        #[arg(long, default_value_t = 0.9, value_parser = parse_ric)]
        ric: f64,
        /// SPOD filter: 0 = none, 1 = box, 2 = Gaussian.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
        spod_type: u8,
        /// SPOD kernel half-width.
        #[arg(long, default_value_t = 5)]
        spod_width: usize,
        /// Fail the run on the first unreadable snapshot file instead of
        /// leaving its column zero.
        #[arg(long)]
        strict: bool,
        /// File listing one time-directory identifier per line.
        #[arg(long)]
        times_file: PathBuf,
        /// Directory holding one subdirectory per time entry.
        #[arg(long)]
        input_dir: PathBuf,
        /// Snapshot file name inside each time subdirectory.
        #[arg(long)]
        data_file: String,
        /// Output directory for eigenValues.bin and chronos.bin.
        #[arg(long)]
        chronos_dir: PathBuf,
        /// Output directory for mode.bin.
        #[arg(long)]
        modes_dir: PathBuf,
    },
    /// Reconstruct fields from previously written modes.
    Reconstruct {
        /// Number of data values per spatial point.
        #[arg(short = 'v', long, value_parser = parse_positive)]
        variables: usize,
        /// Data columns to skip at the start of each line.
        #[arg(long, default_value_t = 0)]
        column_offset: usize,
        /// Number of worker threads.
        #[arg(short = 't', long, value_parser = parse_positive)]
        threads: usize,
        /// Fail the run on the first unreadable snapshot file.
        #[arg(long)]
        strict: bool,
        /// File listing one time-directory identifier per line.
        #[arg(long)]
        times_file: PathBuf,
        /// Directory holding one subdirectory per time entry.
        #[arg(long)]
        input_dir: PathBuf,
        /// Snapshot file name inside each time subdirectory.
        #[arg(long)]
        data_file: String,
        /// Directory holding mode.bin from a previous decomposition.
        #[arg(long)]
        modes_dir: PathBuf,
        /// Output directory for reconstruction.bin.
        #[arg(long)]
        output_dir: PathBuf,
    },
}

fn parse_positive(value: &str) -> Result<usize, String> {
    let parsed: usize = value.parse().map_err(|_| format!("'{value}' is not an integer"))?;
    if parsed == 0 {
        return Err("must be at least 1".into());
    }
    Ok(parsed)
}

fn parse_ric(value: &str) -> Result<f64, String> {
    let parsed: f64 = value.parse().map_err(|_| format!("'{value}' is not a number"))?;
    if !(0.0..=1.0).contains(&parsed) {
        return Err("must lie in [0, 1]".into());
    }
    Ok(parsed)
}

fn ensure_directory(path: &std::path::Path) -> anyhow::Result<()> {
    anyhow::ensure!(path.exists(), "{} does not exist", path.display());
    anyhow::ensure!(path.is_dir(), "{} is not a directory", path.display());
    Ok(())
}

fn init_thread_pool(threads: usize) -> anyhow::Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("failed to configure the thread pool")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decompose {
            variables,
            column_offset,
            modes,
            threads,
            ric,
            spod_type,
            spod_width,
            strict,
            times_file,
            input_dir,
            data_file,
            chronos_dir,
            modes_dir,
        } => {
            for dir in [&input_dir, &chronos_dir, &modes_dir] {
                ensure_directory(dir)?;
            }
            init_thread_pool(threads)?;

            let cfg = config::DecomposeConfig {
                variables,
                column_offset,
                requested_modes: modes,
                target_ric: ric,
                filter: config::spectral_settings(spod_type, spod_width),
                policy: config::policy_from_flag(strict),
                times_file,
                input_dir,
                data_file,
                chronos_dir,
                modes_dir,
            };
            runner::run_decomposition(&cfg)
        }
        Commands::Reconstruct {
            variables,
            column_offset,
            threads,
            strict,
            times_file,
            input_dir,
            data_file,
            modes_dir,
            output_dir,
        } => {
            for dir in [&input_dir, &modes_dir, &output_dir] {
                ensure_directory(dir)?;
            }
            init_thread_pool(threads)?;

            let cfg = config::ReconstructConfig {
                variables,
                column_offset,
                policy: config::policy_from_flag(strict),
                times_file,
                input_dir,
                data_file,
                modes_dir,
                output_dir,
            };
            runner::run_reconstruction(&cfg)
        }
    }
}
