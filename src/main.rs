//! xenprep - Xenium and Baysor preprocessing for spatial transcriptomics
//!
//! xenprep prepares 10x Genomics Xenium output for single-cell analysis. It
//! filters raw transcript tables and converts Baysor segmentation results into
//! the feature-cell MTX layout Seurat and Scanpy read.
//!
//! # Tools
//!
//! - `filter-transcripts`: Drop low-quality, out-of-window and control-probe transcripts
//! - `map-transcripts`: Build a feature-cell matrix from Baysor transcript assignments
//!
//! # Usage
//!
//! ```bash
//! # Keep transcripts with qv >= 20 inside a 2000 x 2000 micron window
//! xenprep filter-transcripts --transcript transcripts.csv.gz --max-x 2000 --max-y 2000
//!
//! # Convert Baysor output to matrix.mtx / barcodes.tsv / features.tsv
//! xenprep map-transcripts --baysor segmentation.csv --out baysor_mtx --conf-cutoff 0.9
//! ```
//!
//! Argument errors, a missing input and an existing output folder are reported
//! and end the run with exit code 0; processing errors exit with code 1.

extern crate xenprep_lib;
pub mod commands;
use anyhow::Result;
use env_logger::Env;
use log::*;
use structopt::clap::ErrorKind;
use structopt::StructOpt;
use xenprep_lib::utils;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case", author, about)]
/// Xenium transcript filtering and Baysor feature-cell matrix generation
struct Args {
    #[structopt(subcommand)]
    subcommand: Subcommand,
}

#[derive(StructOpt)]
enum Subcommand {
    /// Filter Xenium transcripts by quality, coordinates and control probes
    FilterTranscripts(commands::FilterTranscriptsArgs),
    /// Convert Baysor transcript assignments to a feature-cell matrix
    MapTranscripts(commands::MapTranscriptsArgs),
}

impl Subcommand {
    fn run(self) -> Result<()> {
        match self {
            Subcommand::FilterTranscripts(args) => commands::run_filter_transcripts(args)?,
            Subcommand::MapTranscripts(args) => commands::run_map_transcripts(args)?,
        }
        Ok(())
    }
}

/// Exit code for a failed argument parse, or `None` when clap printed help or
/// version output and should exit on its own terms.
fn parse_failure_exit_code(err: &structopt::clap::Error) -> Option<i32> {
    match err.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => None,
        _ => Some(0),
    }
}

/// Exit code for a failed run. Unmet preconditions and broken pipes end cleanly.
fn run_failure_exit_code(err: &anyhow::Error) -> i32 {
    if utils::is_broken_pipe(err) || utils::is_precondition(err) {
        0
    } else {
        1
    }
}

/// Report a failed run. Precondition messages bypass the log filter so a
/// skipped run is never silent.
fn report_failure(err: &anyhow::Error) {
    if utils::is_broken_pipe(err) {
        return;
    }
    if utils::is_precondition(err) {
        eprintln!("{}", err);
    } else {
        error!("{:#}", err);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = match Args::from_iter_safe(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => match parse_failure_exit_code(&err) {
            None => err.exit(),
            Some(code) => {
                eprintln!("{}", err.message);
                std::process::exit(code);
            }
        },
    };

    if let Err(err) = args.subcommand.run() {
        report_failure(&err);
        std::process::exit(run_failure_exit_code(&err));
    }
    Ok(())
}
