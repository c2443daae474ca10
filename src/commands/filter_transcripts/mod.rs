mod args;

use anyhow::{Context, Result};
use log::info;
use std::time::Instant;
use xenprep_lib::pipeline::transcripts::{filter_table, TranscriptFilter, TranscriptTable};
use xenprep_lib::utils;

pub use args::{FilterTranscriptsArgs, FilterTranscriptsConfig};

/// Entry point for the `filter-transcripts` command.
pub fn run_filter_transcripts(args: FilterTranscriptsArgs) -> Result<()> {
    let config: FilterTranscriptsConfig = args.into();
    run_with_config(&config)
}

fn run_with_config(config: &FilterTranscriptsConfig) -> Result<()> {
    let start_time = Instant::now();
    config.validate()?;
    let filter = TranscriptFilter::new(config.min_qv, config.window)?;

    info!(
        "Filtering {:?}: qv >= {}, x in [{}, {}], y in [{}, {}]",
        config.transcript,
        filter.min_qv(),
        config.window.min_x,
        config.window.max_x,
        config.window.min_y,
        config.window.max_y
    );

    let table = TranscriptTable::from_path(&config.transcript)
        .with_context(|| format!("Failed to load transcripts from {:?}", config.transcript))?;
    let total = table.len();

    let (filtered, outcome) = filter_table(table, &filter);
    info!(
        "Kept {} of {} transcripts ({} below qv, {} outside window, {} control probes)",
        outcome.stats.kept,
        total,
        outcome.stats.low_quality,
        outcome.stats.out_of_bounds,
        outcome.stats.control_probe
    );
    info!(
        "Reassigned {} cell-free transcripts from cell -1 to 0",
        outcome.cell_free_rewritten
    );

    let output_path = config.output_path();
    utils::make_parent_dirs(&output_path)?;
    filtered
        .write_csv(&output_path)
        .with_context(|| format!("Failed to write {:?}", output_path))?;

    info!(
        "filter-transcripts finished in {:?} -> {:?}",
        start_time.elapsed(),
        output_path
    );
    Ok(())
}
