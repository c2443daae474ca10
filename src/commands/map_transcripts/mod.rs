mod args;

use anyhow::{Context, Result};
use log::info;
use std::time::Instant;
use xenprep_lib::pipeline::matrix::assignment::read_assignments;
use xenprep_lib::pipeline::matrix::{
    build_count_matrix, write_feature_cell_matrix, ConfidenceFilter, MatrixAggregator,
};

pub use args::{MapTranscriptsArgs, MapTranscriptsConfig};

/// Entry point for the `map-transcripts` command.
pub fn run_map_transcripts(args: MapTranscriptsArgs) -> Result<()> {
    let config: MapTranscriptsConfig = args.into();
    run_with_config(&config)
}

fn run_with_config(config: &MapTranscriptsConfig) -> Result<()> {
    let start_time = Instant::now();

    config.validate()?;

    let filter = ConfidenceFilter::new(config.conf_cutoff)?;
    let aggregator = MatrixAggregator::new(config.unassigned.clone());

    info!(
        "Mapping {:?} with assignment confidence >= {} (unassigned label '{}')",
        config.baysor,
        filter.conf_cutoff(),
        aggregator.unassigned()
    );

    let records = read_assignments(&config.baysor, config.report_interval)
        .with_context(|| format!("Failed to load Baysor assignments from {:?}", config.baysor))?;
    let counts = build_count_matrix(records, &filter, &aggregator)?;

    write_feature_cell_matrix(&counts, &config.out)
        .with_context(|| format!("Failed to write feature-cell matrix to {:?}", config.out))?;

    info!(
        "map-transcripts finished in {:?} -> {:?}",
        start_time.elapsed(),
        config.out
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use xenprep_lib::utils::is_precondition;

    fn segmentation() -> String {
        let mut body = String::from("transcript_id,x,y,z,gene,cell,assignment_confidence,is_noise\n");
        let mut id = 0;
        for gene in ["ACTB", "GAPDH", "MYC"] {
            for cell in 1..=4 {
                id += 1;
                body.push_str(&format!("{id},1.0,1.0,1.0,{gene},{cell},0.95,false\n"));
            }
        }
        body.push_str("13,2.0,2.0,1.0,ACTB,0,0.99,true\n");
        body.push_str("14,2.0,2.0,1.0,GAPDH,0,0.30,true\n");
        body
    }

    fn config(input: &Path, out: &Path) -> MapTranscriptsConfig {
        MapTranscriptsConfig {
            baysor: input.to_path_buf(),
            out: out.to_path_buf(),
            conf_cutoff: 0.9,
            report_interval: 5,
            unassigned: "0".to_string(),
        }
    }

    #[test]
    fn builds_matrix_directory() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("segmentation.csv");
        fs::write(&input, segmentation())?;
        let out = dir.path().join("matrix");

        run_with_config(&config(&input, &out))?;

        let barcodes = fs::read_to_string(out.join("barcodes.tsv"))?;
        assert_eq!(barcodes, "cell_1\ncell_2\ncell_3\ncell_4\n");

        let features = fs::read_to_string(out.join("features.tsv"))?;
        assert_eq!(features.lines().count(), 3);
        assert!(features.lines().all(|l| l.split('\t').count() == 3));

        let mtx = fs::read_to_string(out.join("matrix.mtx"))?;
        let dims = mtx.lines().nth(2).unwrap_or_default();
        assert_eq!(dims, "3 4 12");
        Ok(())
    }

    #[test]
    fn existing_output_is_a_precondition_failure() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("segmentation.csv");
        fs::write(&input, segmentation())?;
        let out = dir.path().join("matrix");
        fs::create_dir(&out)?;

        let err = run_with_config(&config(&input, &out)).unwrap_err();
        assert!(is_precondition(&err));
        assert_eq!(fs::read_dir(&out)?.count(), 0);
        Ok(())
    }

    #[test]
    fn missing_input_is_a_precondition_failure() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("matrix");

        let err = run_with_config(&config(&dir.path().join("absent.csv"), &out)).unwrap_err();
        assert!(is_precondition(&err));
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn missing_column_aborts_without_output() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("segmentation.csv");
        fs::write(&input, "gene,cell\nACTB,1\n")?;
        let out = dir.path().join("matrix");

        let err = run_with_config(&config(&input, &out)).unwrap_err();
        assert!(!is_precondition(&err));
        assert!(!out.exists());
        Ok(())
    }
}
