use std::path::PathBuf;
use structopt::StructOpt;
use xenprep_lib::core::error::{Result, XenprepError};
use xenprep_lib::pipeline::transcripts::filter::DEFAULT_MIN_QV;
use xenprep_lib::pipeline::transcripts::{filtered_file_name, SpatialWindow};

/// Arguments for the `filter-transcripts` command.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "filter-transcripts",
    about = "Filter transcripts from transcripts.csv based on Q-Score threshold and bounds on x and y coordinates. Remove negative controls."
)]
pub struct FilterTranscriptsArgs {
    /// The path to the transcripts.csv(.gz) file produced by Xenium.
    #[structopt(long, parse(from_os_str))]
    pub transcript: PathBuf,

    /// The minimum Q-Score to pass filtering.
    #[structopt(long = "min-qv", default_value = "20.0", allow_hyphen_values = true)]
    pub min_qv: f64,

    /// Only keep transcripts whose x-coordinate is at least this value.
    #[structopt(long = "min-x", default_value = "0.0", allow_hyphen_values = true)]
    pub min_x: f64,

    /// Only keep transcripts whose x-coordinate is at most this value. The default
    /// retains every transcript since a Xenium slide is <24000 microns wide.
    #[structopt(long = "max-x", default_value = "24000.0", allow_hyphen_values = true)]
    pub max_x: f64,

    /// Only keep transcripts whose y-coordinate is at least this value.
    #[structopt(long = "min-y", default_value = "0.0", allow_hyphen_values = true)]
    pub min_y: f64,

    /// Only keep transcripts whose y-coordinate is at most this value.
    #[structopt(long = "max-y", default_value = "24000.0", allow_hyphen_values = true)]
    pub max_y: f64,

    /// Directory receiving the filtered CSV (default: current directory).
    #[structopt(long, parse(from_os_str))]
    pub outdir: Option<PathBuf>,
}

/// Normalised configuration derived from [`FilterTranscriptsArgs`].
#[derive(Debug, Clone)]
pub struct FilterTranscriptsConfig {
    pub transcript: PathBuf,
    pub output_dir: PathBuf,
    pub min_qv: f64,
    pub window: SpatialWindow,
}

impl From<FilterTranscriptsArgs> for FilterTranscriptsConfig {
    fn from(args: FilterTranscriptsArgs) -> FilterTranscriptsConfig {
        FilterTranscriptsConfig {
            transcript: args.transcript,
            output_dir: args.outdir.unwrap_or_else(|| PathBuf::from(".")),
            min_qv: args.min_qv,
            window: SpatialWindow {
                min_x: args.min_x,
                max_x: args.max_x,
                min_y: args.min_y,
                max_y: args.max_y,
            },
        }
    }
}

impl FilterTranscriptsConfig {
    #[inline]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(filtered_file_name(&self.window))
    }

    /// Check the input table exists and the output directory is usable.
    /// Thresholds are checked when the filter is built.
    pub fn validate(&self) -> Result<()> {
        if !self.transcript.is_file() {
            return Err(XenprepError::InvalidInput(format!(
                "Transcript file {} does not exist",
                self.transcript.display()
            )));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(XenprepError::InvalidInput(format!(
                "Output directory {} is not a directory",
                self.output_dir.display()
            )));
        }
        Ok(())
    }
}

impl Default for FilterTranscriptsConfig {
    fn default() -> Self {
        Self {
            transcript: PathBuf::from("transcripts.csv"),
            output_dir: PathBuf::from("."),
            min_qv: DEFAULT_MIN_QV,
            window: SpatialWindow::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn validate_rejects_missing_input_and_file_outdir() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let mut config = FilterTranscriptsConfig {
            transcript: dir.path().join("missing.csv"),
            output_dir: dir.path().to_path_buf(),
            ..FilterTranscriptsConfig::default()
        };
        assert!(matches!(config.validate(), Err(XenprepError::InvalidInput(_))));

        let input = NamedTempFile::new()?;
        config.transcript = input.path().to_path_buf();
        config.validate()?;

        config.output_dir = input.path().to_path_buf();
        assert!(config.validate().is_err());
        Ok(())
    }

    #[test]
    fn parses_minimal_arguments() {
        let args =
            FilterTranscriptsArgs::from_iter_safe(&["filter-transcripts", "--transcript", "t.csv"])
                .unwrap();
        let config: FilterTranscriptsConfig = args.into();

        let defaults = FilterTranscriptsConfig::default();
        assert_eq!(config.transcript, PathBuf::from("t.csv"));
        assert_eq!(config.min_qv, defaults.min_qv);
        assert_eq!(config.window, defaults.window);
        assert_eq!(
            config.output_path(),
            PathBuf::from(".").join("X0.0-24000.0_Y0.0-24000.0_filtered_transcripts.csv")
        );
    }

    #[test]
    fn parses_negative_bounds_and_outdir() {
        let args = FilterTranscriptsArgs::from_iter_safe(&[
            "filter-transcripts",
            "--transcript",
            "t.csv.gz",
            "--min-x",
            "-50",
            "--max-x",
            "1000",
            "--min-qv",
            "30",
            "--outdir",
            "out",
        ])
        .unwrap();
        let config: FilterTranscriptsConfig = args.into();
        assert_eq!(config.window.min_x, -50.0);
        assert_eq!(config.min_qv, 30.0);
        assert_eq!(
            config.output_path(),
            PathBuf::from("out").join("X-50.0-1000.0_Y0.0-24000.0_filtered_transcripts.csv")
        );
    }

    #[test]
    fn transcript_is_required() {
        assert!(FilterTranscriptsArgs::from_iter_safe(&["filter-transcripts"]).is_err());
    }

    #[test]
    fn rejects_non_numeric_threshold() {
        assert!(FilterTranscriptsArgs::from_iter_safe(&[
            "filter-transcripts",
            "--transcript",
            "t.csv",
            "--min-qv",
            "high",
        ])
        .is_err());
    }
}
