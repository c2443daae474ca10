use std::path::PathBuf;
use structopt::StructOpt;
use xenprep_lib::core::error::Result;
use xenprep_lib::utils;

/// Arguments for the `map-transcripts` command.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "map-transcripts",
    about = "Map Xenium transcripts to Baysor segmentation result. Generate Seurat/Scanpy-compatible feature-cell matrix."
)]
pub struct MapTranscriptsArgs {
    /// The path to the *segmentation.csv(.gz) file produced by Baysor.
    #[structopt(long, parse(from_os_str))]
    pub baysor: PathBuf,

    /// The name of output folder in which feature-cell matrix is written. Must not exist.
    #[structopt(long, parse(from_os_str))]
    pub out: PathBuf,

    /// Ignore transcripts with assignment confidence below this threshold.
    #[structopt(long = "conf-cutoff", default_value = "0.9", allow_hyphen_values = true)]
    pub conf_cutoff: f64,

    /// Reporting interval. Logs progress whenever this many transcripts are read (0 disables).
    #[structopt(long = "rep-int", default_value = "100000")]
    pub rep_int: usize,

    /// Cell label Baysor uses for transcripts outside every cell.
    #[structopt(long, default_value = "0")]
    pub unassigned: String,
}

/// Normalised configuration derived from [`MapTranscriptsArgs`].
#[derive(Debug, Clone)]
pub struct MapTranscriptsConfig {
    pub baysor: PathBuf,
    pub out: PathBuf,
    pub conf_cutoff: f64,
    pub report_interval: usize,
    pub unassigned: String,
}

impl MapTranscriptsConfig {
    /// Run preconditions: the Baysor table exists and `out` does not.
    pub fn validate(&self) -> Result<()> {
        utils::require_input(&self.baysor, "Baysor output")?;
        utils::require_absent(&self.out, "output folder")
    }
}

impl From<MapTranscriptsArgs> for MapTranscriptsConfig {
    fn from(args: MapTranscriptsArgs) -> MapTranscriptsConfig {
        MapTranscriptsConfig {
            baysor: args.baysor,
            out: args.out,
            conf_cutoff: args.conf_cutoff,
            report_interval: args.rep_int,
            unassigned: args.unassigned,
        }
    }
}
