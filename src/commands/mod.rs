pub mod filter_transcripts;
pub mod map_transcripts;

pub use filter_transcripts::{run_filter_transcripts, FilterTranscriptsArgs};
pub use map_transcripts::{run_map_transcripts, MapTranscriptsArgs};
