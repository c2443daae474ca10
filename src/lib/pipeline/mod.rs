//! Spatial transcriptomics preprocessing pipelines
//!
//! - [`transcripts`]: Xenium transcript filtering (quality, window, control probes)
//! - [`matrix`]: Baysor assignments to a feature-cell MTX matrix

pub mod matrix;
pub mod transcripts;
