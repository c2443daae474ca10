//! xenprep: Xenium and Baysor preprocessing toolkit
//!
//! The library provides the building blocks behind the `xenprep` command line tool:
//! 1. Filtering Xenium transcript tables by quality score, slide window and control probes
//! 2. Converting Baysor transcript-to-cell assignments into a sparse feature-cell matrix
//! 3. Writing that matrix in the 10x MTX layout read by Seurat and Scanpy
//!
//! # Modules
//!
//! - [`core`]: Errors, table IO, record filters and sparse matrix helpers
//! - [`pipeline`]: The transcript filter and matrix builder pipelines
//! - [`utils`]: Flat re-exports of frequently used helpers

pub mod core;
pub mod pipeline;
pub mod utils;

pub use crate::core::error::{Result, XenprepError};
