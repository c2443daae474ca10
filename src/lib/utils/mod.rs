//! Utility re-exports.
//!
//! Shared helpers live under `crate::core`; this module flattens the ones the
//! command line front end reaches for.

pub use crate::core::errors::{is_broken_pipe, is_precondition};
pub use crate::core::fs::{is_gzipped, make_parent_dirs, require_absent, require_input};
pub use crate::core::io::{get_reader, get_writer};
