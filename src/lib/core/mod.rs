pub mod error;
pub mod errors;
pub mod fs;
pub mod io;
pub mod record_filter;
pub mod sparse;

pub mod prelude {
    pub use super::error::{Result, XenprepError};
    pub use super::errors::{is_broken_pipe, is_precondition};
    pub use super::fs::{create_new_dir, is_gzipped, make_parent_dirs, require_absent, require_input};
    pub use super::io::{column_index, column_index_any, get_reader, get_writer};
    pub use super::record_filter::{retain_passing, RecordFilter};
    pub use super::sparse::SparseOps;
}
