use crate::core::error::{Result, XenprepError};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Create parent directories for a path when missing.
pub fn make_parent_dirs<P: AsRef<Path>>(path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Detect whether a path uses a gzip-compatible extension.
pub fn is_gzipped<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref().extension().unwrap_or_else(|| OsStr::new("")),
        ext if ext == "gz" || ext == "gzip" || ext == "bgzf"
    )
}

/// Fail with a precondition error when `path` does not exist.
pub fn require_input<P: AsRef<Path>>(path: P, what: &str) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(XenprepError::Precondition(format!(
            "The specified {} {} does not exist!",
            what,
            path.display()
        )));
    }
    Ok(())
}

/// Fail with a precondition error when `path` already exists.
pub fn require_absent<P: AsRef<Path>>(path: P, what: &str) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(XenprepError::Precondition(format!(
            "The specified {} {} already exists!",
            what,
            path.display()
        )));
    }
    Ok(())
}

/// Create a single new directory. An existing directory is an error, never reused.
pub fn create_new_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::AlreadyExists {
            XenprepError::OutputExists(path.to_path_buf())
        } else {
            XenprepError::Io(err)
        }
    })
}
