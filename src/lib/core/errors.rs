use crate::core::error::XenprepError;
use anyhow::Error;
use std::io;

/// Returns `true` if the error originated from a broken pipe.
#[inline]
pub fn is_broken_pipe(err: &Error) -> bool {
    err.root_cause()
        .downcast_ref::<io::Error>()
        .map(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
        .unwrap_or(false)
}

/// Returns `true` if the error reports an unmet run precondition
/// (missing input, pre-existing output) rather than a processing failure.
#[inline]
pub fn is_precondition(err: &Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<XenprepError>(),
            Some(XenprepError::Precondition(_))
        )
    })
}
