//! Record filtering primitives shared by both pipelines.
//!
//! This module exposes the [`RecordFilter`] trait. Each pipeline provides its
//! own implementation: the transcript filter checks quality, spatial bounds and
//! control probes, the confidence filter checks Baysor assignment confidence.

/// A trait for filtering in-memory table records.
///
/// Implementations should return `true` if the record passes the filter and
/// `false` otherwise.
pub trait RecordFilter<R> {
    /// Decide whether a single record is retained.
    fn filter_record(&self, record: &R) -> bool;
}

/// Keep the records accepted by `filter`, preserving their order.
pub fn retain_passing<R, F>(records: Vec<R>, filter: &F) -> Vec<R>
where
    F: RecordFilter<R> + ?Sized,
{
    records
        .into_iter()
        .filter(|record| filter.filter_record(record))
        .collect()
}
