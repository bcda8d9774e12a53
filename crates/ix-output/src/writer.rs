//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ArmSummaryRow, EventRow, OutputResult, QueueSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors during a run are stored by [`SimOutputObserver`][crate::SimOutputObserver]
/// and surfaced by its `finish`.
pub trait OutputWriter {
    /// Write a batch of arrival/departure events.
    fn write_events(&mut self, rows: &[EventRow]) -> OutputResult<()>;

    /// Write one snapshot (one row per arm).
    fn write_queue_snapshot(&mut self, rows: &[QueueSnapshotRow]) -> OutputResult<()>;

    /// Write the per-arm summary of a finished run.
    fn write_arm_summaries(&mut self, rows: &[ArmSummaryRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
