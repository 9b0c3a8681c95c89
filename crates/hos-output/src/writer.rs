//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DailyLogRow, LogSheetHeader, OutputResult, TimelineRow};

/// Trait implemented by plan output backends.
pub trait OutputWriter {
    /// Write the log-sheet header block.
    fn write_header(&mut self, header: &LogSheetHeader) -> OutputResult<()>;

    /// Write a batch of per-day totals.
    fn write_daily_logs(&mut self, rows: &[DailyLogRow]) -> OutputResult<()>;

    /// Write a batch of timeline entries.
    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
