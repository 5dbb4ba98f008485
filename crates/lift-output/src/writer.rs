//! The `OutputWriter` trait implemented by backend writers.

use lift_sim::SimReport;

use crate::{OutputResult, TripEventRow};

/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of journal events.
    fn write_trip_events(&mut self, rows: &[TripEventRow]) -> OutputResult<()>;

    /// Write the per-elevator and per-queue tables of the final report.
    fn write_report(&mut self, report: &SimReport) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
