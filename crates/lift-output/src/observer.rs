//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use lift_core::SimTime;
use lift_dispatch::TripEvent;
use lift_sim::{SimObserver, SimReport};

use crate::row::TripEventRow;
use crate::writer::OutputWriter;
use crate::OutputError;

/// Journal events buffered before a write.
const BATCH: usize = 4_096;

/// A [`SimObserver`] that writes journal events and the final report to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<TripEventRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::with_capacity(BATCH), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_trip_events(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_trip_event(&mut self, event: &TripEvent) {
        self.pending.push(TripEventRow::from(event));
        if self.pending.len() >= BATCH {
            self.flush_pending();
        }
    }

    fn on_halt(&mut self, _time: SimTime, _in_flight: u64) {
        self.flush_pending();
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        self.flush_pending();
        let result = self.writer.write_report(report);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
