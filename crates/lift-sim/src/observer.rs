//! Simulation observer trait for progress reporting and data collection.

use lift_core::SimTime;
use lift_dispatch::TripEvent;

use crate::SimReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Deliveries(u64);
///
/// impl SimObserver for Deliveries {
///     fn on_trip_event(&mut self, event: &TripEvent) {
///         if matches!(event.kind, TripEventKind::Alighted { .. }) {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called for every journal event, in the order they happened.
    fn on_trip_event(&mut self, _event: &TripEvent) {}

    /// Called once the horizon is reached and the kernel has been halted.
    ///
    /// `in_flight` is the number of passengers created but not delivered.
    fn on_halt(&mut self, _time: SimTime, _in_flight: u64) {}

    /// Called once with the final report.
    fn on_sim_end(&mut self, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
