//! The `Sim` struct and its run loop.

use lift_core::BuildingConfig;
use lift_dispatch::{Building, LiftKernel};
use tracing::info;

use crate::{SimObserver, SimReport, SimResult};

/// The main simulation runner.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Configuration the building was installed from.
    pub config: BuildingConfig,

    /// Scheduler, signals, channels and counters.
    pub kernel: LiftKernel,

    /// Registry, car state, RNG and journal shared by every process.
    pub building: Building,
}

impl Sim {
    /// Run to the horizon, halt, and return the report.
    ///
    /// Calling `run` again after it returned is harmless: the kernel is
    /// already halted, so the same report is rebuilt.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        while self.kernel.step(&mut self.building)?.is_some() {
            self.forward_events(observer);
        }
        self.forward_events(observer);

        let in_flight = self.building.journal.tally().in_flight();
        let dropped = self.kernel.halt()?;
        observer.on_halt(self.kernel.now(), in_flight);

        let report = SimReport::collect(&self.kernel, &self.building)?;
        info!(
            at = %self.kernel.now(),
            delivered = report.passengers.delivered,
            in_flight,
            dropped,
            "simulation finished"
        );
        observer.on_sim_end(&report);
        Ok(report)
    }

    fn forward_events<O: SimObserver>(&mut self, observer: &mut O) {
        for event in self.building.journal.drain() {
            observer.on_trip_event(&event);
        }
    }
}
