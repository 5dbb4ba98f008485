//! End-of-run summary.
//!
//! Built from the kernel primitives (channel queue history, workload
//! counters) and the building state once the kernel has been halted.  The
//! `Display` impl renders the plain-text report printed by the CLI.

use std::fmt;

use lift_core::{Direction, ElevatorId, FloorId, SimTime};
use lift_dispatch::{Building, LiftKernel};
use lift_kernel::{CounterStats, KernelResult, KernelStats};

#[derive(Clone, Debug, PartialEq)]
pub struct ElevatorSummary {
    pub elevator:         ElevatorId,
    pub final_floor:      FloorId,
    pub boardings:        u64,
    pub alightings:       u64,
    pub stops:            u64,
    pub sweeps:           u64,
    pub floors_travelled: u64,
    pub time_moving:      f64,
    pub mean_occupancy:   f64,
    pub peak_occupancy:   u32,
    /// Riders aboard when the run was halted.
    pub onboard_at_halt:  u32,
    pub workload:         CounterStats,
}

/// Waiting-line statistics of one floor and direction.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueSummary {
    pub floor:           FloorId,
    pub direction:       Direction,
    pub arrivals:        u64,
    pub pickups:         u64,
    pub peak_waiting:    usize,
    /// Time-average queue length.
    pub mean_waiting:    f64,
    pub mean_wait:       f64,
    pub max_wait:        f64,
    pub waiting_at_halt: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassengerSummary {
    pub generated: u64,
    pub boarded:   u64,
    pub delivered: u64,
    pub in_flight: u64,
    /// Request → boarding, minutes.
    pub mean_wait: f64,
    /// Boarding → alighting, minutes.
    pub mean_ride: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimReport {
    pub final_time: SimTime,
    pub elevators:  Vec<ElevatorSummary>,
    /// Floor-major, up before down.
    pub queues:     Vec<QueueSummary>,
    pub passengers: PassengerSummary,
    pub kernel:     KernelStats,
}

impl SimReport {
    pub fn collect(kernel: &LiftKernel, building: &Building) -> KernelResult<SimReport> {
        let now = kernel.now();

        let elevators = building
            .cars
            .iter()
            .map(|car| {
                let workload = kernel.counter(building.wiring.car(car.id).workload)?.stats(now);
                Ok(ElevatorSummary {
                    elevator:         car.id,
                    final_floor:      car.floor,
                    boardings:        car.boardings,
                    alightings:       car.alightings,
                    stops:            car.stops,
                    sweeps:           car.sweeps,
                    floors_travelled: car.floors_travelled,
                    time_moving:      car.time_moving,
                    mean_occupancy:   car.occupancy.mean(now),
                    peak_occupancy:   car.occupancy.peak() as u32,
                    onboard_at_halt:  car.onboard,
                    workload,
                })
            })
            .collect::<KernelResult<Vec<_>>>()?;

        let mut queues = Vec::with_capacity(building.floors as usize * 2);
        for floor in (0..building.floors).map(FloorId) {
            for direction in [Direction::Up, Direction::Down] {
                let channel = kernel.channel(building.wiring.call_channel(floor, direction))?;
                let stats = channel.stats();
                queues.push(QueueSummary {
                    floor,
                    direction,
                    arrivals:        stats.arrivals,
                    pickups:         stats.handoffs,
                    peak_waiting:    stats.peak_waiting,
                    mean_waiting:    channel.mean_waiting(now),
                    mean_wait:       stats.mean_wait(),
                    max_wait:        stats.max_wait,
                    waiting_at_halt: channel.waiting(),
                });
            }
        }

        let tally = building.journal.tally();
        let passengers = PassengerSummary {
            generated: tally.generated,
            boarded:   tally.boarded,
            delivered: tally.delivered,
            in_flight: tally.in_flight(),
            mean_wait: tally.mean_wait(),
            mean_ride: tally.mean_ride(),
        };

        Ok(SimReport {
            final_time: now,
            elevators,
            queues,
            passengers,
            kernel: kernel.stats().clone(),
        })
    }

    /// Mean of `f` over every elevator, for replication summaries.
    pub fn mean_over_elevators(&self, f: impl Fn(&ElevatorSummary) -> f64) -> f64 {
        if self.elevators.is_empty() {
            return 0.0;
        }
        self.elevators.iter().map(f).sum::<f64>() / self.elevators.len() as f64
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.passengers;
        writeln!(f, "Simulation ended at {:.3} minutes", self.final_time.minutes())?;
        writeln!(
            f,
            "Passengers: {} generated, {} delivered, {} in flight",
            p.generated, p.delivered, p.in_flight
        )?;
        writeln!(f, "Mean wait {:.3} min, mean ride {:.3} min", p.mean_wait, p.mean_ride)?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<9} {:>6} {:>9} {:>10} {:>6} {:>6} {:>8} {:>9} {:>9} {:>9}",
            "elevator", "floor", "boardings", "alightings", "stops", "sweeps", "floors", "moving", "mean occ", "reserved"
        )?;
        for e in &self.elevators {
            writeln!(
                f,
                "{:<9} {:>6} {:>9} {:>10} {:>6} {:>6} {:>8} {:>9.2} {:>9.3} {:>9}",
                e.elevator.0,
                e.final_floor.0,
                e.boardings,
                e.alightings,
                e.stops,
                e.sweeps,
                e.floors_travelled,
                e.time_moving,
                e.mean_occupancy,
                e.workload.reservations,
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<6} {:<5} {:>8} {:>8} {:>6} {:>10} {:>10} {:>10}",
            "floor", "dir", "arrivals", "pickups", "peak", "mean len", "mean wait", "max wait"
        )?;
        for q in self.queues.iter().filter(|q| q.arrivals > 0) {
            writeln!(
                f,
                "{:<6} {:<5} {:>8} {:>8} {:>6} {:>10.3} {:>10.3} {:>10.3}",
                q.floor.0,
                q.direction,
                q.arrivals,
                q.pickups,
                q.peak_waiting,
                q.mean_waiting,
                q.mean_wait,
                q.max_wait,
            )?;
        }
        Ok(())
    }
}
