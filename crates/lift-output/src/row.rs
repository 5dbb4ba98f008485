//! Plain data row types written by output backends.

use lift_dispatch::{TripEvent, TripEventKind};
use lift_sim::{ElevatorSummary, QueueSummary};

/// One journal event, flattened.  Fields that do not apply to `kind` are
/// `None` and written as empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripEventRow {
    pub time:        f64,
    pub kind:        &'static str,
    pub passenger:   Option<u32>,
    pub elevator:    Option<u16>,
    pub floor:       Option<u16>,
    pub destination: Option<u16>,
    pub direction:   Option<&'static str>,
}

impl From<&TripEvent> for TripEventRow {
    fn from(event: &TripEvent) -> Self {
        let mut row = TripEventRow {
            time:        event.time.minutes(),
            kind:        "",
            passenger:   None,
            elevator:    None,
            floor:       None,
            destination: None,
            direction:   None,
        };
        match event.kind {
            TripEventKind::Requested { passenger, origin, destination } => {
                row.kind = "requested";
                row.passenger = Some(passenger.0);
                row.floor = Some(origin.0);
                row.destination = Some(destination.0);
            }
            TripEventKind::Boarded { passenger, elevator, floor } => {
                row.kind = "boarded";
                row.passenger = Some(passenger.0);
                row.elevator = Some(elevator.0);
                row.floor = Some(floor.0);
            }
            TripEventKind::Alighted { passenger, elevator, floor } => {
                row.kind = "alighted";
                row.passenger = Some(passenger.0);
                row.elevator = Some(elevator.0);
                row.floor = Some(floor.0);
            }
            TripEventKind::SweepStarted { elevator, direction } => {
                row.kind = "sweep";
                row.elevator = Some(elevator.0);
                row.direction = Some(if direction == lift_core::Direction::Up { "up" } else { "down" });
            }
            TripEventKind::Stopped { elevator, floor } => {
                row.kind = "stop";
                row.elevator = Some(elevator.0);
                row.floor = Some(floor.0);
            }
        }
        row
    }
}

/// End-of-run statistics for one elevator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorRow {
    pub elevator:         u16,
    pub final_floor:      u16,
    pub boardings:        u64,
    pub alightings:       u64,
    pub stops:            u64,
    pub sweeps:           u64,
    pub floors_travelled: u64,
    pub time_moving:      f64,
    pub mean_occupancy:   f64,
    pub peak_occupancy:   u32,
    pub mean_workload:    f64,
    pub busy_fraction:    f64,
}

impl From<&ElevatorSummary> for ElevatorRow {
    fn from(e: &ElevatorSummary) -> Self {
        Self {
            elevator:         e.elevator.0,
            final_floor:      e.final_floor.0,
            boardings:        e.boardings,
            alightings:       e.alightings,
            stops:            e.stops,
            sweeps:           e.sweeps,
            floors_travelled: e.floors_travelled,
            time_moving:      e.time_moving,
            mean_occupancy:   e.mean_occupancy,
            peak_occupancy:   e.peak_occupancy,
            mean_workload:    e.workload.mean_holders,
            busy_fraction:    e.workload.busy_fraction,
        }
    }
}

/// End-of-run statistics for one floor's waiting line in one direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueRow {
    pub floor:        u16,
    pub direction:    &'static str,
    pub arrivals:     u64,
    pub pickups:      u64,
    pub peak_waiting: u64,
    pub mean_waiting: f64,
    pub mean_wait:    f64,
    pub max_wait:     f64,
}

impl From<&QueueSummary> for QueueRow {
    fn from(q: &QueueSummary) -> Self {
        Self {
            floor:        q.floor.0,
            direction:    if q.direction == lift_core::Direction::Up { "up" } else { "down" },
            arrivals:     q.arrivals,
            pickups:      q.pickups,
            peak_waiting: q.peak_waiting as u64,
            mean_waiting: q.mean_waiting,
            mean_wait:    q.mean_wait,
            max_wait:     q.max_wait,
        }
    }
}
