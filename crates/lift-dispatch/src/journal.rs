//! Trip journal: what happened, in order, for observers and tallies.

use lift_core::{Direction, ElevatorId, FloorId, PassengerId, SimTime};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TripEventKind {
    Requested {
        passenger:   PassengerId,
        origin:      FloorId,
        destination: FloorId,
    },
    Boarded {
        passenger: PassengerId,
        elevator:  ElevatorId,
        floor:     FloorId,
    },
    Alighted {
        passenger: PassengerId,
        elevator:  ElevatorId,
        floor:     FloorId,
    },
    /// An elevator began a sweep.
    SweepStarted {
        elevator:  ElevatorId,
        direction: Direction,
    },
    /// An elevator arrived at a floor after moving.
    Stopped {
        elevator: ElevatorId,
        floor:    FloorId,
    },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TripEvent {
    pub time: SimTime,
    pub kind: TripEventKind,
}

/// Running passenger totals, kept even when nobody drains the events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassengerTally {
    pub generated:  u64,
    pub boarded:    u64,
    pub delivered:  u64,
    /// Sum of request → boarding times, minutes.
    pub total_wait: f64,
    /// Sum of boarding → alighting times, minutes.
    pub total_ride: f64,
}

impl PassengerTally {
    pub fn mean_wait(&self) -> f64 {
        if self.boarded == 0 { 0.0 } else { self.total_wait / self.boarded as f64 }
    }

    pub fn mean_ride(&self) -> f64 {
        if self.delivered == 0 { 0.0 } else { self.total_ride / self.delivered as f64 }
    }

    /// Passengers generated but not yet delivered.
    pub fn in_flight(&self) -> u64 {
        self.generated - self.delivered
    }
}

#[derive(Debug, Default)]
pub struct Journal {
    events: Vec<TripEvent>,
    tally:  PassengerTally,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&mut self, time: SimTime, passenger: PassengerId, origin: FloorId, destination: FloorId) {
        self.tally.generated += 1;
        self.push(time, TripEventKind::Requested { passenger, origin, destination });
    }

    pub fn boarded(&mut self, time: SimTime, passenger: PassengerId, elevator: ElevatorId, floor: FloorId, waited: f64) {
        self.tally.boarded += 1;
        self.tally.total_wait += waited;
        self.push(time, TripEventKind::Boarded { passenger, elevator, floor });
    }

    pub fn alighted(&mut self, time: SimTime, passenger: PassengerId, elevator: ElevatorId, floor: FloorId, rode: f64) {
        self.tally.delivered += 1;
        self.tally.total_ride += rode;
        self.push(time, TripEventKind::Alighted { passenger, elevator, floor });
    }

    pub fn push(&mut self, time: SimTime, kind: TripEventKind) {
        self.events.push(TripEvent { time, kind });
    }

    /// Take every event recorded since the last drain.
    pub fn drain(&mut self) -> std::vec::Drain<'_, TripEvent> {
        self.events.drain(..)
    }

    pub fn events(&self) -> &[TripEvent] {
        &self.events
    }

    pub fn tally(&self) -> &PassengerTally {
        &self.tally
    }
}
