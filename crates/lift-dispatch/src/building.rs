//! The building world shared by every process, and the wiring that connects
//! passengers to elevators.
//!
//! [`Building::install`] is the one entry point: it validates the
//! configuration, creates every kernel primitive, builds the world and
//! spawns the initial processes.

use lift_core::{
    travel_time, BuildingConfig, ChannelId, CounterId, Direction, ElevatorId, FloorId,
    PassengerId, SignalId, SimRng, SimTime,
};
use lift_kernel::TimeWeighted;
use tracing::{debug, info};

use crate::arrivals::seeded_destination;
use crate::{
    DispatchError, DispatchResult, ElevatorProcess, FloorRequestRegistry, GeneratorProcess,
    Journal, LiftKernel, PassengerProcess,
};

// ── Wiring ────────────────────────────────────────────────────────────────────

/// Kernel handles owned by one elevator.
#[derive(Copy, Clone, Debug)]
pub struct CarWiring {
    /// Raised at every stop; riders check the car's floor.
    pub arrived:      SignalId,
    /// Raised by a passenger once boarding bookkeeping is done.
    pub boarded:      SignalId,
    /// Raised by a passenger once it has left the car.
    pub alighted:     SignalId,
    pub heading_up:   SignalId,
    pub heading_down: SignalId,
    /// Riders at their destination queue here to leave one at a time.
    pub exit:         ChannelId,
    /// Held by a passenger for the length of its boarding bookkeeping.
    pub workload:     CounterId,
}

impl CarWiring {
    pub fn heading(&self, direction: Direction) -> SignalId {
        match direction {
            Direction::Up => self.heading_up,
            Direction::Down => self.heading_down,
        }
    }
}

/// Every kernel handle the dispatch processes use.
#[derive(Clone, Debug)]
pub struct Wiring {
    /// Global "someone pressed a hall button" signal.
    pub wakeup:     SignalId,
    pub up_calls:   Vec<ChannelId>,
    pub down_calls: Vec<ChannelId>,
    pub cars:       Vec<CarWiring>,
}

impl Wiring {
    fn create(config: &BuildingConfig, kernel: &mut LiftKernel) -> Self {
        let wakeup = kernel.add_signal("wakeup");
        let up_calls = config.floor_ids().map(|f| kernel.add_channel(format!("floor {} up", f.0))).collect();
        let down_calls = config.floor_ids().map(|f| kernel.add_channel(format!("floor {} down", f.0))).collect();
        let cars = config
            .elevator_ids()
            .map(|e| CarWiring {
                arrived:      kernel.add_signal(format!("elevator {} arrived", e.0)),
                boarded:      kernel.add_signal(format!("elevator {} boarded", e.0)),
                alighted:     kernel.add_signal(format!("elevator {} alighted", e.0)),
                heading_up:   kernel.add_signal(format!("elevator {} heading up", e.0)),
                heading_down: kernel.add_signal(format!("elevator {} heading down", e.0)),
                exit:         kernel.add_channel(format!("elevator {} exit", e.0)),
                workload:     kernel.add_counter(format!("elevator {} workload", e.0)),
            })
            .collect();
        Self { wakeup, up_calls, down_calls, cars }
    }

    /// Waiting line for passengers on `floor` travelling `direction`.
    pub fn call_channel(&self, floor: FloorId, direction: Direction) -> ChannelId {
        match direction {
            Direction::Up => self.up_calls[floor.index()],
            Direction::Down => self.down_calls[floor.index()],
        }
    }

    pub fn car(&self, elevator: ElevatorId) -> &CarWiring {
        &self.cars[elevator.index()]
    }
}

// ── CarState ──────────────────────────────────────────────────────────────────

/// Observable state of one elevator car.
#[derive(Clone, Debug)]
pub struct CarState {
    pub id:        ElevatorId,
    pub floor:     FloorId,
    /// Direction of the current (or next) sweep.
    pub direction: Direction,
    pub onboard:   u32,
    pub occupancy: TimeWeighted,

    pub boardings:         u64,
    pub alightings:        u64,
    pub stops:             u64,
    pub sweeps:            u64,
    pub floors_travelled:  u64,
    /// Minutes spent moving between floors.
    pub time_moving:       f64,
}

impl CarState {
    fn new(id: ElevatorId, floor: FloorId, direction: Direction) -> Self {
        Self {
            id,
            floor,
            direction,
            onboard: 0,
            occupancy: TimeWeighted::new(SimTime::ZERO),
            boardings: 0,
            alightings: 0,
            stops: 0,
            sweeps: 0,
            floors_travelled: 0,
            time_moving: 0.0,
        }
    }

    /// Record arrival at `floor` after `travel` minutes in motion.
    pub fn arrive(&mut self, floor: FloorId, travel: f64) {
        self.floors_travelled += u64::from(self.floor.distance(floor));
        self.time_moving += travel;
        self.stops += 1;
        self.floor = floor;
    }

    pub fn board(&mut self, now: SimTime) {
        self.onboard += 1;
        self.boardings += 1;
        self.occupancy.set(now, f64::from(self.onboard));
    }

    /// Returns `false` if nobody was aboard.
    pub fn alight(&mut self, now: SimTime) -> bool {
        let Some(remaining) = self.onboard.checked_sub(1) else {
            return false;
        };
        self.onboard = remaining;
        self.alightings += 1;
        self.occupancy.set(now, f64::from(self.onboard));
        true
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

/// The world type of the elevator kernel.
#[derive(Debug)]
pub struct Building {
    pub floors:             u16,
    pub travel_coefficient: f64,
    pub inter_arrival:      f64,
    pub registry:           FloorRequestRegistry,
    pub cars:               Vec<CarState>,
    pub wiring:             Wiring,
    pub rng:                SimRng,
    pub journal:            Journal,
    next_passenger:         u32,
}

impl Building {
    /// Validate `config`, wire `kernel` and spawn the initial processes.
    ///
    /// Spawn order: passengers (seeded) or generators (one per floor) first,
    /// then elevators in id order.
    pub fn install(config: &BuildingConfig, kernel: &mut LiftKernel) -> DispatchResult<Building> {
        config.validate()?;

        let wiring = Wiring::create(config, kernel);
        let cars = config
            .elevator_ids()
            .map(|e| CarState::new(e, config.start_floor(e), config.initial_direction(e)))
            .collect();

        let mut building = Building {
            floors: config.floors,
            travel_coefficient: config.travel_coefficient,
            inter_arrival: config.inter_arrival,
            registry: FloorRequestRegistry::new(config.floors, config.elevators),
            cars,
            wiring,
            rng: SimRng::new(config.rng_seed),
            journal: Journal::new(),
            next_passenger: 0,
        };

        if config.uses_generators() {
            for floor in config.floor_ids() {
                kernel.spawn(Box::new(GeneratorProcess::new(floor)));
            }
        } else {
            for seed in &config.arrival_seeds {
                for _ in 0..seed.group_size {
                    let destination =
                        seeded_destination(&mut building.rng, config.floors, seed.floor, config.ground_bias);
                    let id = building.next_passenger_id();
                    let passenger = PassengerProcess::new(id, seed.floor, destination)
                        .ok_or(DispatchError::LateralTrip(seed.floor))?;
                    kernel.spawn(Box::new(passenger));
                }
            }
        }

        for elevator in config.elevator_ids() {
            kernel.spawn(Box::new(ElevatorProcess::new(elevator)));
        }

        info!(
            floors = config.floors,
            elevators = config.elevators,
            seeded_passengers = building.next_passenger,
            generators = config.uses_generators(),
            "building installed"
        );
        Ok(building)
    }

    pub fn next_passenger_id(&mut self) -> PassengerId {
        let id = PassengerId(self.next_passenger);
        self.next_passenger += 1;
        id
    }

    pub fn car(&self, elevator: ElevatorId) -> &CarState {
        &self.cars[elevator.index()]
    }

    pub fn car_mut(&mut self, elevator: ElevatorId) -> &mut CarState {
        &mut self.cars[elevator.index()]
    }

    /// Minutes needed to move `elevator` from where it is to `floor`.
    pub fn travel_to(&self, elevator: ElevatorId, floor: FloorId) -> f64 {
        travel_time(self.car(elevator).floor, floor, self.travel_coefficient)
    }

    /// Next floor after `floor` when sweeping `direction`, or `None` at the
    /// end of the shaft.
    pub fn next_floor(&self, floor: FloorId, direction: Direction) -> Option<FloorId> {
        match direction {
            Direction::Up if floor.0 + 1 < self.floors => Some(FloorId(floor.0 + 1)),
            Direction::Down if floor.0 > 0 => Some(FloorId(floor.0 - 1)),
            _ => None,
        }
    }

    /// First floor of a sweep in `direction`.
    pub fn sweep_start(&self, direction: Direction) -> FloorId {
        match direction {
            Direction::Up => FloorId::GROUND,
            Direction::Down => FloorId(self.floors - 1),
        }
    }

    pub(crate) fn log_stop(&self, elevator: ElevatorId, now: SimTime) {
        let car = self.car(elevator);
        debug!(%now, elevator = elevator.0, floor = car.floor.0, onboard = car.onboard, "stop");
    }
}
