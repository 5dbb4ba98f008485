//! One passenger journey as a state machine.

use lift_core::{Direction, ElevatorId, FloorId, PassengerId, SimTime};
use lift_kernel::{KernelResult, Process, Step};

use crate::{Building, LiftCtx};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    /// Not yet started: press the hall button.
    Request,
    /// Queued on the floor's call channel.
    AwaitPickup,
    /// Aboard, waiting for the car to stop somewhere.
    Riding { car: ElevatorId },
    /// Queued on the car's exit channel.
    Alighting { car: ElevatorId },
}

/// Request → wait → board → ride → alight, then done.
#[derive(Debug)]
pub struct PassengerProcess {
    id:          PassengerId,
    origin:      FloorId,
    destination: FloorId,
    direction:   Direction,
    stage:       Stage,
    requested:   SimTime,
    boarded:     SimTime,
}

impl PassengerProcess {
    /// `None` when `origin == destination`.
    pub fn new(id: PassengerId, origin: FloorId, destination: FloorId) -> Option<Self> {
        let direction = Direction::between(origin, destination)?;
        Some(Self {
            id,
            origin,
            destination,
            direction,
            stage: Stage::Request,
            requested: SimTime::ZERO,
            boarded: SimTime::ZERO,
        })
    }

    pub fn id(&self) -> PassengerId {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Process<Building, ElevatorId> for PassengerProcess {
    fn name(&self) -> &'static str {
        "passenger"
    }

    fn resume(&mut self, ctx: &mut LiftCtx<'_>) -> KernelResult<Step> {
        let now = ctx.now();
        match self.stage {
            Stage::Request => {
                let world = &mut *ctx.world;
                world.registry.request(self.origin, self.direction);
                world.journal.requested(now, self.id, self.origin, self.destination);
                let wakeup = world.wiring.wakeup;
                let line = world.wiring.call_channel(self.origin, self.direction);

                ctx.signal(wakeup)?;
                self.requested = now;
                self.stage = Stage::AwaitPickup;
                Ok(Step::Receive(line))
            }

            Stage::AwaitPickup => {
                let car = ctx.received()?;
                let wiring = *ctx.world.wiring.car(car);

                ctx.reserve(wiring.workload)?;
                let world = &mut *ctx.world;
                world.registry.mark_off(car, self.destination);
                world.journal.boarded(now, self.id, car, self.origin, now.since(self.requested));
                ctx.signal(wiring.boarded)?;
                ctx.release(wiring.workload)?;

                self.boarded = now;
                self.stage = Stage::Riding { car };
                Ok(Step::Wait(wiring.arrived))
            }

            Stage::Riding { car } => {
                let wiring = ctx.world.wiring.car(car);
                if ctx.world.car(car).floor == self.destination {
                    let exit = wiring.exit;
                    self.stage = Stage::Alighting { car };
                    Ok(Step::Receive(exit))
                } else {
                    Ok(Step::Wait(wiring.arrived))
                }
            }

            Stage::Alighting { car } => {
                let from = ctx.received()?;
                if from != car {
                    return Err(ctx.protocol_error(format!("rode {car} but was let out by {from}")));
                }
                ctx.world.journal.alighted(now, self.id, car, self.destination, now.since(self.boarded));
                let alighted = ctx.world.wiring.car(car).alighted;
                ctx.signal(alighted)?;
                Ok(Step::Done)
            }
        }
    }
}
