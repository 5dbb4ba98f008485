//! The sweep dispatcher.
//!
//! An elevator sweeps the whole shaft in one direction, floor by floor.  At
//! each floor it first lets out riders bound there (travelling to the floor
//! if needed), then picks up everyone waiting to go the same way (again
//! travelling if needed).  At the end of the shaft it flips direction.  It
//! sweeps again straight away while the registry holds work for it, and
//! sleeps on the global wakeup signal otherwise.

use lift_core::{ElevatorId, FloorId};
use lift_kernel::{KernelResult, Process, Step};
use tracing::debug;

use crate::{Building, LiftCtx, TripEventKind};

/// Pause after announcing an arrival so every rider bound for the floor can
/// queue on the exit channel before the first one is let out.
///
/// Once the clock is past about 1e-4 minutes, `now + SETTLE_TIME == now` in
/// f64 and this is a zero hold.  Riders then queue first only because the
/// event queue resumes equal timestamps in FIFO order, and the arrival
/// signal schedules them before the elevator's own hold.
pub const SETTLE_TIME: f64 = 1e-20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    CheckOff,
    /// Travel towards an unload floor is over.
    ArriveToUnload,
    /// Let out the next queued rider, if any.
    Unloading,
    /// A rider confirmed leaving.
    AlightAck,
    CheckCall,
    /// Travel towards a pickup floor is over.
    ArriveToLoad,
    /// Take on the next waiting passenger, if any.
    Loading,
    /// A passenger confirmed boarding.
    BoardAck,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    /// Between sweeps.
    Idle,
    Sweep { floor: FloorId, stage: Stage },
}

#[derive(Debug)]
pub struct ElevatorProcess {
    id:    ElevatorId,
    phase: Phase,
}

impl ElevatorProcess {
    pub fn new(id: ElevatorId) -> Self {
        Self { id, phase: Phase::Idle }
    }

    #[inline]
    fn goto(&mut self, floor: FloorId, stage: Stage) {
        self.phase = Phase::Sweep { floor, stage };
    }

    /// Move the cursor past `floor`, or end the sweep.
    fn advance(&mut self, world: &mut Building, floor: FloorId) {
        let direction = world.car(self.id).direction;
        match world.next_floor(floor, direction) {
            Some(next) => self.goto(next, Stage::CheckOff),
            None => {
                world.car_mut(self.id).direction = direction.flip();
                self.phase = Phase::Idle;
            }
        }
    }

    /// Head for `floor`, landing in `then` once there.  `None` means the car
    /// is already there and the caller continues without suspending.
    fn travel(&mut self, world: &Building, floor: FloorId, then: Stage) -> Option<Step> {
        self.goto(floor, then);
        let minutes = world.travel_to(self.id, floor);
        if minutes > 0.0 {
            debug!(elevator = self.id.0, from = world.car(self.id).floor.0, to = floor.0, minutes, "moving");
            Some(Step::Hold(minutes))
        } else {
            None
        }
    }

    /// Record arrival at `floor`; only a real move counts as a stop.
    fn arrive(&self, ctx: &mut LiftCtx<'_>, floor: FloorId) {
        let now = ctx.now();
        let world = &mut *ctx.world;
        if world.car(self.id).floor != floor {
            let minutes = world.travel_to(self.id, floor);
            world.car_mut(self.id).arrive(floor, minutes);
            world.journal.push(now, TripEventKind::Stopped { elevator: self.id, floor });
            world.log_stop(self.id, now);
        }
    }

    /// Run one stage at `floor`.  `Some` suspends the process.
    fn visit(&mut self, ctx: &mut LiftCtx<'_>, floor: FloorId, stage: Stage) -> KernelResult<Option<Step>> {
        let wiring = *ctx.world.wiring.car(self.id);
        let direction = ctx.world.car(self.id).direction;

        match stage {
            Stage::CheckOff => {
                if ctx.world.registry.wants_off(self.id, floor) {
                    return Ok(self.travel(ctx.world, floor, Stage::ArriveToUnload));
                }
                self.goto(floor, Stage::CheckCall);
            }

            Stage::ArriveToUnload => {
                self.arrive(ctx, floor);
                ctx.signal(wiring.arrived)?;
                self.goto(floor, Stage::Unloading);
                return Ok(Some(Step::Hold(SETTLE_TIME)));
            }

            Stage::Unloading => {
                if ctx.waiting(wiring.exit)? > 0 {
                    ctx.send(wiring.exit, self.id)?;
                    self.goto(floor, Stage::AlightAck);
                    return Ok(Some(Step::Wait(wiring.alighted)));
                }
                ctx.world.registry.clear_off(self.id, floor);
                self.goto(floor, Stage::CheckCall);
            }

            Stage::AlightAck => {
                let now = ctx.now();
                if !ctx.world.car_mut(self.id).alight(now) {
                    return Err(ctx.protocol_error("rider left an empty car"));
                }
                self.goto(floor, Stage::Unloading);
            }

            Stage::CheckCall => {
                if ctx.world.registry.is_called(floor, direction) {
                    return Ok(self.travel(ctx.world, floor, Stage::ArriveToLoad));
                }
                self.advance(ctx.world, floor);
            }

            Stage::ArriveToLoad => {
                self.arrive(ctx, floor);
                self.goto(floor, Stage::Loading);
            }

            Stage::Loading => {
                let line = ctx.world.wiring.call_channel(floor, direction);
                if ctx.waiting(line)? > 0 {
                    ctx.send(line, self.id)?;
                    ctx.signal(wiring.heading(direction))?;
                    self.goto(floor, Stage::BoardAck);
                    return Ok(Some(Step::Wait(wiring.boarded)));
                }
                ctx.world.registry.clear_call(floor, direction);
                self.advance(ctx.world, floor);
            }

            Stage::BoardAck => {
                let now = ctx.now();
                ctx.world.car_mut(self.id).board(now);
                self.goto(floor, Stage::Loading);
            }
        }
        Ok(None)
    }
}

impl Process<Building, ElevatorId> for ElevatorProcess {
    fn name(&self) -> &'static str {
        "elevator"
    }

    fn resume(&mut self, ctx: &mut LiftCtx<'_>) -> KernelResult<Step> {
        loop {
            match self.phase {
                Phase::Idle => {
                    let now = ctx.now();
                    let world = &mut *ctx.world;
                    if !world.registry.has_work_for(self.id) {
                        return Ok(Step::Wait(world.wiring.wakeup));
                    }
                    let car = world.car_mut(self.id);
                    car.sweeps += 1;
                    let direction = car.direction;
                    let start = world.sweep_start(direction);
                    world.journal.push(now, TripEventKind::SweepStarted { elevator: self.id, direction });
                    self.goto(start, Stage::CheckOff);
                }
                Phase::Sweep { floor, stage } => {
                    if let Some(step) = self.visit(ctx, floor, stage)? {
                        return Ok(step);
                    }
                }
            }
        }
    }
}
