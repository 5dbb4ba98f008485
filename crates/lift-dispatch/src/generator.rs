//! Per-floor passenger source.

use lift_core::{ElevatorId, FloorId};
use lift_kernel::{KernelResult, Process, Step};
use tracing::trace;

use crate::arrivals::generated_destination;
use crate::{Building, LiftCtx, PassengerProcess};

/// Creates one passenger on its floor every `inter_arrival` minutes, the
/// first one `inter_arrival` minutes after start.  Runs until the horizon.
#[derive(Debug)]
pub struct GeneratorProcess {
    floor:  FloorId,
    primed: bool,
}

impl GeneratorProcess {
    pub fn new(floor: FloorId) -> Self {
        Self { floor, primed: false }
    }
}

impl Process<Building, ElevatorId> for GeneratorProcess {
    fn name(&self) -> &'static str {
        "generator"
    }

    fn resume(&mut self, ctx: &mut LiftCtx<'_>) -> KernelResult<Step> {
        if !self.primed {
            self.primed = true;
            return Ok(Step::Hold(ctx.world.inter_arrival));
        }

        let world = &mut *ctx.world;
        let destination = generated_destination(&mut world.rng, world.floors, self.floor);
        let id = world.next_passenger_id();
        let inter_arrival = world.inter_arrival;

        let passenger = PassengerProcess::new(id, self.floor, destination)
            .ok_or_else(|| ctx.protocol_error(format!("generated a lateral trip on {}", self.floor)))?;
        trace!(now = %ctx.now(), passenger = id.0, origin = self.floor.0, destination = destination.0, "generated");
        ctx.spawn(Box::new(passenger));

        Ok(Step::Hold(inter_arrival))
    }
}
