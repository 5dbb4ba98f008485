//! `lift-dispatch`: the elevator domain built on `lift-kernel`.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`registry`]  | `FloorRequestRegistry`: want-up / want-down / want-off flags |
//! | [`building`]  | `Building` world, `CarState`, `Wiring`, `Building::install`  |
//! | [`arrivals`]  | Destination draws for generated and seeded passengers        |
//! | [`generator`] | `GeneratorProcess`: one per floor                           |
//! | [`passenger`] | `PassengerProcess`: one journey                             |
//! | [`elevator`]  | `ElevatorProcess`: sweep dispatch, unload and load          |
//! | [`journal`]   | `TripEvent`, `Journal`, `PassengerTally`                     |
//! | [`loader`]    | `load_seeds_csv`, `load_seeds_reader`                        |
//! | [`error`]     | `DispatchError`, `DispatchResult<T>`                         |
//!
//! # Journey of one passenger
//!
//! ```text
//! passenger                         elevator
//! ─────────                         ────────
//! want_up[f] = true
//! raise wakeup            ───────▶  (re-checks registry, sweeps up)
//! receive on call[f][up]  ◀───────  send own id, raise heading-up
//! want_off[e][d] = true
//! raise boarded           ───────▶  onboard += 1, next waiting passenger…
//! wait arrived[e]         ◀───────  raise arrived at every stop
//!   (floor ≠ d → wait again)
//! receive on exit[e]      ◀───────  send, one alighting passenger at a time
//! raise alighted          ───────▶  onboard -= 1
//! ```

pub mod arrivals;
pub mod building;
pub mod elevator;
pub mod error;
pub mod generator;
pub mod journal;
pub mod loader;
pub mod passenger;
pub mod registry;


use lift_core::ElevatorId;
use lift_kernel::{Ctx, Kernel};

pub use building::{Building, CarState, CarWiring, Wiring};
pub use elevator::ElevatorProcess;
pub use error::{DispatchError, DispatchResult};
pub use generator::GeneratorProcess;
pub use journal::{Journal, PassengerTally, TripEvent, TripEventKind};
pub use loader::{load_seeds_csv, load_seeds_reader};
pub use passenger::PassengerProcess;
pub use registry::FloorRequestRegistry;

/// The kernel specialised to the elevator world.  Channel messages are the
/// identity of the elevator doing the pickup or drop-off.
pub type LiftKernel = Kernel<Building, ElevatorId>;

/// Process context inside a [`LiftKernel`].
pub type LiftCtx<'a> = Ctx<'a, Building, ElevatorId>;
