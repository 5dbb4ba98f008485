//! `lift-core`: foundational types for the `liftsim` elevator simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `FloorId`, `ElevatorId`, `PassengerId`, kernel handle ids  |
//! | [`time`]        | `SimTime`, `SimClock`                                      |
//! | [`direction`]   | `Direction` enum                                           |
//! | [`travel`]      | `travel_time` model                                        |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                           |
//! | [`config`]      | `BuildingConfig`, `ArrivalSeed`                            |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod travel;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalSeed, BuildingConfig};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{ChannelId, CounterId, ElevatorId, FloorId, PassengerId, ProcessId, SignalId};
pub use rng::SimRng;
pub use time::{SimClock, SimTime};
pub use travel::travel_time;
