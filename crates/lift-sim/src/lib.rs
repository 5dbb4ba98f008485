//! `lift-sim`: run driver for the elevator simulation.
//!
//! # Run loop
//!
//! ```text
//! SimBuilder::build:
//!   validate config → new kernel → Building::install (spawns processes)
//!
//! Sim::run:
//!   while kernel.step() resumes a process before the horizon:
//!     forward new journal events to the observer
//!   kernel.halt()         → drop suspended processes, clock := horizon
//!   observer.on_halt(horizon, passengers in flight)
//!   SimReport::collect()  → elevators, floor queues, passenger totals
//!   observer.on_sim_end(&report)
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | [`run_replications`] runs replications on Rayon.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::BuildingConfig;
//! use lift_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(BuildingConfig::default()).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("{report}");
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod replication;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use replication::run_replications;
pub use report::{ElevatorSummary, PassengerSummary, QueueSummary, SimReport};
pub use sim::Sim;
