//! `lift-output`: simulation output writers for liftsim.
//!
//! | Backend | Files created                                               |
//! |---------|-------------------------------------------------------------|
//! | CSV     | `trip_events.csv`, `elevators.csv`, `floor_queues.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `lift_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ElevatorRow, QueueRow, TripEventRow};
pub use writer::OutputWriter;
