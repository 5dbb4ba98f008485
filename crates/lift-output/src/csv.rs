//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `trip_events.csv`
//! - `elevators.csv`
//! - `floor_queues.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use lift_sim::SimReport;

use crate::writer::OutputWriter;
use crate::{ElevatorRow, OutputResult, QueueRow, TripEventRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    elevators: Writer<File>,
    queues:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join("trip_events.csv"))?;
        events.write_record(["time", "kind", "passenger", "elevator", "floor", "destination", "direction"])?;

        let mut elevators = Writer::from_path(dir.join("elevators.csv"))?;
        elevators.write_record([
            "elevator",
            "final_floor",
            "boardings",
            "alightings",
            "stops",
            "sweeps",
            "floors_travelled",
            "time_moving",
            "mean_occupancy",
            "peak_occupancy",
            "mean_workload",
            "busy_fraction",
        ])?;

        let mut queues = Writer::from_path(dir.join("floor_queues.csv"))?;
        queues.write_record([
            "floor",
            "direction",
            "arrivals",
            "pickups",
            "peak_waiting",
            "mean_waiting",
            "mean_wait",
            "max_wait",
        ])?;

        Ok(Self { events, elevators, queues, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_trip_events(&mut self, rows: &[TripEventRow]) -> OutputResult<()> {
        for row in rows {
            self.events.write_record(&[
                row.time.to_string(),
                row.kind.to_string(),
                opt(row.passenger),
                opt(row.elevator),
                opt(row.floor),
                opt(row.destination),
                opt(row.direction),
            ])?;
        }
        Ok(())
    }

    fn write_report(&mut self, report: &SimReport) -> OutputResult<()> {
        for row in report.elevators.iter().map(ElevatorRow::from) {
            self.elevators.write_record(&[
                row.elevator.to_string(),
                row.final_floor.to_string(),
                row.boardings.to_string(),
                row.alightings.to_string(),
                row.stops.to_string(),
                row.sweeps.to_string(),
                row.floors_travelled.to_string(),
                row.time_moving.to_string(),
                row.mean_occupancy.to_string(),
                row.peak_occupancy.to_string(),
                row.mean_workload.to_string(),
                row.busy_fraction.to_string(),
            ])?;
        }
        for row in report.queues.iter().map(QueueRow::from) {
            self.queues.write_record(&[
                row.floor.to_string(),
                row.direction.to_string(),
                row.arrivals.to_string(),
                row.pickups.to_string(),
                row.peak_waiting.to_string(),
                row.mean_waiting.to_string(),
                row.mean_wait.to_string(),
                row.max_wait.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.elevators.flush()?;
        self.queues.flush()?;
        Ok(())
    }
}
