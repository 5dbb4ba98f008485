//! Integration tests for lift-sim.

use lift_core::{ArrivalSeed, BuildingConfig, FloorId, SimTime};
use lift_dispatch::{TripEvent, TripEventKind};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver, SimReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn seeded_config() -> BuildingConfig {
    BuildingConfig {
        floors:        6,
        elevators:     2,
        arrival_seeds: vec![
            ArrivalSeed { floor: FloorId(0), group_size: 8 },
            ArrivalSeed { floor: FloorId(4), group_size: 3 },
        ],
        ..BuildingConfig::default()
    }
}

fn generated_config(horizon: f64) -> BuildingConfig {
    BuildingConfig { floors: 5, elevators: 2, horizon, ..BuildingConfig::default() }
}

/// Records every callback.
#[derive(Default)]
struct Recorder {
    events: Vec<TripEvent>,
    halts:  Vec<(SimTime, u64)>,
    ended:  Option<SimReport>,
}

impl SimObserver for Recorder {
    fn on_trip_event(&mut self, event: &TripEvent) {
        self.events.push(*event);
    }

    fn on_halt(&mut self, time: SimTime, in_flight: u64) {
        self.halts.push((time, in_flight));
    }

    fn on_sim_end(&mut self, report: &SimReport) {
        self.ended = Some(report.clone());
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(BuildingConfig::default()).build().unwrap();
        // 8 generators + 2 elevators.
        assert_eq!(sim.kernel.live_processes(), 10);
        assert_eq!(sim.kernel.horizon(), SimTime::new(1440.0));
    }

    #[test]
    fn invalid_config_errors() {
        let config = BuildingConfig { elevators: 0, ..BuildingConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn seed_out_of_range_errors() {
        let result = SimBuilder::new(BuildingConfig::default())
            .seeds(vec![ArrivalSeed { floor: FloorId(99), group_size: 1 }])
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn overrides_apply() {
        let sim = SimBuilder::new(BuildingConfig::default())
            .horizon(60.0)
            .rng_seed(9)
            .seeds(vec![ArrivalSeed { floor: FloorId(2), group_size: 4 }])
            .build()
            .unwrap();
        assert_eq!(sim.config.horizon, 60.0);
        assert_eq!(sim.config.rng_seed, 9);
        // 4 passengers + 2 elevators, no generators.
        assert_eq!(sim.kernel.live_processes(), 6);
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn seeded_run_delivers_everyone_and_reaches_horizon() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(report.final_time, SimTime::new(1440.0));
        assert_eq!(report.passengers.generated, 11);
        assert_eq!(report.passengers.delivered, 11);
        assert_eq!(report.passengers.in_flight, 0);
        assert!(report.elevators.iter().all(|e| e.onboard_at_halt == 0));
        assert!(report.queues.iter().all(|q| q.waiting_at_halt == 0));
        // The two idle elevators were still waiting for work.
        assert_eq!(report.kernel.halted, 2);
    }

    #[test]
    fn generated_run_halts_with_passengers_in_flight() {
        let mut sim = SimBuilder::new(generated_config(120.0)).build().unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&mut rec).unwrap();

        assert_eq!(rec.halts.len(), 1);
        let (time, in_flight) = rec.halts[0];
        assert_eq!(time, SimTime::new(120.0));
        assert_eq!(in_flight, report.passengers.in_flight);
        // Generators never finish on their own.
        assert!(report.kernel.halted >= 5);
        assert!(report.passengers.generated > 0);
        assert_eq!(
            report.passengers.generated,
            report.passengers.delivered + report.passengers.in_flight
        );
    }

    #[test]
    fn generators_fire_on_schedule() {
        let mut sim = SimBuilder::new(generated_config(12.0)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let requested: Vec<f64> = rec
            .events
            .iter()
            .filter(|e| matches!(e.kind, TripEventKind::Requested { .. }))
            .map(|e| e.time.minutes())
            .collect();
        // One passenger per floor at t=5 and t=10.
        assert_eq!(requested.len(), 10);
        assert!(requested[..5].iter().all(|&t| t == 5.0));
        assert!(requested[5..].iter().all(|&t| t == 10.0));
    }

    #[test]
    fn observer_sees_every_event_in_order() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let mut rec = Recorder::default();
        let report = sim.run(&mut rec).unwrap();

        assert!(rec.events.windows(2).all(|w| w[0].time <= w[1].time));
        let alighted = rec.events.iter().filter(|e| matches!(e.kind, TripEventKind::Alighted { .. })).count();
        assert_eq!(alighted as u64, report.passengers.delivered);
        assert_eq!(rec.ended.as_ref(), Some(&report));
        assert!(sim.building.journal.events().is_empty());
    }

    #[test]
    fn queue_stats_account_for_every_request() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();

        let arrivals: u64 = report.queues.iter().map(|q| q.arrivals).sum();
        let pickups: u64 = report.queues.iter().map(|q| q.pickups).sum();
        assert_eq!(arrivals, 11);
        assert_eq!(pickups, 11);
        let boardings: u64 = report.elevators.iter().map(|e| e.boardings).sum();
        assert_eq!(boardings, 11);
        assert_eq!(report.queues.len(), 12);
    }

    #[test]
    fn workload_counter_tracks_boardings() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        for e in &report.elevators {
            assert_eq!(e.workload.reservations, e.boardings);
            // Boarding bookkeeping takes no simulated time.
            assert_eq!(e.workload.busy_fraction, 0.0);
        }
    }

    #[test]
    fn rerun_is_harmless() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let first = sim.run(&mut NoopObserver).unwrap();
        let second = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(first.passengers, second.passengers);
        assert_eq!(second.final_time, SimTime::new(1440.0));
    }

    #[test]
    fn report_renders() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let text = sim.run(&mut NoopObserver).unwrap().to_string();
        assert!(text.contains("11 generated, 11 delivered, 0 in flight"));
        assert!(text.contains("elevator"));
    }

    #[test]
    fn elevator_table_shows_reservations() {
        let mut sim = SimBuilder::new(seeded_config()).build().unwrap();
        let report = sim.run(&mut NoopObserver).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        let header = lines.iter().position(|l| l.starts_with("elevator")).unwrap();
        assert!(lines[header].trim_end().ends_with("reserved"));
        assert!(!lines[header].contains("busy"));

        for (row, e) in lines[header + 1..].iter().zip(&report.elevators) {
            let last = row.split_whitespace().last().unwrap();
            assert_eq!(last.parse::<u64>().unwrap(), e.workload.reservations);
        }
        let reserved: u64 = report.elevators.iter().map(|e| e.workload.reservations).sum();
        assert_eq!(reserved, 11);
    }
}

// ── Determinism and replications ──────────────────────────────────────────────

#[cfg(test)]
mod replication_tests {
    use super::*;
    use crate::run_replications;

    #[test]
    fn same_seed_same_report() {
        let a = SimBuilder::new(generated_config(240.0)).build().unwrap().run(&mut NoopObserver).unwrap();
        let b = SimBuilder::new(generated_config(240.0)).build().unwrap().run(&mut NoopObserver).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn replications_follow_seed_order() {
        let config = generated_config(120.0);
        let reports = run_replications(&config, &[1, 2, 1]).unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0], reports[2]);

        let single = SimBuilder::new(config).rng_seed(2).build().unwrap().run(&mut NoopObserver).unwrap();
        assert_eq!(reports[1], single);
    }

    #[test]
    fn replications_validate_first() {
        let config = BuildingConfig { floors: 0, ..BuildingConfig::default() };
        assert!(matches!(run_replications(&config, &[1]), Err(SimError::Config(_))));
    }
}
