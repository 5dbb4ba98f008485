//! Building and run configuration.
//!
//! Typically assembled by the application crate (interactive prompts or a
//! JSON file with the `serde` feature) and handed to the simulation builder,
//! which calls [`BuildingConfig::validate`] before creating any process.

use crate::travel::DEFAULT_TRAVEL_COEFFICIENT;
use crate::{CoreError, CoreResult, Direction, ElevatorId, FloorId};

/// One simulated day, in minutes.
pub const DEFAULT_HORIZON: f64 = 1_440.0;

/// Minutes between generated passengers on each floor.
pub const DEFAULT_INTER_ARRIVAL: f64 = 5.0;

/// Share of seeded above-ground passengers heading for the ground floor.
pub const DEFAULT_GROUND_BIAS: f64 = 0.54;

/// A group of passengers released on `floor` at time zero.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalSeed {
    pub floor:      FloorId,
    pub group_size: u32,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BuildingConfig {
    /// Number of floors, `0..floors`.  Default: 8.
    pub floors: u16,

    /// Number of elevator cars.  Default: 2.
    pub elevators: u16,

    /// Explicit start floor per elevator.  `None` parks even-numbered cars on
    /// the ground floor and odd-numbered cars on the top floor.
    pub start_floors: Option<Vec<FloorId>>,

    /// Fixed passenger groups.  When empty, every floor runs a passenger
    /// generator instead.
    pub arrival_seeds: Vec<ArrivalSeed>,

    /// Minutes between generated passengers per floor.  Default: 5.
    pub inter_arrival: f64,

    /// Run length in minutes.  Default: 1440 (one day).
    pub horizon: f64,

    /// Travel-time coefficient (`c · √floors`).  Default: 5.
    pub travel_coefficient: f64,

    /// Probability that a seeded above-ground passenger heads for the ground
    /// floor.  Default: 0.54.
    pub ground_bias: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub rng_seed: u64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            floors:             8,
            elevators:          2,
            start_floors:       None,
            arrival_seeds:      Vec::new(),
            inter_arrival:      DEFAULT_INTER_ARRIVAL,
            horizon:            DEFAULT_HORIZON,
            travel_coefficient: DEFAULT_TRAVEL_COEFFICIENT,
            ground_bias:        DEFAULT_GROUND_BIAS,
            rng_seed:           42,
        }
    }
}

impl BuildingConfig {
    /// Check every field; the first problem found is reported as
    /// [`CoreError::InvalidConfiguration`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.floors < 2 {
            return Err(invalid(format!("need at least 2 floors, got {}", self.floors)));
        }
        if self.elevators == 0 {
            return Err(invalid("need at least one elevator".into()));
        }
        if let Some(starts) = &self.start_floors {
            if starts.len() != self.elevators as usize {
                return Err(invalid(format!(
                    "{} start floors given for {} elevators",
                    starts.len(),
                    self.elevators
                )));
            }
            if let Some(bad) = starts.iter().find(|f| !self.contains(**f)) {
                return Err(invalid(format!("start floor {} outside 0..{}", bad.0, self.floors)));
            }
        }
        if let Some(bad) = self.arrival_seeds.iter().find(|s| !self.contains(s.floor)) {
            return Err(invalid(format!("seed floor {} outside 0..{}", bad.floor.0, self.floors)));
        }
        if !(self.inter_arrival.is_finite() && self.inter_arrival > 0.0) {
            return Err(invalid(format!("inter-arrival must be positive, got {}", self.inter_arrival)));
        }
        if !(self.horizon.is_finite() && self.horizon > 0.0) {
            return Err(invalid(format!("horizon must be positive, got {}", self.horizon)));
        }
        if !(self.travel_coefficient.is_finite() && self.travel_coefficient >= 0.0) {
            return Err(invalid(format!(
                "travel coefficient must be non-negative, got {}",
                self.travel_coefficient
            )));
        }
        if !(0.0..=1.0).contains(&self.ground_bias) {
            return Err(invalid(format!("ground bias must lie in [0, 1], got {}", self.ground_bias)));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, floor: FloorId) -> bool {
        floor.0 < self.floors
    }

    #[inline]
    pub fn top_floor(&self) -> FloorId {
        FloorId(self.floors.saturating_sub(1))
    }

    /// Where `elevator` is parked at time zero.
    pub fn start_floor(&self, elevator: ElevatorId) -> FloorId {
        match &self.start_floors {
            Some(starts) => starts.get(elevator.index()).copied().unwrap_or(FloorId::GROUND),
            None if elevator.0 % 2 == 0 => FloorId::GROUND,
            None => self.top_floor(),
        }
    }

    /// Even-numbered cars sweep up first, odd-numbered cars sweep down first.
    #[inline]
    pub fn initial_direction(&self, elevator: ElevatorId) -> Direction {
        if elevator.0 % 2 == 0 { Direction::Up } else { Direction::Down }
    }

    /// `true` when no seeds are configured and every floor runs a generator.
    #[inline]
    pub fn uses_generators(&self) -> bool {
        self.arrival_seeds.is_empty()
    }

    pub fn floor_ids(&self) -> impl DoubleEndedIterator<Item = FloorId> + use<> {
        (0..self.floors).map(FloorId)
    }

    pub fn elevator_ids(&self) -> impl Iterator<Item = ElevatorId> + use<> {
        (0..self.elevators).map(ElevatorId)
    }
}

fn invalid(msg: String) -> CoreError {
    CoreError::InvalidConfiguration(msg)
}
