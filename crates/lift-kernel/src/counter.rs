//! `ResourceCounter`: non-blocking reserve/release gauge.
//!
//! Unlike a semaphore the counter never blocks and has no upper bound; it
//! only records how many holders it has over time so utilization can be
//! reported afterwards.

use lift_core::{CounterId, SimTime};

use crate::{KernelError, KernelResult, TimeWeighted};

/// Snapshot of a counter's history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CounterStats {
    pub reservations:  u64,
    pub peak_holders:  u32,
    /// Time-average number of holders.
    pub mean_holders:  f64,
    /// Fraction of the run with at least one holder.
    pub busy_fraction: f64,
}

#[derive(Debug)]
pub struct ResourceCounter {
    id:           CounterId,
    name:         String,
    holders:      u32,
    reservations: u64,
    level:        TimeWeighted,
}

impl ResourceCounter {
    pub fn new(id: CounterId, name: impl Into<String>, created: SimTime) -> Self {
        Self {
            id,
            name: name.into(),
            holders: 0,
            reservations: 0,
            level: TimeWeighted::new(created),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn holders(&self) -> u32 {
        self.holders
    }

    pub fn reserve(&mut self, now: SimTime) {
        self.holders += 1;
        self.reservations += 1;
        self.level.set(now, f64::from(self.holders));
    }

    /// Drop one holder.
    ///
    /// # Panics
    /// Panics in debug mode on a release without a matching reserve; release
    /// builds report [`KernelError::UnbalancedRelease`] instead.
    pub fn release(&mut self, now: SimTime) -> KernelResult<()> {
        debug_assert!(self.holders > 0, "release on {} without a matching reserve", self.name);
        if self.holders == 0 {
            return Err(KernelError::UnbalancedRelease(self.id));
        }
        self.holders -= 1;
        self.level.set(now, f64::from(self.holders));
        Ok(())
    }

    pub fn stats(&self, now: SimTime) -> CounterStats {
        CounterStats {
            reservations:  self.reservations,
            peak_holders:  self.level.peak() as u32,
            mean_holders:  self.level.mean(now),
            busy_fraction: self.level.busy_fraction(now),
        }
    }
}
