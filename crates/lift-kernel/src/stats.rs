//! Time-weighted level statistics.

use lift_core::SimTime;

/// Integrates a piecewise-constant level over virtual time.
///
/// Every change of level first closes the interval since the previous change,
/// so `mean` is the exact time average regardless of how irregular the
/// updates are.
#[derive(Clone, Debug)]
pub struct TimeWeighted {
    start: SimTime,
    last:  SimTime,
    level: f64,
    area:  f64,
    busy:  f64,
    peak:  f64,
}

impl TimeWeighted {
    pub fn new(start: SimTime) -> Self {
        Self { start, last: start, level: 0.0, area: 0.0, busy: 0.0, peak: 0.0 }
    }

    /// Record that the level becomes `level` at `now`.
    pub fn set(&mut self, now: SimTime, level: f64) {
        self.close(now);
        self.level = level;
        self.peak = self.peak.max(level);
    }

    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[inline]
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// Time-average level over `[start, now]`.  A zero-length window reports
    /// the current level.
    pub fn mean(&self, now: SimTime) -> f64 {
        let span = now.since(self.start);
        if span <= 0.0 {
            return self.level;
        }
        (self.area + self.level * now.since(self.last).max(0.0)) / span
    }

    /// Fraction of `[start, now]` during which the level was non-zero.
    pub fn busy_fraction(&self, now: SimTime) -> f64 {
        let span = now.since(self.start);
        if span <= 0.0 {
            return if self.level > 0.0 { 1.0 } else { 0.0 };
        }
        let tail = if self.level > 0.0 { now.since(self.last).max(0.0) } else { 0.0 };
        (self.busy + tail) / span
    }

    fn close(&mut self, now: SimTime) {
        let dt = now.since(self.last);
        if dt > 0.0 {
            self.area += self.level * dt;
            if self.level > 0.0 {
                self.busy += dt;
            }
            self.last = now;
        }
    }
}
