//! Virtual time model.
//!
//! # Design
//!
//! Time is a floating-point count of simulated minutes held in `SimTime`.
//! The scheduler leaps from one pending resumption to the next, so there is
//! no fixed tick: a sweep that takes `5·√3` minutes advances the clock by
//! exactly that amount.
//!
//! `SimTime` is totally ordered via `f64::total_cmp`, which lets it key a
//! `BTreeMap` directly.  NaN never enters the system: every constructor and
//! arithmetic path either rejects it or cannot produce it from finite input.

use std::cmp::Ordering;
use std::fmt;

use crate::{CoreError, CoreResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in virtual time (simulated minutes since start).
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap a raw minute count.
    ///
    /// # Panics
    /// Panics in debug mode if `minutes` is NaN.
    #[inline]
    pub fn new(minutes: f64) -> SimTime {
        debug_assert!(!minutes.is_nan(), "SimTime cannot be NaN");
        SimTime(minutes)
    }

    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// Minutes elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime::new(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The simulation's monotone virtual clock.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `to`.
    ///
    /// Returns [`CoreError::TimeReversal`] if `to` lies before the current
    /// time; the clock is left untouched in that case.
    pub fn advance_to(&mut self, to: SimTime) -> CoreResult<()> {
        if to < self.now {
            return Err(CoreError::TimeReversal { now: self.now.minutes(), to: to.minutes() });
        }
        self.now = to;
        Ok(())
    }
}
