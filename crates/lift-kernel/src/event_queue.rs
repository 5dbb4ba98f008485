//! `EventQueue`: time-ordered queue of pending process resumptions.
//!
//! # Ordering
//!
//! Resumptions are keyed by wake time in a `BTreeMap`.  Each key holds a
//! `VecDeque`, so resumptions that share a timestamp come back out in the
//! order they went in.  This FIFO tie-break is what makes a run
//! deterministic: a process that raises a signal and then holds for a
//! negligible instant is guaranteed to resume after every waiter it woke.
//!
//! `BTreeMap` gives O(log W) push and pop where W is the number of distinct
//! pending timestamps.  W stays small: roughly one entry per live process.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use lift_core::{ChannelId, ProcessId, SignalId, SimTime};

/// Why a process is being resumed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WakeReason {
    /// First activation after spawn.
    Start,
    /// A `Hold` elapsed.
    Timer,
    /// A signal the process waited on was raised.
    Signal(SignalId),
    /// A channel handed the process a value.
    Handoff(ChannelId),
}

impl fmt::Display for WakeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WakeReason::Start => f.write_str("start"),
            WakeReason::Timer => f.write_str("timer"),
            WakeReason::Signal(s) => write!(f, "signal {}", s.0),
            WakeReason::Handoff(c) => write!(f, "handoff on channel {}", c.0),
        }
    }
}

/// One pending resumption.  Destroyed once delivered.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Resumption {
    pub process: ProcessId,
    pub reason:  WakeReason,
}

#[derive(Default)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<Resumption>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `resumption` at `at`, behind anything already queued there.
    pub fn push(&mut self, at: SimTime, resumption: Resumption) {
        self.inner.entry(at).or_default().push_back(resumption);
        self.total += 1;
    }

    /// Remove and return the earliest resumption.
    pub fn pop(&mut self) -> Option<(SimTime, Resumption)> {
        let mut entry = self.inner.first_entry()?;
        let at = *entry.key();
        let resumption = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.total -= 1;
        Some((at, resumption))
    }

    /// The earliest pending wake time, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future timestamps with at least one resumption.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }

    /// Drop every pending resumption.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.total = 0;
    }
}
