//! `RendezvousChannel`: synchronous FIFO handoff between processes.
//!
//! Two queues live inside a channel: values that were sent while nobody was
//! receiving, and receivers that blocked while no value was available.  At
//! most one of them is non-empty at any time.
//!
//! In the elevator model a passenger blocks as a receiver on its floor's
//! channel, and an elevator "picks it up" by sending its own identity.  The
//! number of blocked receivers ([`RendezvousChannel::waiting`]) is therefore
//! the floor's calling count.

use std::collections::VecDeque;

use lift_core::{ProcessId, SimTime};

use crate::TimeWeighted;

/// Queue statistics of one channel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelStats {
    /// Receivers that arrived at the channel.
    pub arrivals:     u64,
    /// Values delivered to a receiver.
    pub handoffs:     u64,
    /// Most receivers blocked at once.
    pub peak_waiting: usize,
    /// Sum of receiver blocking times, minutes.
    pub total_wait:   f64,
    /// Longest single receiver blocking time, minutes.
    pub max_wait:     f64,
}

impl ChannelStats {
    /// Mean blocking time of receivers that were served.
    pub fn mean_wait(&self) -> f64 {
        if self.handoffs == 0 { 0.0 } else { self.total_wait / self.handoffs as f64 }
    }
}

#[derive(Debug)]
pub struct RendezvousChannel<M> {
    name:      String,
    buffered:  VecDeque<M>,
    receivers: VecDeque<(ProcessId, SimTime)>,
    stats:     ChannelStats,
    level:     TimeWeighted,
}

impl<M> RendezvousChannel<M> {
    pub fn new(name: impl Into<String>, created: SimTime) -> Self {
        Self {
            name:      name.into(),
            buffered:  VecDeque::new(),
            receivers: VecDeque::new(),
            stats:     ChannelStats::default(),
            level:     TimeWeighted::new(created),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Receivers currently blocked on this channel.
    pub fn waiting(&self) -> usize {
        self.receivers.len()
    }

    /// Values sent but not yet claimed.
    pub fn buffered(&self) -> usize {
        self.buffered.len()
    }

    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    /// Time-average number of blocked receivers up to `now`.
    pub fn mean_waiting(&self, now: SimTime) -> f64 {
        self.level.mean(now)
    }

    /// Offer `msg`.  If a receiver is blocked, the oldest one claims it and
    /// is returned so the caller can resume it; otherwise the value is
    /// buffered and the sender carries on.
    pub(crate) fn send(&mut self, now: SimTime, msg: M) -> Option<(ProcessId, M)> {
        match self.receivers.pop_front() {
            Some((pid, since)) => {
                self.record_handoff(now, since);
                Some((pid, msg))
            }
            None => {
                self.buffered.push_back(msg);
                None
            }
        }
    }

    /// `pid` asks for a value.  Returns a buffered value immediately, or
    /// registers `pid` as a blocked receiver and returns `None`.
    pub(crate) fn receive(&mut self, now: SimTime, pid: ProcessId) -> Option<M> {
        self.stats.arrivals += 1;
        match self.buffered.pop_front() {
            Some(msg) => {
                self.stats.handoffs += 1;
                Some(msg)
            }
            None => {
                self.receivers.push_back((pid, now));
                self.stats.peak_waiting = self.stats.peak_waiting.max(self.receivers.len());
                self.level.set(now, self.receivers.len() as f64);
                None
            }
        }
    }

    fn record_handoff(&mut self, now: SimTime, since: SimTime) {
        let waited = now.since(since);
        self.stats.handoffs += 1;
        self.stats.total_wait += waited;
        self.stats.max_wait = self.stats.max_wait.max(waited);
        self.level.set(now, self.receivers.len() as f64);
    }
}
