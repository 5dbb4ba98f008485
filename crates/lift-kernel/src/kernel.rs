//! The `Kernel` struct and its scheduling loop.

use lift_core::{ChannelId, CounterId, ProcessId, SignalId, SimClock, SimTime};
use tracing::{debug, trace};

use crate::event_queue::{EventQueue, Resumption, WakeReason};
use crate::{
    Ctx, KernelError, KernelResult, Process, RendezvousChannel, ResourceCounter, Step, WakeSignal,
};

// ── Process table ─────────────────────────────────────────────────────────────

pub(crate) struct Entry<W, M> {
    name:    &'static str,
    /// `None` only while the process is executing.
    process: Option<Box<dyn Process<W, M>>>,
    inbox:   Option<M>,
}

/// Append-only slots indexed by `ProcessId`.  A finished process leaves a
/// `None` behind so stale ids can never alias a newer process.
pub(crate) struct ProcessTable<W, M> {
    slots: Vec<Option<Entry<W, M>>>,
    live:  usize,
}

impl<W, M> ProcessTable<W, M> {
    fn new() -> Self {
        Self { slots: Vec::new(), live: 0 }
    }

    pub(crate) fn insert(&mut self, process: Box<dyn Process<W, M>>) -> ProcessId {
        let pid = ProcessId(self.slots.len() as u32);
        self.slots.push(Some(Entry { name: process.name(), process: Some(process), inbox: None }));
        self.live += 1;
        pid
    }

    fn get_mut(&mut self, pid: ProcessId) -> Option<&mut Entry<W, M>> {
        self.slots.get_mut(pid.index()).and_then(Option::as_mut)
    }

    pub(crate) fn set_inbox(&mut self, pid: ProcessId, msg: M) -> KernelResult<()> {
        let entry = self.get_mut(pid).ok_or(KernelError::UnknownProcess(pid))?;
        entry.inbox = Some(msg);
        Ok(())
    }

    fn remove(&mut self, pid: ProcessId) {
        if let Some(slot) = self.slots.get_mut(pid.index()) {
            if slot.take().is_some() {
                self.live -= 1;
            }
        }
    }

    /// Drop every live process; returns how many there were.
    fn clear(&mut self) -> usize {
        let dropped = self.live;
        for slot in &mut self.slots {
            *slot = None;
        }
        self.live = 0;
        dropped
    }
}

// ── Primitives ────────────────────────────────────────────────────────────────

pub(crate) struct Primitives<M> {
    signals:  Vec<WakeSignal>,
    channels: Vec<RendezvousChannel<M>>,
    counters: Vec<ResourceCounter>,
}

impl<M> Primitives<M> {
    pub(crate) fn signal(&self, id: SignalId) -> KernelResult<&WakeSignal> {
        self.signals.get(id.index()).ok_or(KernelError::UnknownSignal(id))
    }

    pub(crate) fn signal_mut(&mut self, id: SignalId) -> KernelResult<&mut WakeSignal> {
        self.signals.get_mut(id.index()).ok_or(KernelError::UnknownSignal(id))
    }

    pub(crate) fn channel(&self, id: ChannelId) -> KernelResult<&RendezvousChannel<M>> {
        self.channels.get(id.index()).ok_or(KernelError::UnknownChannel(id))
    }

    pub(crate) fn channel_mut(&mut self, id: ChannelId) -> KernelResult<&mut RendezvousChannel<M>> {
        self.channels.get_mut(id.index()).ok_or(KernelError::UnknownChannel(id))
    }

    pub(crate) fn counter(&self, id: CounterId) -> KernelResult<&ResourceCounter> {
        self.counters.get(id.index()).ok_or(KernelError::UnknownCounter(id))
    }

    pub(crate) fn counter_mut(&mut self, id: CounterId) -> KernelResult<&mut ResourceCounter> {
        self.counters.get_mut(id.index()).ok_or(KernelError::UnknownCounter(id))
    }
}

// ── Kernel ────────────────────────────────────────────────────────────────────

/// Counters describing one run of the scheduler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KernelStats {
    pub resumptions: u64,
    pub spawned:     u64,
    pub finished:    u64,
    /// Processes still suspended when the run was halted.
    pub halted:      u64,
}

/// Virtual-time scheduler for processes sharing a world `W` and exchanging
/// channel messages of type `M`.
///
/// The kernel owns the clock, the event queue, every process, and every
/// synchronization primitive.  The world is passed in on each
/// [`step`][Self::step] so the caller keeps ownership of it between steps.
pub struct Kernel<W, M> {
    clock:   SimClock,
    horizon: SimTime,
    queue:   EventQueue,
    table:   ProcessTable<W, M>,
    prims:   Primitives<M>,
    stats:   KernelStats,
}

impl<W, M> Kernel<W, M> {
    /// Create an empty kernel that stops before `horizon` minutes.
    pub fn new(horizon: f64) -> Self {
        Self {
            clock:   SimClock::new(),
            horizon: SimTime::new(horizon),
            queue:   EventQueue::new(),
            table:   ProcessTable::new(),
            prims:   Primitives { signals: Vec::new(), channels: Vec::new(), counters: Vec::new() },
            stats:   KernelStats::default(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    pub fn add_signal(&mut self, name: impl Into<String>) -> SignalId {
        self.prims.signals.push(WakeSignal::new(name));
        SignalId(self.prims.signals.len() as u32 - 1)
    }

    pub fn add_channel(&mut self, name: impl Into<String>) -> ChannelId {
        self.prims.channels.push(RendezvousChannel::new(name, self.clock.now()));
        ChannelId(self.prims.channels.len() as u32 - 1)
    }

    pub fn add_counter(&mut self, name: impl Into<String>) -> CounterId {
        let id = CounterId(self.prims.counters.len() as u32);
        self.prims.counters.push(ResourceCounter::new(id, name, self.clock.now()));
        id
    }

    /// Register `process`; it first runs at the current time.
    pub fn spawn(&mut self, process: Box<dyn Process<W, M>>) -> ProcessId {
        let pid = self.table.insert(process);
        self.queue.push(self.clock.now(), Resumption { process: pid, reason: WakeReason::Start });
        self.stats.spawned += 1;
        pid
    }

    /// Queue a timer resumption for `pid` `duration` minutes from now.
    ///
    /// The caller must make sure `pid` is not already queued or waiting,
    /// otherwise it would be resumed twice.
    pub fn schedule_after(&mut self, duration: f64, pid: ProcessId) -> KernelResult<()> {
        if duration.is_nan() || duration < 0.0 {
            return Err(KernelError::NegativeDuration(duration));
        }
        if self.table.get_mut(pid).is_none() {
            return Err(KernelError::UnknownProcess(pid));
        }
        self.queue.push(self.clock.now() + duration, Resumption { process: pid, reason: WakeReason::Timer });
        Ok(())
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Resume exactly one process.
    ///
    /// Returns the time of the resumption, or `None` when the queue is empty
    /// or the next resumption lies at or beyond the horizon.  Processes
    /// sharing a timestamp resume one per call without the clock moving.
    pub fn step(&mut self, world: &mut W) -> KernelResult<Option<SimTime>> {
        match self.queue.next_time() {
            Some(next) if next < self.horizon => {}
            _ => return Ok(None),
        }
        let Some((at, Resumption { process: pid, reason })) = self.queue.pop() else {
            return Ok(None);
        };
        self.clock.advance_to(at)?;

        let Some(entry) = self.table.get_mut(pid) else {
            trace!(%at, pid = pid.0, %reason, "dropping resumption for finished process");
            return Ok(Some(at));
        };
        let name = entry.name;
        let inbox = entry.inbox.take();
        let mut process = entry.process.take().ok_or(KernelError::UnknownProcess(pid))?;

        trace!(%at, pid = pid.0, process = name, %reason, "resume");
        self.stats.resumptions += 1;

        let before = self.table.slots.len();
        let step = {
            let mut ctx = Ctx {
                now:   at,
                pid,
                world,
                queue: &mut self.queue,
                prims: &mut self.prims,
                table: &mut self.table,
                inbox,
            };
            process.resume(&mut ctx)?
        };
        self.stats.spawned += (self.table.slots.len() - before) as u64;

        self.apply(pid, process, step)?;
        Ok(Some(at))
    }

    /// Step until nothing is runnable before the horizon.  Does not halt.
    pub fn run(&mut self, world: &mut W) -> KernelResult<SimTime> {
        while self.step(world)?.is_some() {}
        Ok(self.clock.now())
    }

    /// Force-stop every remaining process and move the clock to the horizon.
    ///
    /// In-flight processes are dropped without running any further code.
    /// Returns how many were still alive.
    pub fn halt(&mut self) -> KernelResult<usize> {
        self.queue.clear();
        let dropped = self.table.clear();
        self.stats.halted += dropped as u64;
        if self.clock.now() < self.horizon {
            self.clock.advance_to(self.horizon)?;
        }
        debug!(at = %self.clock.now(), dropped, "kernel halted");
        Ok(dropped)
    }

    fn apply(&mut self, pid: ProcessId, process: Box<dyn Process<W, M>>, step: Step) -> KernelResult<()> {
        let now = self.clock.now();
        match step {
            Step::Done => {
                self.table.remove(pid);
                self.stats.finished += 1;
                return Ok(());
            }
            Step::Hold(duration) => {
                if duration.is_nan() || duration < 0.0 {
                    return Err(KernelError::NegativeDuration(duration));
                }
                self.queue.push(now + duration, Resumption { process: pid, reason: WakeReason::Timer });
            }
            Step::Wait(signal) => {
                self.prims.signal_mut(signal)?.register(pid);
            }
            Step::Receive(channel) => {
                if let Some(msg) = self.prims.channel_mut(channel)?.receive(now, pid) {
                    self.table.set_inbox(pid, msg)?;
                    self.queue.push(now, Resumption { process: pid, reason: WakeReason::Handoff(channel) });
                }
            }
        }
        let entry = self.table.get_mut(pid).ok_or(KernelError::UnknownProcess(pid))?;
        entry.process = Some(process);
        Ok(())
    }

    // ── Inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn stats(&self) -> &KernelStats {
        &self.stats
    }

    /// Processes spawned and not yet finished or halted.
    pub fn live_processes(&self) -> usize {
        self.table.live
    }

    /// Resumptions waiting in the event queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn signal(&self, id: SignalId) -> KernelResult<&WakeSignal> {
        self.prims.signal(id)
    }

    pub fn channel(&self, id: ChannelId) -> KernelResult<&RendezvousChannel<M>> {
        self.prims.channel(id)
    }

    pub fn counter(&self, id: CounterId) -> KernelResult<&ResourceCounter> {
        self.prims.counter(id)
    }
}
