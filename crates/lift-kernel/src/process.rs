//! The `Process` trait: the main extension point for simulation code.

use lift_core::{ChannelId, CounterId, ProcessId, SignalId, SimTime};

use crate::event_queue::{EventQueue, Resumption, WakeReason};
use crate::kernel::{Primitives, ProcessTable};
use crate::{KernelError, KernelResult};

/// What a process does when it gives control back to the scheduler.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Step {
    /// Sleep for the given number of virtual minutes.
    Hold(f64),
    /// Suspend until the signal is next raised.
    Wait(SignalId),
    /// Suspend until the channel hands over a value (immediately if one is
    /// buffered).  Read it with [`Ctx::received`] on the next resume.
    Receive(ChannelId),
    /// The process has finished and its slot is freed.
    Done,
}

/// A logical process driven by the kernel.
///
/// Implementations are explicit state machines: `resume` picks up where the
/// previous call left off, runs until the next suspension point, and returns
/// the [`Step`] describing that suspension.  Exactly one process runs at a
/// time, so `resume` may freely mutate the shared world `W` through
/// [`Ctx::world`].
///
/// # Example
///
/// ```rust,ignore
/// struct Ticker { remaining: u32 }
///
/// impl Process<(), ()> for Ticker {
///     fn name(&self) -> &'static str { "ticker" }
///     fn resume(&mut self, _ctx: &mut Ctx<'_, (), ()>) -> KernelResult<Step> {
///         if self.remaining == 0 {
///             return Ok(Step::Done);
///         }
///         self.remaining -= 1;
///         Ok(Step::Hold(1.0))
///     }
/// }
/// ```
pub trait Process<W, M> {
    /// Short label used in traces.
    fn name(&self) -> &'static str;

    /// Run until the next suspension point.
    fn resume(&mut self, ctx: &mut Ctx<'_, W, M>) -> KernelResult<Step>;
}

/// The running process's view of the kernel.
///
/// Operations here never suspend the caller; suspension only happens by
/// returning a [`Step`] from [`Process::resume`].
pub struct Ctx<'a, W, M> {
    pub(crate) now:   SimTime,
    pub(crate) pid:   ProcessId,
    /// Shared simulation state.
    pub world:        &'a mut W,
    pub(crate) queue: &'a mut EventQueue,
    pub(crate) prims: &'a mut Primitives<M>,
    pub(crate) table: &'a mut ProcessTable<W, M>,
    pub(crate) inbox: Option<M>,
}

impl<W, M> Ctx<'_, W, M> {
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Raise `signal`: every current waiter resumes at the current time, in
    /// registration order.  Returns how many were woken.
    pub fn signal(&mut self, signal: SignalId) -> KernelResult<usize> {
        let waiters = self.prims.signal_mut(signal)?.take_waiters();
        for &process in &waiters {
            self.queue.push(self.now, Resumption { process, reason: WakeReason::Signal(signal) });
        }
        Ok(waiters.len())
    }

    /// Processes currently suspended on `signal`.
    pub fn waiters(&self, signal: SignalId) -> KernelResult<usize> {
        Ok(self.prims.signal(signal)?.waiters())
    }

    /// Offer `msg` on `channel`.  Never blocks the caller.
    pub fn send(&mut self, channel: ChannelId, msg: M) -> KernelResult<()> {
        let now = self.now;
        if let Some((process, msg)) = self.prims.channel_mut(channel)?.send(now, msg) {
            self.table.set_inbox(process, msg)?;
            self.queue.push(now, Resumption { process, reason: WakeReason::Handoff(channel) });
        }
        Ok(())
    }

    /// Receivers blocked on `channel`.
    pub fn waiting(&self, channel: ChannelId) -> KernelResult<usize> {
        Ok(self.prims.channel(channel)?.waiting())
    }

    /// Values sent on `channel` that nobody has claimed yet.
    pub fn buffered(&self, channel: ChannelId) -> KernelResult<usize> {
        Ok(self.prims.channel(channel)?.buffered())
    }

    /// Take the value handed over by the channel this process received on.
    pub fn received(&mut self) -> KernelResult<M> {
        self.inbox.take().ok_or(KernelError::EmptyInbox(self.pid))
    }

    pub fn reserve(&mut self, counter: CounterId) -> KernelResult<()> {
        let now = self.now;
        self.prims.counter_mut(counter)?.reserve(now);
        Ok(())
    }

    pub fn release(&mut self, counter: CounterId) -> KernelResult<()> {
        let now = self.now;
        self.prims.counter_mut(counter)?.release(now)
    }

    /// Start a new process; it first runs at the current time, after every
    /// resumption already queued for this instant.
    pub fn spawn(&mut self, process: Box<dyn Process<W, M>>) -> ProcessId {
        let pid = self.table.insert(process);
        self.queue.push(self.now, Resumption { process: pid, reason: WakeReason::Start });
        pid
    }

    /// Build a [`KernelError::Protocol`] for the running process.
    pub fn protocol_error(&self, detail: impl Into<String>) -> KernelError {
        KernelError::Protocol { process: self.pid, detail: detail.into() }
    }
}
