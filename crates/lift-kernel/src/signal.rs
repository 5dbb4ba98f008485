//! `WakeSignal`: broadcast wake-up with no memory.

use lift_core::ProcessId;

/// A broadcast flag with a waiter list.
///
/// Raising the signal resumes every process registered at that moment and
/// empties the list.  Raising it while nobody waits does nothing: a process
/// that must not miss a change re-checks shared state before it waits.
#[derive(Debug)]
pub struct WakeSignal {
    name:    String,
    waiters: Vec<ProcessId>,
    raised:  u64,
}

impl WakeSignal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), waiters: Vec::new(), raised: 0 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of processes currently suspended on this signal.
    pub fn waiters(&self) -> usize {
        self.waiters.len()
    }

    /// How many times the signal has been raised.
    pub fn raised(&self) -> u64 {
        self.raised
    }

    pub(crate) fn register(&mut self, pid: ProcessId) {
        self.waiters.push(pid);
    }

    /// Count the raise and hand back the waiters in registration order.
    pub(crate) fn take_waiters(&mut self) -> Vec<ProcessId> {
        self.raised += 1;
        std::mem::take(&mut self.waiters)
    }
}
