//! `lift-kernel`: discrete-event scheduler for cooperative logical processes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`event_queue`] | `EventQueue` (`BTreeMap<SimTime, VecDeque<Resumption>>`)   |
//! | [`process`]     | `Process` trait, `Step`, `Ctx`                             |
//! | [`signal`]      | `WakeSignal`: broadcast, memoryless                       |
//! | [`channel`]     | `RendezvousChannel`: FIFO handoff queue                   |
//! | [`counter`]     | `ResourceCounter`: non-blocking workload gauge            |
//! | [`stats`]       | `TimeWeighted` accumulator                                 |
//! | [`kernel`]      | `Kernel`: the scheduler loop                              |
//! | [`error`]       | `KernelError`, `KernelResult<T>`                           |
//!
//! # Execution model
//!
//! ```text
//! loop:
//!   ① pop the earliest Resumption (FIFO among equal timestamps)
//!   ② stop if the queue is empty or the resumption lies at/after the horizon
//!   ③ advance the clock, take the process out of its slot
//!   ④ process.resume(ctx) runs until its next suspension point → Step
//!   ⑤ apply the Step:
//!        Hold(d)      → push (now + d) into the queue
//!        Wait(sig)    → register as waiter on the signal
//!        Receive(ch)  → take a buffered value now, or block as receiver
//!        Done         → free the slot
//! ```
//!
//! Exactly one process runs at a time and nothing preempts it, so shared
//! world state needs no locking.

pub mod channel;
pub mod counter;
pub mod error;
pub mod event_queue;
pub mod kernel;
pub mod process;
pub mod signal;
pub mod stats;

#[cfg(test)]
mod tests;

pub use channel::{ChannelStats, RendezvousChannel};
pub use counter::{CounterStats, ResourceCounter};
pub use error::{KernelError, KernelResult};
pub use event_queue::{EventQueue, Resumption, WakeReason};
pub use kernel::{Kernel, KernelStats};
pub use process::{Ctx, Process, Step};
pub use signal::WakeSignal;
pub use stats::TimeWeighted;
