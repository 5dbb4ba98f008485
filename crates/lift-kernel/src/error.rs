use lift_core::{ChannelId, CoreError, CounterId, ProcessId, SignalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KernelError {
    #[error("cannot schedule {0} minutes into the past")]
    NegativeDuration(f64),

    #[error("unknown signal {0}")]
    UnknownSignal(SignalId),

    #[error("unknown channel {0}")]
    UnknownChannel(ChannelId),

    #[error("unknown counter {0}")]
    UnknownCounter(CounterId),

    #[error("{0} is not a live process")]
    UnknownProcess(ProcessId),

    #[error("{0} resumed without a pending handoff value")]
    EmptyInbox(ProcessId),

    #[error("release on {0} without a matching reserve")]
    UnbalancedRelease(CounterId),

    #[error("{process} violated its protocol: {detail}")]
    Protocol {
        process: ProcessId,
        detail:  String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type KernelResult<T> = Result<T, KernelError>;
