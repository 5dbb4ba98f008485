use lift_core::{CoreError, FloorId};
use lift_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error("passenger origin and destination are both {0}")]
    LateralTrip(FloorId),

    #[error("seed parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
