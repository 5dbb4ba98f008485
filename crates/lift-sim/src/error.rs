use lift_core::CoreError;
use lift_dispatch::DispatchError;
use lift_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("building setup error: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type SimResult<T> = Result<T, SimError>;
