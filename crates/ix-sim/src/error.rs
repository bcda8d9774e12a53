use ix_core::Tick;
use ix_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ModelError),

    #[error("run cancelled at {at}")]
    Cancelled { at: Tick },

    #[error("run exceeded its wall-clock deadline at {at}")]
    DeadlineExceeded { at: Tick },
}

pub type SimResult<T> = Result<T, SimError>;
