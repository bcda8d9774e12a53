use thiserror::Error;

use ix_core::{ArmId, PhaseId};

/// Configuration errors found by the validation pass.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("intersection must have at least one arm")]
    NoArms,

    #[error("intersection must have at least one phase")]
    NoPhases,

    #[error("{phase} serves {arm}, but the intersection only has {n_arms} arms")]
    ArmOutOfRange {
        phase:  PhaseId,
        arm:    ArmId,
        n_arms: usize,
    },

    #[error("cycle length is zero: every phase has zero green time")]
    ZeroCycle,

    #[error("{expected} arms but {got} arrival rates")]
    RateCountMismatch { expected: usize, got: usize },

    #[error("arrival rate {rate} veh/h for {arm} is not a finite non-negative number")]
    InvalidRate { arm: ArmId, rate: f64 },

    #[error("service probability {0} is outside [0, 1]")]
    InvalidServiceProbability(f64),

    #[error("{expected} phases but {got} split percentages")]
    SplitCountMismatch { expected: usize, got: usize },

    #[error("split percentage {0} is not a finite non-negative number")]
    InvalidSplit(f64),
}

pub type ModelResult<T> = Result<T, ModelError>;
