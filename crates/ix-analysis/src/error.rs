use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("{expected} arms but {got} {what}")]
    ArmCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
