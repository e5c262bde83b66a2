use crate::backend::BackendError;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid: {0}")]
    Invalid(String),
}

/// Everything that can turn an invocation into a `Failure`.
///
/// The `Display` output is the exact text carried by the failure envelope.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No arguments provided")]
    NoArguments,
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl DispatchError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, DispatchError::Backend(_))
    }
}
