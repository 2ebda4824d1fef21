//! Host lifecycle errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Cannot {action} from state {state}")]
    InvalidState { action: &'static str, state: String },

    #[error("Lifecycle listener failed to start: {0}")]
    StartFailed(String),

    #[error("Lifecycle listener failed to stop: {0}")]
    StopFailed(String),

    #[error("Lifecycle listener timed out")]
    Timeout,

    #[error("{0} listeners failed during shutdown")]
    ShutdownIncomplete(usize),
}
