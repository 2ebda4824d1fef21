//! Registry deployment errors.

use thiserror::Error;

use crate::class::ClassRef;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("Path {path} is already registered by {existing}")]
    DuplicatePath { path: String, existing: ClassRef },

    #[error("Invalid path template {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Endpoint container is closed")]
    ContainerClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_path_error() {
        let err = DeploymentError::DuplicatePath {
            path: "/echo".to_string(),
            existing: ClassRef::new("chat::Echo"),
        };
        let display = err.to_string();
        assert!(display.contains("/echo"));
        assert!(display.contains("chat::Echo"));
        assert!(display.contains("already registered"));
    }

    #[test]
    fn test_invalid_path_error() {
        let err = DeploymentError::InvalidPath {
            path: "echo".to_string(),
            reason: "must start with '/'".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("Invalid path template echo"));
        assert!(display.contains("must start with"));
    }

    #[test]
    fn test_container_closed_error() {
        assert!(DeploymentError::ContainerClosed.to_string().contains("closed"));
    }

    #[test]
    fn test_error_debug() {
        let debug = format!("{:?}", DeploymentError::ContainerClosed);
        assert!(debug.contains("ContainerClosed"));
    }
}
