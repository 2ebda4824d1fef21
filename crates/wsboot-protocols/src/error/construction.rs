//! Class construction errors.

use thiserror::Error;

use crate::class::ClassRef;

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("No constructor available for {0}")]
    NoConstructor(ClassRef),

    #[error("{class} cannot be constructed as {expected}")]
    WrongKind {
        class: ClassRef,
        expected: &'static str,
    },

    #[error("Access denied while constructing {0}")]
    AccessDenied(ClassRef),

    #[error("Constructor of {class} failed: {reason}")]
    Failed { class: ClassRef, reason: String },
}

impl ConstructionError {
    /// The class whose construction failed.
    pub fn class(&self) -> &ClassRef {
        match self {
            ConstructionError::NoConstructor(class)
            | ConstructionError::AccessDenied(class)
            | ConstructionError::WrongKind { class, .. }
            | ConstructionError::Failed { class, .. } => class,
        }
    }
}
