//! Top-level startup failure.

use thiserror::Error;

use super::{ConstructionError, DeploymentError};
use crate::class::ClassRef;
use crate::endpoint::DeployedEntity;

/// The single failure signal of the bootstrap pipeline.
///
/// The underlying cause stays reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to construct {class}: {source}")]
    Construction {
        class: ClassRef,
        #[source]
        source: ConstructionError,
    },

    #[error("Failed to deploy {entity}: {source}")]
    Deployment {
        entity: DeployedEntity,
        #[source]
        source: DeploymentError,
    },
}

impl From<ConstructionError> for StartupError {
    fn from(source: ConstructionError) -> Self {
        StartupError::Construction {
            class: source.class().clone(),
            source,
        }
    }
}
