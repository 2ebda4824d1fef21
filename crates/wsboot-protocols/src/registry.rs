//! Server-side endpoint registry contract.

use crate::endpoint::{EndpointConfig, PojoEndpoint};
use crate::error::DeploymentError;

/// Accepts the final endpoint registrations.
///
/// Implementations own their synchronization; the bootstrap pipeline only
/// calls into them from a single thread.
pub trait EndpointRegistry: Send + Sync {
    /// Bind the registry to the host context it serves.
    ///
    /// Called once per startup, before any registration.
    fn bind_context(&self, context_path: &str);

    /// Register an endpoint described by a config object.
    fn add_endpoint(&self, config: EndpointConfig) -> Result<(), DeploymentError>;

    /// Register an annotated endpoint class.
    fn add_pojo_endpoint(&self, endpoint: PojoEndpoint) -> Result<(), DeploymentError>;
}
