//! Construction capability for discovered classes.

use std::sync::Arc;

use crate::application::ApplicationConfig;
use crate::class::ClassRef;
use crate::endpoint::EndpointConfig;
use crate::error::ConstructionError;

/// Creates instances of scanned classes.
///
/// Each call produces a fresh instance; implementations must not cache them
/// across startups.
pub trait Instantiator: Send + Sync {
    /// Construct an application config hook.
    fn instantiate_application_config(
        &self,
        class: &ClassRef,
    ) -> Result<Arc<dyn ApplicationConfig>, ConstructionError>;

    /// Construct an endpoint config object and read its description.
    fn instantiate_endpoint_config(
        &self,
        class: &ClassRef,
    ) -> Result<EndpointConfig, ConstructionError>;
}
