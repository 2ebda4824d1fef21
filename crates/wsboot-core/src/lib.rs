//! # wsboot Core
//!
//! Bootstrap pipeline discovering WebSocket endpoints and registering them
//! with a server-side endpoint container.
//!
//! ## Components
//!
//! - [`Classifier`] - Sorts scanned candidates into endpoint buckets
//! - [`ApplicationConfigResolver`] - Constructs application config hooks and endpoint configs
//! - [`EndpointFilter`] - Decides which endpoints are deployed
//! - [`Registrar`] - Pushes the deployment into an [`EndpointRegistry`](wsboot_protocols::EndpointRegistry)
//! - [`Initializer`] - Host startup callback wiring the stages together
//! - [`EndpointContainer`] - In-memory endpoint registry
//! - [`HostContext`] / [`LifecycleManager`] - Host context path and lifecycle listeners

pub mod classifier;
pub mod container;
pub mod filter;
pub mod host;
pub mod initializer;
pub mod lifecycle;
pub mod listener;
pub mod loader;
pub mod registrar;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use classifier::{Classification, Classifier, API_NAMESPACE};
pub use container::{DeployedEndpoint, EndpointContainer, EndpointKind, PathTemplate};
pub use filter::{Deployment, EndpointFilter};
pub use host::HostContext;
pub use initializer::{Initializer, StartupPlan, StartupReport};
pub use lifecycle::{HostState, LifecycleHook, LifecycleManager};
pub use listener::ContainerListener;
pub use loader::ClassLoader;
pub use registrar::{RegistrationReport, Registrar};
pub use resolver::{ApplicationConfigResolver, Resolved};
