//! Server-side endpoint container.

pub mod base;
pub mod endpoint;
pub mod path;

pub use base::{BaseRegistry, Registerable};
pub use endpoint::{DeployedEndpoint, EndpointContainer, EndpointKind};
pub use path::PathTemplate;
