//! # wsboot Protocols
//!
//! Contracts shared by the endpoint bootstrap pipeline and its collaborators.
//! Contains only descriptors, traits and errors - no implementations.
//!
//! ## Core Types
//!
//! - [`CandidateClass`] - A scanned class and the capabilities the scanner found on it
//! - [`EndpointConfig`] - A resolved endpoint description
//! - [`PojoEndpoint`] - A class deployable through its endpoint annotation alone
//!
//! ## Core Traits
//!
//! - [`ApplicationConfig`] - Application hook owning endpoint selection
//! - [`Instantiator`] - Construction of discovered classes
//! - [`EndpointRegistry`] - Server-side endpoint container accepting registrations

pub mod application;
pub mod class;
pub mod endpoint;
pub mod error;
pub mod instantiate;
pub mod registry;

pub use application::ApplicationConfig;
pub use class::{CandidateClass, Capability, ClassRef, EndpointAnnotation};
pub use endpoint::{DeployedEntity, EndpointConfig, PojoEndpoint};
pub use error::{ConstructionError, DeploymentError, LifecycleError, StartupError};
pub use instantiate::Instantiator;
pub use registry::EndpointRegistry;
