//! # wsboot Config
//!
//! Host configuration and scan manifest loading for wsboot.

mod error;
mod loader;
mod manifest;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use manifest::{ApplicationConfigEntry, ManifestClass, ScanManifest};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
