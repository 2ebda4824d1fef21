//! Error types for the bootstrap contracts.

mod construction;
mod deployment;
mod lifecycle;
mod startup;

pub use construction::*;
pub use deployment::*;
pub use lifecycle::*;
pub use startup::*;
