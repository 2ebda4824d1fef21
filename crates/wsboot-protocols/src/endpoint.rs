//! Endpoint descriptions produced by the bootstrap pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::class::{ClassRef, EndpointAnnotation};

/// A resolved endpoint description.
///
/// Two configs are the same endpoint when every field matches, so sets of
/// configs never hold the same description twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Class implementing the base endpoint contract.
    pub endpoint_class: ClassRef,
    /// Path template the endpoint is published under.
    pub path: String,
    #[serde(default)]
    pub subprotocols: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl EndpointConfig {
    pub fn new(endpoint_class: impl Into<ClassRef>, path: impl Into<String>) -> Self {
        Self {
            endpoint_class: endpoint_class.into(),
            path: path.into(),
            subprotocols: Vec::new(),
            extensions: Vec::new(),
        }
    }

    pub fn with_subprotocols<I, S>(mut self, subprotocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subprotocols = subprotocols.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

/// An annotated class deployable without a separate config object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PojoEndpoint {
    pub class: ClassRef,
    pub annotation: EndpointAnnotation,
}

impl PojoEndpoint {
    pub fn new(class: impl Into<ClassRef>, annotation: EndpointAnnotation) -> Self {
        Self {
            class: class.into(),
            annotation,
        }
    }

    pub fn path(&self) -> &str {
        &self.annotation.path
    }
}

/// Something the registrar hands to a registry; used to name failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployedEntity {
    Config(EndpointConfig),
    Pojo(PojoEndpoint),
}

impl DeployedEntity {
    pub fn class(&self) -> &ClassRef {
        match self {
            DeployedEntity::Config(config) => &config.endpoint_class,
            DeployedEntity::Pojo(pojo) => &pojo.class,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            DeployedEntity::Config(config) => &config.path,
            DeployedEntity::Pojo(pojo) => pojo.path(),
        }
    }
}

impl fmt::Display for DeployedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployedEntity::Config(config) => write!(
                f,
                "endpoint config for {} at {}",
                config.endpoint_class, config.path
            ),
            DeployedEntity::Pojo(pojo) => {
                write!(f, "annotated endpoint {} at {}", pojo.class, pojo.path())
            }
        }
    }
}
