//! Scanned class descriptors.
//!
//! The scanning collaborator describes every discovered class by its path and
//! the set of capabilities it found on it. Nothing here inspects code at
//! runtime; the descriptor is the whole truth about a candidate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between namespace segments in a class path.
pub const PATH_SEPARATOR: &str = "::";

/// Fully qualified reference to a class, e.g. `chat::endpoints::Echo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassRef(String);

impl ClassRef {
    /// Create a class reference from its fully qualified path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace the class lives in. Empty for root-level classes.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(PATH_SEPARATOR) {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// The last path segment.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind(PATH_SEPARATOR) {
            Some(idx) => &self.0[idx + PATH_SEPARATOR.len()..],
            None => &self.0,
        }
    }

    /// Check whether the class lives in `namespace` or one of its children.
    ///
    /// Matching is per segment: `a::b` contains `a::b::C` and `a::b::c::D`
    /// but not `a::bc::E`. Root-level classes belong to no namespace.
    pub fn in_namespace(&self, namespace: &str) -> bool {
        let own = self.namespace();
        if namespace.is_empty() || own.is_empty() {
            return false;
        }
        match own.strip_prefix(namespace) {
            Some("") => true,
            Some(rest) => rest.starts_with(PATH_SEPARATOR),
            None => false,
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ClassRef {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Deployment metadata carried by the server endpoint annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointAnnotation {
    /// Path template the endpoint is published under.
    pub path: String,
    #[serde(default)]
    pub subprotocols: Vec<String>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl EndpointAnnotation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
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

/// A capability the scanner found on a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    /// Implements the application config contract.
    ApplicationConfig,
    /// Implements the endpoint config contract for `endpoint_class`.
    EndpointConfig { endpoint_class: ClassRef },
    /// Carries the server endpoint annotation.
    ServerEndpoint(EndpointAnnotation),
}

/// A class handed over by the scanner, with its declared capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateClass {
    pub class: ClassRef,
    capabilities: Vec<Capability>,
}

impl CandidateClass {
    /// Create a candidate with no capabilities.
    pub fn new(class: impl Into<ClassRef>) -> Self {
        Self {
            class: class.into(),
            capabilities: Vec::new(),
        }
    }

    /// Add a capability. Repeated capabilities are kept once.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    pub fn application_config(self) -> Self {
        self.with_capability(Capability::ApplicationConfig)
    }

    pub fn endpoint_config(self, endpoint_class: impl Into<ClassRef>) -> Self {
        self.with_capability(Capability::EndpointConfig {
            endpoint_class: endpoint_class.into(),
        })
    }

    pub fn server_endpoint(self, annotation: EndpointAnnotation) -> Self {
        self.with_capability(Capability::ServerEndpoint(annotation))
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    pub fn is_application_config(&self) -> bool {
        self.capabilities
            .iter()
            .any(|c| matches!(c, Capability::ApplicationConfig))
    }

    /// The endpoint class declared by the endpoint config contract, if implemented.
    pub fn declared_endpoint_class(&self) -> Option<&ClassRef> {
        self.capabilities.iter().find_map(|c| match c {
            Capability::EndpointConfig { endpoint_class } => Some(endpoint_class),
            _ => None,
        })
    }

    /// The server endpoint annotation, if present.
    pub fn endpoint_annotation(&self) -> Option<&EndpointAnnotation> {
        self.capabilities.iter().find_map(|c| match c {
            Capability::ServerEndpoint(annotation) => Some(annotation),
            _ => None,
        })
    }
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;
