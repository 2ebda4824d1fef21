//! In-memory endpoint container.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use wsboot_protocols::{ClassRef, DeploymentError, EndpointConfig, EndpointRegistry, PojoEndpoint};

use super::base::{BaseRegistry, Registerable};
use super::path::PathTemplate;

/// How an endpoint reached the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "endpoint", rename_all = "snake_case")]
pub enum EndpointKind {
    /// Registered from an endpoint config object.
    Programmatic(EndpointConfig),
    /// Registered from an annotated class.
    Annotated(PojoEndpoint),
}

/// An endpoint held by the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployedEndpoint {
    path: String,
    full_path: String,
    #[serde(skip)]
    key: String,
    kind: EndpointKind,
}

impl DeployedEndpoint {
    fn new(template: PathTemplate, context_path: &str, kind: EndpointKind) -> Self {
        Self {
            path: template.as_str().to_string(),
            full_path: format!("{}{}", context_path, template.as_str()),
            key: template.key().to_string(),
            kind,
        }
    }

    /// Path as registered.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path including the host context path bound at registration.
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn kind(&self) -> &EndpointKind {
        &self.kind
    }

    pub fn endpoint_class(&self) -> &ClassRef {
        match &self.kind {
            EndpointKind::Programmatic(config) => &config.endpoint_class,
            EndpointKind::Annotated(pojo) => &pojo.class,
        }
    }

    pub fn subprotocols(&self) -> &[String] {
        match &self.kind {
            EndpointKind::Programmatic(config) => &config.subprotocols,
            EndpointKind::Annotated(pojo) => &pojo.annotation.subprotocols,
        }
    }

    pub fn extensions(&self) -> &[String] {
        match &self.kind {
            EndpointKind::Programmatic(config) => &config.extensions,
            EndpointKind::Annotated(pojo) => &pojo.annotation.extensions,
        }
    }

    pub fn is_annotated(&self) -> bool {
        matches!(self.kind, EndpointKind::Annotated(_))
    }
}

impl Registerable for DeployedEndpoint {
    fn registry_id(&self) -> &str {
        &self.key
    }
}

/// Endpoint registry keyed by path template.
///
/// Shared with the host through an `Arc`; closing it with [`destroy`]
/// drops every endpoint and refuses later registrations.
///
/// [`destroy`]: EndpointContainer::destroy
pub struct EndpointContainer {
    endpoints: BaseRegistry<DeployedEndpoint>,
    context_path: RwLock<String>,
    closed: AtomicBool,
}

impl EndpointContainer {
    pub fn new() -> Self {
        Self {
            endpoints: BaseRegistry::new(),
            context_path: RwLock::new(String::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn context_path(&self) -> String {
        self.context_path.read().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Look up an endpoint by path.
    ///
    /// Variable names do not matter: `/rooms/{id}` finds an endpoint
    /// registered as `/rooms/{room}`.
    pub fn get(&self, path: &str) -> Option<Arc<DeployedEndpoint>> {
        let template = PathTemplate::parse(path).ok()?;
        self.endpoints.get(template.key())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// All endpoints sorted by path.
    pub fn list(&self) -> Vec<Arc<DeployedEndpoint>> {
        let mut endpoints: Vec<_> = self.endpoints.iter().collect();
        endpoints.sort_by(|a, b| a.path.cmp(&b.path));
        endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Close the container and drop its endpoints.
    pub fn destroy(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("Endpoint container already destroyed");
            return;
        }
        let count = self.endpoints.len();
        self.endpoints.clear();
        info!("Endpoint container destroyed, {} endpoints removed", count);
    }

    fn deploy(&self, path: &str, kind: EndpointKind) -> Result<(), DeploymentError> {
        if self.is_closed() {
            return Err(DeploymentError::ContainerClosed);
        }

        let template = PathTemplate::parse(path)?;
        let endpoint = DeployedEndpoint::new(template, &self.context_path.read(), kind);
        let full_path = endpoint.full_path.clone();
        let class = endpoint.endpoint_class().clone();

        self.endpoints
            .register(Arc::new(endpoint))
            .map_err(|existing| DeploymentError::DuplicatePath {
                path: path.to_string(),
                existing: existing.endpoint_class().clone(),
            })?;

        info!("Deployed {} at {}", class, full_path);
        Ok(())
    }
}

impl Default for EndpointContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointRegistry for EndpointContainer {
    fn bind_context(&self, context_path: &str) {
        let context_path = context_path.trim_end_matches('/');
        if !self.endpoints.is_empty() {
            warn!(
                "Binding context {} after {} endpoints were deployed; their full paths keep the old context",
                context_path,
                self.endpoints.len()
            );
        }
        debug!("Endpoint container bound to context '{}'", context_path);
        *self.context_path.write() = context_path.to_string();
    }

    fn add_endpoint(&self, config: EndpointConfig) -> Result<(), DeploymentError> {
        let path = config.path.clone();
        self.deploy(&path, EndpointKind::Programmatic(config))
    }

    fn add_pojo_endpoint(&self, endpoint: PojoEndpoint) -> Result<(), DeploymentError> {
        let path = endpoint.path().to_string();
        self.deploy(&path, EndpointKind::Annotated(endpoint))
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
