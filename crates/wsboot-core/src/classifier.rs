//! Classification of scanned candidates into endpoint buckets.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use wsboot_protocols::{CandidateClass, ClassRef, PojoEndpoint};

/// Namespace of the WebSocket API itself; never deployed from a scan.
pub const API_NAMESPACE: &str = "wsboot::api";

/// Scanned candidates grouped by capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Classes implementing the application config contract.
    pub application_configs: BTreeSet<ClassRef>,
    /// Classes implementing the endpoint config contract.
    pub endpoint_configs: BTreeSet<ClassRef>,
    /// Endpoint classes declared by the endpoint config classes.
    pub endpoint_classes: BTreeSet<ClassRef>,
    /// Classes carrying the server endpoint annotation.
    pub pojo_endpoints: BTreeSet<PojoEndpoint>,
    /// Candidates skipped because they live in an excluded namespace.
    pub excluded: BTreeSet<ClassRef>,
}

impl Classification {
    /// Check whether no candidate landed in any bucket.
    pub fn is_empty(&self) -> bool {
        self.application_configs.is_empty()
            && self.endpoint_configs.is_empty()
            && self.pojo_endpoints.is_empty()
    }
}

/// Sorts candidates into [`Classification`] buckets.
#[derive(Debug, Clone)]
pub struct Classifier {
    excluded_namespaces: Vec<String>,
}

impl Classifier {
    /// Create a classifier excluding only [`API_NAMESPACE`].
    pub fn new() -> Self {
        Self {
            excluded_namespaces: vec![API_NAMESPACE.to_string()],
        }
    }

    /// Exclude additional namespaces on top of [`API_NAMESPACE`].
    pub fn with_excluded_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for namespace in namespaces {
            let namespace = namespace.into();
            if !namespace.is_empty() && !self.excluded_namespaces.contains(&namespace) {
                self.excluded_namespaces.push(namespace);
            }
        }
        self
    }

    pub fn excluded_namespaces(&self) -> &[String] {
        &self.excluded_namespaces
    }

    /// Check whether a class lives in one of the excluded namespaces.
    pub fn is_excluded(&self, class: &ClassRef) -> bool {
        self.excluded_namespaces
            .iter()
            .any(|namespace| class.in_namespace(namespace))
    }

    /// Classify candidates in a single pass.
    ///
    /// Checks are independent, so one class can be both an application config
    /// and an endpoint config. A class implementing the endpoint config
    /// contract is never also treated as an annotated endpoint.
    pub fn classify<'a, I>(&self, candidates: I) -> Classification
    where
        I: IntoIterator<Item = &'a CandidateClass>,
    {
        let mut classification = Classification::default();

        for candidate in candidates {
            let class = &candidate.class;

            if self.is_excluded(class) {
                warn!("Skipping candidate from excluded namespace: {}", class);
                classification.excluded.insert(class.clone());
                continue;
            }

            if candidate.is_application_config() {
                debug!("Found application config: {}", class);
                classification.application_configs.insert(class.clone());
            }

            if let Some(endpoint_class) = candidate.declared_endpoint_class() {
                debug!("Found endpoint config: {} -> {}", class, endpoint_class);
                classification.endpoint_configs.insert(class.clone());
                classification.endpoint_classes.insert(endpoint_class.clone());

                if candidate.endpoint_annotation().is_some() {
                    warn!(
                        "Ignoring endpoint annotation on {}: it already implements the endpoint config contract",
                        class
                    );
                }
                continue;
            }

            if let Some(annotation) = candidate.endpoint_annotation() {
                debug!("Found annotated endpoint: {} at {}", class, annotation.path);
                classification
                    .pojo_endpoints
                    .insert(PojoEndpoint::new(class.clone(), annotation.clone()));
            }
        }

        classification
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
