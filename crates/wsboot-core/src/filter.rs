//! Selection of the endpoints to deploy.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use wsboot_protocols::{ApplicationConfig, ClassRef, EndpointConfig, PojoEndpoint};

/// The endpoints chosen for registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub configs: BTreeSet<EndpointConfig>,
    pub pojos: BTreeSet<PojoEndpoint>,
}

impl Deployment {
    /// Total number of endpoints to register.
    pub fn len(&self) -> usize {
        self.configs.len() + self.pojos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty() && self.pojos.is_empty()
    }
}

/// Applies application config hooks to the scanned endpoints.
pub struct EndpointFilter;

impl EndpointFilter {
    /// Compute the deployment.
    ///
    /// Without application configs everything scanned is deployed. With at
    /// least one, the deployed configs are the union of what the hooks select
    /// from `endpoint_classes`, and no annotated endpoint is deployed.
    pub fn filter<'a, I>(
        application_configs: I,
        endpoint_configs: &BTreeSet<EndpointConfig>,
        endpoint_classes: &BTreeSet<ClassRef>,
        pojo_endpoints: &BTreeSet<PojoEndpoint>,
    ) -> Deployment
    where
        I: IntoIterator<Item = &'a Arc<dyn ApplicationConfig>>,
    {
        let hooks: Vec<&Arc<dyn ApplicationConfig>> = application_configs.into_iter().collect();

        if hooks.is_empty() {
            debug!("No application configs, deploying every scanned endpoint");
            return Deployment {
                configs: endpoint_configs.clone(),
                pojos: pojo_endpoints.clone(),
            };
        }

        let mut configs = BTreeSet::new();
        for hook in &hooks {
            configs.extend(hook.select_endpoints(endpoint_classes));
        }

        if !pojo_endpoints.is_empty() {
            info!(
                "{} application configs present, {} annotated endpoints not deployed",
                hooks.len(),
                pojo_endpoints.len()
            );
        }

        Deployment {
            configs,
            pojos: BTreeSet::new(),
        }
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
