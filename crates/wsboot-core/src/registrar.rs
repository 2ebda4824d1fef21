//! Registration of a [`Deployment`] with an [`EndpointRegistry`].

use serde::Serialize;
use tracing::{debug, error, info};

use wsboot_protocols::{DeployedEntity, EndpointRegistry, StartupError};

use crate::filter::Deployment;

/// Counts of what a successful registration pass registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    pub endpoints: usize,
    pub pojos: usize,
}

impl RegistrationReport {
    pub fn total(&self) -> usize {
        self.endpoints + self.pojos
    }
}

/// Pushes deployments into a registry.
///
/// Configs are registered before annotated endpoints. The first registry
/// failure stops the pass; entries already registered stay registered.
pub struct Registrar<'a> {
    registry: &'a dyn EndpointRegistry,
}

impl<'a> Registrar<'a> {
    pub fn new(registry: &'a dyn EndpointRegistry) -> Self {
        Self { registry }
    }

    pub fn register(&self, deployment: &Deployment) -> Result<RegistrationReport, StartupError> {
        let mut report = RegistrationReport::default();

        for config in &deployment.configs {
            debug!("Registering {} at {}", config.endpoint_class, config.path);
            self.registry
                .add_endpoint(config.clone())
                .map_err(|source| {
                    let entity = DeployedEntity::Config(config.clone());
                    error!("Failed to deploy {}: {}", entity, source);
                    StartupError::Deployment { entity, source }
                })?;
            report.endpoints += 1;
        }

        for pojo in &deployment.pojos {
            debug!("Registering {} at {}", pojo.class, pojo.path());
            self.registry
                .add_pojo_endpoint(pojo.clone())
                .map_err(|source| {
                    let entity = DeployedEntity::Pojo(pojo.clone());
                    error!("Failed to deploy {}: {}", entity, source);
                    StartupError::Deployment { entity, source }
                })?;
            report.pojos += 1;
        }

        info!(
            "Registered {} endpoint configs and {} annotated endpoints",
            report.endpoints, report.pojos
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "registrar_tests.rs"]
mod tests;
