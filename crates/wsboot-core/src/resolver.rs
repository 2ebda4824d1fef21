//! Instantiation of application config hooks and endpoint config objects.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, error};

use wsboot_protocols::{ApplicationConfig, ClassRef, EndpointConfig, Instantiator, StartupError};

use crate::classifier::Classification;

/// Instances created from a [`Classification`].
#[derive(Default)]
pub struct Resolved {
    /// Application config hooks, one per class.
    pub application_configs: BTreeMap<ClassRef, Arc<dyn ApplicationConfig>>,
    /// Endpoint configs read from the scanned endpoint config classes.
    pub endpoint_configs: BTreeSet<EndpointConfig>,
}

/// Builds hook and config instances through an [`Instantiator`].
///
/// Every failure is fatal: the first construction error aborts resolution
/// and nothing built so far is handed on.
pub struct ApplicationConfigResolver<'a> {
    instantiator: &'a dyn Instantiator,
}

impl<'a> ApplicationConfigResolver<'a> {
    pub fn new(instantiator: &'a dyn Instantiator) -> Self {
        Self { instantiator }
    }

    /// Instantiate every application config class.
    pub fn resolve_application_configs(
        &self,
        classes: &BTreeSet<ClassRef>,
    ) -> Result<BTreeMap<ClassRef, Arc<dyn ApplicationConfig>>, StartupError> {
        let mut configs = BTreeMap::new();
        for class in classes {
            let config = self
                .instantiator
                .instantiate_application_config(class)
                .map_err(|e| {
                    error!("Failed to construct application config {}: {}", class, e);
                    StartupError::Construction {
                        class: class.clone(),
                        source: e,
                    }
                })?;
            debug!("Constructed application config {}", class);
            configs.insert(class.clone(), config);
        }
        Ok(configs)
    }

    /// Instantiate every endpoint config class and collect its description.
    pub fn resolve_endpoint_configs(
        &self,
        classes: &BTreeSet<ClassRef>,
    ) -> Result<BTreeSet<EndpointConfig>, StartupError> {
        let mut configs = BTreeSet::new();
        for class in classes {
            let config = self
                .instantiator
                .instantiate_endpoint_config(class)
                .map_err(|e| {
                    error!("Failed to construct endpoint config {}: {}", class, e);
                    StartupError::Construction {
                        class: class.clone(),
                        source: e,
                    }
                })?;
            debug!("Constructed endpoint config {} for {}", class, config.path);
            configs.insert(config);
        }
        Ok(configs)
    }

    /// Resolve application configs first, then endpoint configs.
    pub fn resolve(&self, classification: &Classification) -> Result<Resolved, StartupError> {
        let application_configs =
            self.resolve_application_configs(&classification.application_configs)?;
        let endpoint_configs = self.resolve_endpoint_configs(&classification.endpoint_configs)?;

        Ok(Resolved {
            application_configs,
            endpoint_configs,
        })
    }
}
