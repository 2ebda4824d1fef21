//! Constructor table implementing [`Instantiator`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use wsboot_protocols::{ApplicationConfig, ClassRef, ConstructionError, EndpointConfig, Instantiator};

type ApplicationConfigConstructor =
    Box<dyn Fn() -> Result<Arc<dyn ApplicationConfig>, String> + Send + Sync>;
type EndpointConfigConstructor = Box<dyn Fn() -> Result<EndpointConfig, String> + Send + Sync>;

/// Maps class references to constructors.
///
/// A class without a constructor behaves like a class without a usable
/// no-argument constructor: instantiating it fails.
#[derive(Default)]
pub struct ClassLoader {
    application_configs: HashMap<ClassRef, ApplicationConfigConstructor>,
    endpoint_configs: HashMap<ClassRef, EndpointConfigConstructor>,
    denied: HashSet<ClassRef>,
}

impl ClassLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor of an application config class.
    pub fn register_application_config<F>(&mut self, class: impl Into<ClassRef>, constructor: F)
    where
        F: Fn() -> Result<Arc<dyn ApplicationConfig>, String> + Send + Sync + 'static,
    {
        self.application_configs
            .insert(class.into(), Box::new(constructor));
    }

    /// Register the constructor of an endpoint config class.
    pub fn register_endpoint_config<F>(&mut self, class: impl Into<ClassRef>, constructor: F)
    where
        F: Fn() -> Result<EndpointConfig, String> + Send + Sync + 'static,
    {
        self.endpoint_configs
            .insert(class.into(), Box::new(constructor));
    }

    /// Refuse construction of a class regardless of registered constructors.
    pub fn deny(&mut self, class: impl Into<ClassRef>) {
        self.denied.insert(class.into());
    }

    pub fn with_application_config<F>(mut self, class: impl Into<ClassRef>, constructor: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn ApplicationConfig>, String> + Send + Sync + 'static,
    {
        self.register_application_config(class, constructor);
        self
    }

    pub fn with_endpoint_config<F>(mut self, class: impl Into<ClassRef>, constructor: F) -> Self
    where
        F: Fn() -> Result<EndpointConfig, String> + Send + Sync + 'static,
    {
        self.register_endpoint_config(class, constructor);
        self
    }

    pub fn with_denied(mut self, class: impl Into<ClassRef>) -> Self {
        self.deny(class);
        self
    }

    /// Check whether any constructor is known for a class.
    pub fn contains(&self, class: &ClassRef) -> bool {
        self.application_configs.contains_key(class) || self.endpoint_configs.contains_key(class)
    }

    fn missing(&self, class: &ClassRef, expected: &'static str) -> ConstructionError {
        if self.contains(class) {
            ConstructionError::WrongKind {
                class: class.clone(),
                expected,
            }
        } else {
            ConstructionError::NoConstructor(class.clone())
        }
    }
}

impl Instantiator for ClassLoader {
    fn instantiate_application_config(
        &self,
        class: &ClassRef,
    ) -> Result<Arc<dyn ApplicationConfig>, ConstructionError> {
        if self.denied.contains(class) {
            return Err(ConstructionError::AccessDenied(class.clone()));
        }

        let constructor = self
            .application_configs
            .get(class)
            .ok_or_else(|| self.missing(class, "application config"))?;

        constructor().map_err(|reason| ConstructionError::Failed {
            class: class.clone(),
            reason,
        })
    }

    fn instantiate_endpoint_config(
        &self,
        class: &ClassRef,
    ) -> Result<EndpointConfig, ConstructionError> {
        if self.denied.contains(class) {
            return Err(ConstructionError::AccessDenied(class.clone()));
        }

        let constructor = self
            .endpoint_configs
            .get(class)
            .ok_or_else(|| self.missing(class, "endpoint config"))?;

        constructor().map_err(|reason| ConstructionError::Failed {
            class: class.clone(),
            reason,
        })
    }
}
