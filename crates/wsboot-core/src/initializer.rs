//! Startup entry point.
//!
//! Runs the bootstrap pipeline once per host startup:
//! classify the scanned candidates, construct the application config hooks
//! and endpoint configs, select what to deploy and register it.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use wsboot_protocols::{
    CandidateClass, ClassRef, EndpointConfig, EndpointRegistry, Instantiator, StartupError,
};

use crate::classifier::{Classification, Classifier};
use crate::container::EndpointContainer;
use crate::filter::{Deployment, EndpointFilter};
use crate::host::HostContext;
use crate::lifecycle::LifecycleHook;
use crate::listener::ContainerListener;
use crate::registrar::{RegistrationReport, Registrar};
use crate::resolver::ApplicationConfigResolver;

/// What a startup would deploy, computed without touching a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartupPlan {
    pub classification: Classification,
    /// Application config hooks that were constructed.
    pub application_configs: BTreeSet<ClassRef>,
    /// Endpoint configs built from the scanned endpoint config classes.
    pub endpoint_configs: BTreeSet<EndpointConfig>,
    pub deployment: Deployment,
}

/// Outcome of a successful startup.
#[derive(Debug, Clone, Serialize)]
pub struct StartupReport {
    pub startup_id: Uuid,
    pub context_path: String,
    pub plan: StartupPlan,
    pub registration: RegistrationReport,
    pub completed_at: DateTime<Utc>,
}

impl StartupReport {
    fn empty(startup_id: Uuid, context_path: &str) -> Self {
        Self {
            startup_id,
            context_path: context_path.to_string(),
            plan: StartupPlan::default(),
            registration: RegistrationReport::default(),
            completed_at: Utc::now(),
        }
    }

    /// Check whether the startup registered anything.
    pub fn is_empty(&self) -> bool {
        self.registration.total() == 0
    }
}

/// Wires the pipeline stages to a registry and a host.
pub struct Initializer {
    classifier: Classifier,
    instantiator: Arc<dyn Instantiator>,
    registry: Arc<dyn EndpointRegistry>,
    listener: Arc<dyn LifecycleHook>,
}

impl Initializer {
    pub fn new(
        instantiator: Arc<dyn Instantiator>,
        registry: Arc<dyn EndpointRegistry>,
        listener: Arc<dyn LifecycleHook>,
    ) -> Self {
        Self {
            classifier: Classifier::new(),
            instantiator,
            registry,
            listener,
        }
    }

    /// Initializer deploying into an [`EndpointContainer`], with a
    /// [`ContainerListener`] destroying it when the host stops.
    pub fn for_container(
        instantiator: Arc<dyn Instantiator>,
        container: Arc<EndpointContainer>,
    ) -> Self {
        let listener = Arc::new(ContainerListener::new(container.clone()));
        Self::new(instantiator, container, listener)
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classify, resolve and filter without registering anything.
    ///
    /// Construction failures abort the plan.
    pub fn plan(&self, candidates: &[CandidateClass]) -> Result<StartupPlan, StartupError> {
        let classification = self.classifier.classify(candidates);
        info!(
            "Classified {} candidates: {} application configs, {} endpoint configs, {} annotated endpoints, {} excluded",
            candidates.len(),
            classification.application_configs.len(),
            classification.endpoint_configs.len(),
            classification.pojo_endpoints.len(),
            classification.excluded.len()
        );

        let resolved = ApplicationConfigResolver::new(self.instantiator.as_ref())
            .resolve(&classification)?;

        let deployment = EndpointFilter::filter(
            resolved.application_configs.values(),
            &resolved.endpoint_configs,
            &classification.endpoint_classes,
            &classification.pojo_endpoints,
        );
        debug!("Deployment holds {} endpoints", deployment.len());

        Ok(StartupPlan {
            application_configs: resolved.application_configs.keys().cloned().collect(),
            endpoint_configs: resolved.endpoint_configs,
            classification,
            deployment,
        })
    }

    /// Host startup callback.
    ///
    /// The lifecycle listener is added to the host first, whatever happens
    /// next. Absent or empty candidates end the startup there.
    pub fn on_startup(
        &self,
        candidates: Option<&[CandidateClass]>,
        host: &HostContext,
    ) -> Result<StartupReport, StartupError> {
        let startup_id = Uuid::new_v4();
        let span = info_span!("startup", id = %startup_id, context = host.context_path());
        let _enter = span.enter();

        host.add_listener(self.listener.clone());

        let candidates = match candidates {
            Some(candidates) if !candidates.is_empty() => candidates,
            _ => {
                info!("No endpoint candidates scanned, nothing to deploy");
                return Ok(StartupReport::empty(startup_id, host.context_path()));
            }
        };

        let plan = self.plan(candidates)?;

        self.registry.bind_context(host.context_path());
        let registration = Registrar::new(self.registry.as_ref()).register(&plan.deployment)?;

        info!(
            "Startup complete: {} endpoints deployed under '{}'",
            registration.total(),
            host.context_path()
        );

        Ok(StartupReport {
            startup_id,
            context_path: host.context_path().to_string(),
            plan,
            registration,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[path = "initializer_tests.rs"]
mod tests;
