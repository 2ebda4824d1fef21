//! Lifecycle listener tying the endpoint container to the host.

use std::sync::Arc;

use tracing::info;

use wsboot_protocols::LifecycleError;

use crate::container::EndpointContainer;
use crate::lifecycle::{priority, LifecycleHook};

/// Announces the deployed endpoints on host start and destroys the
/// container on host stop.
pub struct ContainerListener {
    container: Arc<EndpointContainer>,
}

impl ContainerListener {
    pub fn new(container: Arc<EndpointContainer>) -> Self {
        Self { container }
    }

    pub fn container(&self) -> &Arc<EndpointContainer> {
        &self.container
    }
}

#[async_trait::async_trait]
impl LifecycleHook for ContainerListener {
    async fn on_start(&self) -> Result<(), LifecycleError> {
        if self.container.is_closed() {
            return Err(LifecycleError::StartFailed(
                "endpoint container is already destroyed".to_string(),
            ));
        }
        info!(
            "Endpoint container serving {} endpoints under '{}'",
            self.container.len(),
            self.container.context_path()
        );
        Ok(())
    }

    async fn on_stop(&self) -> Result<(), LifecycleError> {
        self.container.destroy();
        Ok(())
    }

    fn priority(&self) -> i32 {
        priority::CONTAINER
    }

    fn name(&self) -> &str {
        "endpoint-container"
    }
}
