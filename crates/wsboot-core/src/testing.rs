//! Shared unit test doubles.

use std::collections::BTreeSet;

use mockall::mock;

use wsboot_protocols::{
    ApplicationConfig, ClassRef, DeploymentError, EndpointConfig, EndpointRegistry, PojoEndpoint,
};

mock! {
    pub Registry {}

    impl EndpointRegistry for Registry {
        fn bind_context(&self, context_path: &str);
        fn add_endpoint(&self, config: EndpointConfig) -> Result<(), DeploymentError>;
        fn add_pojo_endpoint(&self, endpoint: PojoEndpoint) -> Result<(), DeploymentError>;
    }
}

/// Application config returning a fixed selection.
pub struct FixedSelection(pub BTreeSet<EndpointConfig>);

impl ApplicationConfig for FixedSelection {
    fn select_endpoints(&self, _scanned: &BTreeSet<ClassRef>) -> BTreeSet<EndpointConfig> {
        self.0.clone()
    }
}
