//! Application-level endpoint selection hook.

use std::collections::BTreeSet;

use crate::class::ClassRef;
use crate::endpoint::EndpointConfig;

/// Application hook that owns the choice of deployed endpoints.
///
/// Once any application config is present, only the configs returned from
/// [`ApplicationConfig::select_endpoints`] are deployed and annotated
/// endpoints are not deployed at all.
pub trait ApplicationConfig: Send + Sync {
    /// Build the configs to deploy from the scanned endpoint classes.
    fn select_endpoints(&self, scanned: &BTreeSet<ClassRef>) -> BTreeSet<EndpointConfig>;
}
