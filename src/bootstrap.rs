//! Turns a scan manifest and the configuration into pipeline inputs.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use wsboot_config::{ApplicationConfigEntry, Config, ConfigLoader, ScanManifest};
use wsboot_core::{ClassLoader, Classifier};
use wsboot_protocols::{ApplicationConfig, ClassRef, EndpointConfig};

const DEFAULT_CONFIG: &str = "config/wsboot.toml";

/// Application config declared in a manifest.
///
/// Deploys its own endpoints plus the scanned configs of the endpoint
/// classes it selects.
#[derive(Debug, Clone)]
pub(crate) struct ManifestSelection {
    select: BTreeSet<ClassRef>,
    own: BTreeSet<EndpointConfig>,
    scanned_configs: Vec<EndpointConfig>,
}

impl ManifestSelection {
    pub(crate) fn new(entry: &ApplicationConfigEntry, scanned_configs: Vec<EndpointConfig>) -> Self {
        Self {
            select: entry.select.iter().cloned().collect(),
            own: entry.endpoints.iter().cloned().collect(),
            scanned_configs,
        }
    }
}

impl ApplicationConfig for ManifestSelection {
    fn select_endpoints(&self, scanned: &BTreeSet<ClassRef>) -> BTreeSet<EndpointConfig> {
        let mut selected = self.own.clone();
        selected.extend(
            self.scanned_configs
                .iter()
                .filter(|c| scanned.contains(&c.endpoint_class))
                .filter(|c| self.select.contains(&c.endpoint_class))
                .cloned(),
        );
        selected
    }
}

/// Constructors for every constructible class of the manifest.
///
/// Classes marked `constructible = false` get no constructor, so resolving
/// them fails the startup. Declarative application configs only select among
/// configs of constructible classes the classifier keeps.
pub(crate) fn class_loader(manifest: &ScanManifest, classifier: &Classifier) -> ClassLoader {
    let scanned_configs: Vec<EndpointConfig> = manifest
        .classes
        .iter()
        .filter(|c| c.constructible && !classifier.is_excluded(&c.name))
        .filter_map(|c| c.endpoint_config.clone())
        .collect();

    let mut loader = ClassLoader::new();
    for class in manifest.classes.iter().filter(|c| c.constructible) {
        if let Some(config) = &class.endpoint_config {
            let config = config.clone();
            loader.register_endpoint_config(class.name.clone(), move || Ok(config.clone()));
        }
        if let Some(entry) = &class.application_config {
            let entry = entry.clone();
            let scanned_configs = scanned_configs.clone();
            loader.register_application_config(class.name.clone(), move || {
                let selection = ManifestSelection::new(&entry, scanned_configs.clone());
                Ok(Arc::new(selection) as Arc<dyn ApplicationConfig>)
            });
        }
    }
    debug!("Class loader built for {} classes", manifest.len());
    loader
}

/// Classifier honoring the configured namespace exclusions.
pub(crate) fn classifier(config: &Config) -> Classifier {
    Classifier::new().with_excluded_namespaces(config.scan.excluded_namespaces.iter().cloned())
}

/// Load the configuration.
///
/// An explicit path must exist. Otherwise `config/wsboot.toml` is tried,
/// then the per-user config, then defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Ok(ConfigLoader::load_required(path)?);
    }

    let default = Path::new(DEFAULT_CONFIG);
    if default.exists() {
        return Ok(ConfigLoader::load(default)?);
    }

    match ConfigLoader::user_config_path() {
        Some(path) if path.exists() => {
            info!("Using user config {}", path.display());
            Ok(ConfigLoader::load(&path)?)
        }
        _ => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use wsboot_core::{EndpointContainer, HostContext, Initializer};
    use wsboot_protocols::{Instantiator, StartupError};

    const MANIFEST: &str = r#"
        [[class]]
        name = "chat::EchoEndpoint"
        server_endpoint = { path = "/echo" }

        [[class]]
        name = "chat::FeedConfig"
        endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/feed" }

        [[class]]
        name = "chat::FeedEndpoint"
        server_endpoint = { path = "/feed-annotated" }

        [[class]]
        name = "chat::AdminConfig"
        endpoint_config = { endpoint_class = "chat::AdminEndpoint", path = "/admin" }

        [[class]]
        name = "chat::AppConfig"
        application_config = { select = ["chat::FeedEndpoint", "chat::Unscanned"], endpoints = [{ endpoint_class = "chat::Status", path = "/status" }] }
    "#;

    fn scanned(names: &[&str]) -> BTreeSet<ClassRef> {
        names.iter().map(|n| ClassRef::new(*n)).collect()
    }

    #[test]
    fn test_selection_only_selected_classes() {
        let manifest = ScanManifest::load_str(MANIFEST).unwrap();
        let entry = manifest.classes[4].application_config.clone().unwrap();
        let configs = manifest.endpoint_configs().map(|(_, c)| c.clone()).collect();
        let selection = ManifestSelection::new(&entry, configs);

        let paths: Vec<String> = selection
            .select_endpoints(&scanned(&["chat::FeedEndpoint", "chat::AdminEndpoint"]))
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert!(paths.contains(&"/feed".to_string()));
        assert!(paths.contains(&"/status".to_string()));
        assert!(!paths.contains(&"/admin".to_string()));
    }

    #[test]
    fn test_selection_own_endpoints_always_deployed() {
        let entry = ApplicationConfigEntry {
            select: vec![],
            endpoints: vec![EndpointConfig::new("chat::Status", "/status")],
        };
        let selection = ManifestSelection::new(&entry, vec![]);
        assert_eq!(selection.select_endpoints(&BTreeSet::new()).len(), 1);
    }

    #[test]
    fn test_class_loader_constructs_manifest_classes() {
        let manifest = ScanManifest::load_str(MANIFEST).unwrap();
        let loader = class_loader(&manifest, &Classifier::new());

        let config = loader
            .instantiate_endpoint_config(&ClassRef::new("chat::FeedConfig"))
            .unwrap();
        assert_eq!(config.path, "/feed");
        assert!(loader
            .instantiate_application_config(&ClassRef::new("chat::AppConfig"))
            .is_ok());
        assert!(!loader.contains(&ClassRef::new("chat::EchoEndpoint")));
    }

    #[test]
    fn test_unconstructible_class_has_no_constructor() {
        let manifest = ScanManifest::load_str(
            r#"
            [[class]]
            name = "chat::BrokenConfig"
            endpoint_config = { endpoint_class = "chat::Broken", path = "/broken" }
            constructible = false
            "#,
        )
        .unwrap();
        let loader = class_loader(&manifest, &Classifier::new());
        assert!(!loader.contains(&ClassRef::new("chat::BrokenConfig")));

        let container = Arc::new(EndpointContainer::new());
        let initializer = Initializer::for_container(Arc::new(loader), container.clone());
        let candidates = manifest.candidates();
        let err = initializer
            .on_startup(Some(candidates.as_slice()), &HostContext::root())
            .err()
            .expect("startup should fail");
        assert!(matches!(err, StartupError::Construction { .. }));
        assert!(container.is_empty());
    }

    #[test]
    fn test_manifest_deploys_selected_configs() {
        let manifest = ScanManifest::load_str(MANIFEST).unwrap();
        let container = Arc::new(EndpointContainer::new());
        let initializer = Initializer::for_container(
            Arc::new(class_loader(&manifest, &Classifier::new())),
            container.clone(),
        );
        let candidates = manifest.candidates();

        let report = initializer
            .on_startup(Some(candidates.as_slice()), &HostContext::new("/app"))
            .unwrap();

        // The app config owns selection: annotated endpoints are dropped.
        assert_eq!(report.registration.pojos, 0);
        assert!(container.contains("/feed"));
        assert!(container.contains("/status"));
        assert!(!container.contains("/admin"));
        assert!(!container.contains("/echo"));
        assert_eq!(container.get("/feed").unwrap().full_path(), "/app/feed");
    }

    #[test]
    fn test_selection_ignores_excluded_and_unconstructible_configs() {
        let manifest = ScanManifest::load_str(
            r#"
            [[class]]
            name = "chat::FeedConfig"
            endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/feed" }

            [[class]]
            name = "vendor::FeedConfig"
            endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/vendor-feed" }

            [[class]]
            name = "chat::LegacyFeedConfig"
            endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/legacy-feed" }
            constructible = false

            [[class]]
            name = "chat::AppConfig"
            application_config = { select = ["chat::FeedEndpoint"] }
            "#,
        )
        .unwrap();
        let mut config = Config::default();
        config.scan.excluded_namespaces = vec!["vendor".to_string()];
        let classifier = classifier(&config);
        let loader = class_loader(&manifest, &classifier);

        let selection = loader
            .instantiate_application_config(&ClassRef::new("chat::AppConfig"))
            .unwrap();
        let paths: Vec<String> = selection
            .select_endpoints(&scanned(&["chat::FeedEndpoint"]))
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(paths, vec!["/feed"]);
    }

    #[test]
    fn test_excluded_config_not_deployed_through_selection() {
        let manifest = ScanManifest::load_str(
            r#"
            [[class]]
            name = "chat::FeedConfig"
            endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/feed" }

            [[class]]
            name = "vendor::FeedConfig"
            endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/vendor-feed" }

            [[class]]
            name = "chat::AppConfig"
            application_config = { select = ["chat::FeedEndpoint"] }
            "#,
        )
        .unwrap();
        let mut config = Config::default();
        config.scan.excluded_namespaces = vec!["vendor".to_string()];
        let classifier = classifier(&config);
        let container = Arc::new(EndpointContainer::new());
        let initializer = Initializer::for_container(
            Arc::new(class_loader(&manifest, &classifier)),
            container.clone(),
        )
        .with_classifier(classifier);
        let candidates = manifest.candidates();

        initializer
            .on_startup(Some(candidates.as_slice()), &HostContext::root())
            .unwrap();

        assert!(container.contains("/feed"));
        assert!(!container.contains("/vendor-feed"));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_classifier_uses_configured_exclusions() {
        let mut config = Config::default();
        config.scan.excluded_namespaces = vec!["vendor".to_string()];
        let classifier = classifier(&config);
        assert!(classifier.is_excluded(&ClassRef::new("vendor::Endpoint")));
        assert!(!classifier.is_excluded(&ClassRef::new("vendors::Endpoint")));
    }

    #[test]
    fn test_load_explicit_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\ncontext_path = \"/ws\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.server.context_path, "/ws");
    }

    #[test]
    fn test_load_explicit_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
