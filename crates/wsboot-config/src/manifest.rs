//! Scan manifest: the list of classes a scan found, as a TOML file.
//!
//! ```toml
//! [[class]]
//! name = "chat::EchoEndpoint"
//! server_endpoint = { path = "/echo", subprotocols = ["chat.v1"] }
//!
//! [[class]]
//! name = "chat::FeedConfig"
//! endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/feed" }
//!
//! [[class]]
//! name = "chat::AppConfig"
//! application_config = { select = ["chat::FeedEndpoint"] }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use wsboot_protocols::{CandidateClass, Capability, ClassRef, EndpointAnnotation, EndpointConfig};

use crate::error::ConfigError;

/// Declarative application config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfigEntry {
    /// Endpoint classes whose scanned configs are deployed.
    #[serde(default)]
    pub select: Vec<ClassRef>,

    /// Configs the application builds itself; always deployed.
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// One scanned class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestClass {
    pub name: ClassRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_endpoint: Option<EndpointAnnotation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_config: Option<EndpointConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_config: Option<ApplicationConfigEntry>,

    /// Whether the class can be constructed; `false` models a class
    /// without a usable no-argument constructor.
    #[serde(default = "default_constructible")]
    pub constructible: bool,
}

fn default_constructible() -> bool {
    true
}

impl ManifestClass {
    /// The capabilities the scanner reports for this class.
    pub fn to_candidate(&self) -> CandidateClass {
        let mut candidate = CandidateClass::new(self.name.clone());
        if self.application_config.is_some() {
            candidate = candidate.with_capability(Capability::ApplicationConfig);
        }
        if let Some(config) = &self.endpoint_config {
            candidate = candidate.with_capability(Capability::EndpointConfig {
                endpoint_class: config.endpoint_class.clone(),
            });
        }
        if let Some(annotation) = &self.server_endpoint {
            candidate = candidate.with_capability(Capability::ServerEndpoint(annotation.clone()));
        }
        candidate
    }

    fn has_capability(&self) -> bool {
        self.server_endpoint.is_some()
            || self.endpoint_config.is_some()
            || self.application_config.is_some()
    }
}

/// The scanned classes of one deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanManifest {
    #[serde(rename = "class", default)]
    pub classes: Vec<ManifestClass>,
}

impl ScanManifest {
    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Parse and validate a manifest.
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let manifest: ScanManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check names are present and unique and every class declares something.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, class) in self.classes.iter().enumerate() {
            let field = format!("class[{}]", i);
            if class.name.as_str().is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("{}.name", field),
                    "class name cannot be empty",
                ));
            }
            if !seen.insert(&class.name) {
                return Err(ConfigError::invalid_value(
                    format!("{}.name", field),
                    format!("class {} is listed twice", class.name),
                ));
            }
            if !class.has_capability() {
                return Err(ConfigError::invalid_value(
                    field,
                    format!("class {} declares no endpoint capability", class.name),
                ));
            }
        }
        Ok(())
    }

    /// The candidates handed to classification, in manifest order.
    pub fn candidates(&self) -> Vec<CandidateClass> {
        self.classes.iter().map(ManifestClass::to_candidate).collect()
    }

    /// Every config declared by an endpoint config class.
    pub fn endpoint_configs(&self) -> impl Iterator<Item = (&ClassRef, &EndpointConfig)> {
        self.classes
            .iter()
            .filter_map(|c| c.endpoint_config.as_ref().map(|config| (&c.name, config)))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"
        [[class]]
        name = "chat::EchoEndpoint"
        server_endpoint = { path = "/echo", subprotocols = ["chat.v1"] }

        [[class]]
        name = "chat::FeedConfig"
        endpoint_config = { endpoint_class = "chat::FeedEndpoint", path = "/feed" }

        [[class]]
        name = "chat::AppConfig"
        application_config = { select = ["chat::FeedEndpoint"] }

        [[class]]
        name = "chat::BrokenConfig"
        endpoint_config = { endpoint_class = "chat::Broken", path = "/broken" }
        constructible = false
    "#;

    #[test]
    fn test_load_manifest() {
        let manifest = ScanManifest::load_str(MANIFEST).unwrap();
        assert_eq!(manifest.len(), 4);

        let echo = &manifest.classes[0];
        assert_eq!(echo.name, ClassRef::new("chat::EchoEndpoint"));
        let annotation = echo.server_endpoint.as_ref().unwrap();
        assert_eq!(annotation.path, "/echo");
        assert_eq!(annotation.subprotocols, vec!["chat.v1"]);
        assert!(echo.constructible);

        assert!(!manifest.classes[3].constructible);
    }

    #[test]
    fn test_candidates_carry_capabilities() {
        let manifest = ScanManifest::load_str(MANIFEST).unwrap();
        let candidates = manifest.candidates();

        assert!(candidates[0].endpoint_annotation().is_some());
        assert_eq!(
            candidates[1].declared_endpoint_class(),
            Some(&ClassRef::new("chat::FeedEndpoint"))
        );
        assert!(candidates[2].is_application_config());
        assert!(candidates[2].endpoint_annotation().is_none());
    }

    #[test]
    fn test_endpoint_configs() {
        let manifest = ScanManifest::load_str(MANIFEST).unwrap();
        let paths: Vec<_> = manifest
            .endpoint_configs()
            .map(|(_, config)| config.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/feed", "/broken"]);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ScanManifest::load_str("").unwrap();
        assert!(manifest.is_empty());
        assert!(manifest.candidates().is_empty());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let content = r#"
            [[class]]
            name = "chat::Echo"
            server_endpoint = { path = "/a" }

            [[class]]
            name = "chat::Echo"
            server_endpoint = { path = "/b" }
        "#;
        let err = ScanManifest::load_str(content).unwrap_err();
        assert!(err.to_string().contains("class[1].name"));
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_class_without_capability_rejected() {
        let err = ScanManifest::load_str("[[class]]\nname = \"chat::Idle\"").unwrap_err();
        assert!(err.to_string().contains("no endpoint capability"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let content = "[[class]]\nname = \"\"\nserver_endpoint = { path = \"/a\" }";
        let err = ScanManifest::load_str(content).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_endpoint_config_requires_path() {
        let content = r#"
            [[class]]
            name = "chat::C"
            endpoint_config = { endpoint_class = "chat::E" }
        "#;
        assert!(matches!(
            ScanManifest::load_str(content),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", MANIFEST).unwrap();

        let manifest = ScanManifest::load(file.path()).unwrap();
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScanManifest::load(&dir.path().join("scan.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
