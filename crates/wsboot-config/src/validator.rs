//! Configuration validation.

use std::fmt;

use crate::error::ConfigError;
use crate::schema::Config;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_scan(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        let context_path = &config.server.context_path;
        if !context_path.is_empty() {
            if !context_path.starts_with('/') {
                result.add_error(ValidationError::new(
                    "server.context_path",
                    "context_path must be empty or start with '/'",
                ));
            } else if context_path.ends_with('/') {
                result.add_error(ValidationError::new(
                    "server.context_path",
                    "context_path must not end with '/'",
                ));
            }
            if context_path.contains(['{', '}']) {
                result.add_error(ValidationError::new(
                    "server.context_path",
                    "context_path cannot hold path variables",
                ));
            }
        }

        if config.server.shutdown_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "server.shutdown_timeout_secs",
                "shutdown_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_scan(config: &Config, result: &mut ValidationResult) {
        for (i, namespace) in config.scan.excluded_namespaces.iter().enumerate() {
            let path = format!("scan.excluded_namespaces[{}]", i);
            if namespace.trim().is_empty() {
                result.add_error(ValidationError::new(path, "namespace cannot be empty"));
            } else if namespace.starts_with("::") || namespace.ends_with("::") {
                result.add_error(ValidationError::new(
                    path,
                    format!("namespace '{}' cannot start or end with '::'", namespace),
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }

        if let Some(dir) = &config.logging.dir {
            if dir.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "logging.dir",
                    "log directory cannot be empty",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
