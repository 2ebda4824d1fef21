//! Endpoint path templates.

use wsboot_protocols::DeploymentError;

/// A validated endpoint path such as `/rooms/{room}/members`.
///
/// Two templates clash when they differ only in variable names, so the
/// registry key replaces every `{name}` segment with `{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    key: String,
    variables: Vec<String>,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Result<Self, DeploymentError> {
        let invalid = |reason: &str| DeploymentError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let Some(rest) = path.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };

        if rest.is_empty() {
            return Ok(Self {
                raw: path.to_string(),
                key: "/".to_string(),
                variables: Vec::new(),
            });
        }

        if rest.ends_with('/') {
            return Err(invalid("must not end with '/'"));
        }

        let mut key_segments = Vec::new();
        let mut variables: Vec<String> = Vec::new();

        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(invalid("contains an empty segment"));
            }

            if !segment.contains(['{', '}']) {
                key_segments.push(segment);
                continue;
            }

            let name = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .ok_or_else(|| invalid("a variable must span a whole segment"))?;

            if name.is_empty() {
                return Err(invalid("a variable needs a name"));
            }
            if !name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
            {
                return Err(invalid(&format!("bad variable name '{}'", name)));
            }
            if variables.iter().any(|v| v == name) {
                return Err(invalid(&format!("variable '{}' appears twice", name)));
            }

            variables.push(name.to_string());
            key_segments.push("{}");
        }

        Ok(Self {
            raw: path.to_string(),
            key: format!("/{}", key_segments.join("/")),
            variables,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The path with variable names erased.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn is_template(&self) -> bool {
        !self.variables.is_empty()
    }
}
