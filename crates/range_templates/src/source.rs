//! Keyed template sources.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

/// Key of the network definition template.
pub const NETWORK_TEMPLATE: &str = "network.yml";
/// Key of the host definition template.
pub const HOST_TEMPLATE: &str = "host.yml";

/// Provides template text by key.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    fn template(&self, key: &str) -> TemplateResult<String>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn template(&self, key: &str) -> TemplateResult<String> {
        match key {
            NETWORK_TEMPLATE => Ok(include_str!("../assets/network.yml").to_string()),
            HOST_TEMPLATE => Ok(include_str!("../assets/host.yml").to_string()),
            other => Err(TemplateError::NotFound(other.to_string())),
        }
    }
}

/// Templates read from a directory, one file per key.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    templates_path: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }
}

impl TemplateSource for DirectoryTemplates {
    fn template(&self, key: &str) -> TemplateResult<String> {
        if key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TemplateError::NotFound(key.to_string()));
        }

        let path = self.templates_path.join(key);
        debug!("Loading template {} from {:?}", key, path);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TemplateError::NotFound(key.to_string()),
            _ => TemplateError::Io(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_keys() {
        assert!(EmbeddedTemplates.template(NETWORK_TEMPLATE).unwrap().contains("included_hosts"));
        assert!(EmbeddedTemplates.template(HOST_TEMPLATE).unwrap().contains("tcp_ports"));
        assert!(matches!(
            EmbeddedTemplates.template("router.yml"),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_templates() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(HOST_TEMPLATE), "hostname: {{ hostname }}\n").unwrap();

        let source = DirectoryTemplates::new(temp.path());
        assert_eq!(source.template(HOST_TEMPLATE).unwrap(), "hostname: {{ hostname }}\n");
        assert!(matches!(
            source.template(NETWORK_TEMPLATE),
            Err(TemplateError::NotFound(_))
        ));
        assert!(matches!(source.template("../host.yml"), Err(TemplateError::NotFound(_))));
    }
}
