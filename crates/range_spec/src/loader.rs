//! Environment loading.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{SpecError, SpecResult};
use crate::layout::EnvironmentLayout;
use crate::models::Environment;
use crate::reader::DefinitionReader;
use crate::resolver::NetworkResolver;

/// Loads environments below a root directory.
///
/// A loaded [`Environment`] is always fully resolved: its included networks
/// and their included hosts are populated before `load` returns.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    root_path: PathBuf,
}

impl EnvironmentLoader {
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Layout of environment `name` below this loader's root.
    pub fn layout(&self, name: &str) -> SpecResult<EnvironmentLayout> {
        EnvironmentLayout::new(&self.root_path, name)
    }

    /// Load and resolve environment `name`.
    pub fn load(&self, name: &str) -> SpecResult<Environment> {
        let layout = self.layout(name)?;
        layout.ensure_exists()?;

        let mut env = DefinitionReader::read_environment(&layout)?;
        if env.pod_count < 1 {
            return Err(SpecError::invalid_format(
                layout.env_file(),
                "pod_count must be at least 1",
            ));
        }
        if !env.name.is_empty() && env.name != layout.name() {
            warn!(
                "Environment file declares name '{}', using directory name '{}'",
                env.name,
                layout.name()
            );
        }
        env.name = layout.name().to_string();

        let networks = NetworkResolver::resolve_included_networks(&layout, &env.included_networks);
        env.resolved_networks = networks.resolved;
        env.skipped = networks.skipped;

        info!(
            "Loaded environment {} ({} of {} networks, {} skipped definitions)",
            env.name,
            env.resolved_networks.len(),
            env.included_networks.len(),
            env.skipped.len()
        );
        Ok(env)
    }

    /// Names of every environment directory below the root, sorted.
    pub fn list(&self) -> SpecResult<Vec<String>> {
        let dir = self.root_path.join(EnvironmentLayout::ENVIRONMENTS_DIR);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn scaffold(root: &Path, name: &str, env_yml: &str) -> EnvironmentLayout {
        let layout = EnvironmentLayout::new(root, name).unwrap();
        fs::create_dir_all(layout.networks_dir()).unwrap();
        fs::create_dir_all(layout.hosts_dir()).unwrap();
        fs::write(layout.env_file(), env_yml).unwrap();
        layout
    }

    #[test]
    fn test_directory_name_wins() {
        let temp = tempdir().unwrap();
        scaffold(temp.path(), "blue", "name: green\nprefix: b\n");

        let env = EnvironmentLoader::new(temp.path()).load("blue").unwrap();
        assert_eq!(env.name, "blue");
    }

    #[test]
    fn test_zero_pod_count_rejected() {
        let temp = tempdir().unwrap();
        scaffold(temp.path(), "blue", "name: blue\npod_count: 0\n");

        let err = EnvironmentLoader::new(temp.path()).load("blue").unwrap_err();
        assert!(matches!(err, SpecError::InvalidFormat { .. }));
    }

    #[test]
    fn test_list_environments() {
        let temp = tempdir().unwrap();
        scaffold(temp.path(), "red", "name: red\n");
        scaffold(temp.path(), "blue", "name: blue\n");

        let names = EnvironmentLoader::new(temp.path()).list().unwrap();
        assert_eq!(names, vec!["blue".to_string(), "red".to_string()]);
    }
}
