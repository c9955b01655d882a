//! On-disk layout of an environment.

use std::path::{Path, PathBuf};

use crate::error::{SpecError, SpecResult};

/// Paths of one environment below an explicit root.
///
/// ```text
/// <root>/environments/<name>/
/// ├── env.yml
/// ├── networks/
/// ├── hosts/
/// └── terraform/
///     ├── infra.tf
///     └── scripts/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentLayout {
    root_path: PathBuf,
    name: String,
}

impl EnvironmentLayout {
    /// Directory holding every environment below the root.
    pub const ENVIRONMENTS_DIR: &'static str = "environments";
    /// Environment definition file name.
    pub const ENV_FILE: &'static str = "env.yml";

    /// Create the layout for environment `name` below `root`.
    ///
    /// The name must be a single path component.
    pub fn new(root: impl AsRef<Path>, name: &str) -> SpecResult<Self> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(SpecError::InvalidName(name.to_string()));
        }

        Ok(Self {
            root_path: root.as_ref().to_path_buf(),
            name: name.to_string(),
        })
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env_root(&self) -> PathBuf {
        self.root_path.join(Self::ENVIRONMENTS_DIR).join(&self.name)
    }

    pub fn env_file(&self) -> PathBuf {
        self.env_root().join(Self::ENV_FILE)
    }

    pub fn networks_dir(&self) -> PathBuf {
        self.env_root().join("networks")
    }

    pub fn hosts_dir(&self) -> PathBuf {
        self.env_root().join("hosts")
    }

    pub fn tf_dir(&self) -> PathBuf {
        self.env_root().join("terraform")
    }

    pub fn tf_file(&self) -> PathBuf {
        self.tf_dir().join("infra.tf")
    }

    pub fn tf_scripts_dir(&self) -> PathBuf {
        self.tf_dir().join("scripts")
    }

    /// Fail with `NotFound` on the first required path that is missing.
    pub fn ensure_exists(&self) -> SpecResult<()> {
        for path in [self.env_root(), self.env_file(), self.networks_dir(), self.hosts_dir()] {
            if !path.exists() {
                return Err(SpecError::NotFound(path));
            }
        }
        Ok(())
    }
}
