//! Definition file reading utilities.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{SpecError, SpecResult};
use crate::layout::EnvironmentLayout;
use crate::models::{Environment, Host, Network, SkipReason, SkippedDefinition};

/// File extensions recognized as definition files.
pub const DEFINITION_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Derive an entity name from a definition file path.
///
/// Strips the extension and lower-cases the stem. Returns `None` for
/// anything that is not a definition file (`.gitkeep`, `README.md`, ...).
pub fn definition_name(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    let ext = path.extension()?.to_str()?.to_lowercase();
    if !DEFINITION_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || stem.starts_with('.') {
        return None;
    }
    Some(stem.to_lowercase())
}

/// Normalize a name from an inclusion list for comparison with derived names.
///
/// Surrounding whitespace is ignored and the result is lower-cased, the same
/// way [`definition_name`] treats file stems.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A directory-backed entity whose identity comes from its file name.
pub trait Definition: DeserializeOwned {
    /// Human-readable entity kind, used in logs.
    const KIND: &'static str;

    /// Overwrite the name with the one derived from the file name.
    fn set_name(&mut self, name: &str);
}

impl Definition for Network {
    const KIND: &'static str = "network";

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

impl Definition for Host {
    const KIND: &'static str = "host";

    fn set_name(&mut self, name: &str) {
        self.hostname = name.to_string();
    }
}

/// Outcome of scanning one definition directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub resolved: BTreeMap<String, T>,
    pub skipped: Vec<SkippedDefinition>,
}

impl<T> Default for Resolution<T> {
    fn default() -> Self {
        Self {
            resolved: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }
}

/// Reader for environment, network and host definitions.
pub struct DefinitionReader;

impl DefinitionReader {
    /// Read and decode an environment's `env.yml`.
    pub fn read_environment(layout: &EnvironmentLayout) -> SpecResult<Environment> {
        let path = layout.env_file();
        debug!("Reading environment from {:?}", path);

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content).map_err(|e| SpecError::invalid_format(&path, e))
    }

    /// Read a single definition file, naming it after the file.
    pub fn read_definition<T: Definition>(path: impl AsRef<Path>) -> SpecResult<T> {
        let path = path.as_ref();
        let name = definition_name(path).ok_or_else(|| {
            SpecError::invalid_format(path, "not a definition file (expected .yml or .yaml)")
        })?;
        debug!("Reading {} definition from {:?}", T::KIND, path);

        let content = fs::read_to_string(path)?;
        let mut definition: T =
            serde_yaml::from_str(&content).map_err(|e| SpecError::invalid_format(path, e))?;
        definition.set_name(&name);
        Ok(definition)
    }

    /// List definition files in `dir`, sorted by path.
    ///
    /// Symlinks are listed unless they point at a directory; a dangling one
    /// fails on read and ends up skipped. A missing directory yields an empty
    /// list.
    pub fn definition_files(dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Vec::new();
        }

        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() || (e.path_is_symlink() && !e.path().is_dir()))
            .map(|e| e.into_path())
            .filter(|path| definition_name(path).is_some())
            .collect()
    }

    /// Derived names of every definition file in `dir`, parseable or not.
    pub fn definition_names(dir: impl AsRef<Path>) -> Vec<String> {
        let mut names: Vec<String> = Self::definition_files(dir)
            .iter()
            .filter_map(definition_name)
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Decode the definitions in `dir` whose derived name passes `include`.
    ///
    /// Files that fail to decode are logged and reported as skipped. When two
    /// files derive the same name the later one in path order wins and the
    /// replaced one is reported as a duplicate.
    pub fn collect<T, F>(dir: impl AsRef<Path>, include: F) -> Resolution<T>
    where
        T: Definition,
        F: Fn(&str) -> bool,
    {
        let mut resolution = Resolution::default();
        let mut origins: BTreeMap<String, PathBuf> = BTreeMap::new();

        for path in Self::definition_files(dir) {
            let Some(name) = definition_name(&path) else {
                continue;
            };
            if !include(&name) {
                continue;
            }

            match Self::read_definition::<T>(&path) {
                Ok(definition) => {
                    if let Some(previous) = origins.insert(name.clone(), path.clone()) {
                        warn!(
                            "Duplicate {} definition '{}': {:?} replaces {:?}",
                            T::KIND,
                            name,
                            path,
                            previous
                        );
                        resolution.skipped.push(SkippedDefinition {
                            path: previous,
                            reason: SkipReason::DuplicateName(name.clone()),
                        });
                    }
                    resolution.resolved.insert(name, definition);
                }
                Err(e) => {
                    warn!("Error reading {} file {:?}: {}", T::KIND, path, e);
                    resolution.skipped.push(SkippedDefinition {
                        path,
                        reason: SkipReason::Malformed(e.to_string()),
                    });
                }
            }
        }

        resolution.skipped.sort_by(|a, b| a.path.cmp(&b.path));
        resolution
    }

    /// Decode every network definition of an environment, ignoring inclusion.
    pub fn parse_networks(layout: &EnvironmentLayout) -> BTreeMap<String, Network> {
        Self::collect(layout.networks_dir(), |_| true).resolved
    }

    /// Decode every host definition of an environment, ignoring inclusion.
    pub fn parse_hosts(layout: &EnvironmentLayout) -> BTreeMap<String, Host> {
        Self::collect(layout.hosts_dir(), |_| true).resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_definition_name() {
        assert_eq!(definition_name("networks/DMZ.yml"), Some("dmz".to_string()));
        assert_eq!(definition_name("hosts/web-01.YAML"), Some("web-01".to_string()));
        assert_eq!(definition_name("networks/.gitkeep"), None);
        assert_eq!(definition_name("networks/notes.md"), None);
        assert_eq!(definition_name("networks/.yml"), None);
        assert_eq!(definition_name("networks/noext"), None);
    }

    #[test]
    fn test_read_definition_uses_file_name() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("Web.yml");
        fs::write(&path, "hostname: something-else\ntcp_ports: [80]\n").unwrap();

        let host: Host = DefinitionReader::read_definition(&path).unwrap();
        assert_eq!(host.hostname, "web");
        assert_eq!(host.tcp_ports, vec![80]);
    }

    #[test]
    fn test_definition_files_skip_placeholders() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitkeep"), "").unwrap();
        fs::write(temp.path().join("b.yml"), "tcp_ports: []\n").unwrap();
        fs::write(temp.path().join("a.yaml"), "tcp_ports: []\n").unwrap();
        fs::create_dir(temp.path().join("nested.yml")).unwrap();

        let names = DefinitionReader::definition_names(temp.path());
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let temp = tempdir().unwrap();
        assert!(DefinitionReader::definition_files(temp.path().join("absent")).is_empty());
    }

    #[test]
    fn test_collect_reports_duplicates() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("Web.yml"), "tcp_ports: [22]\n").unwrap();
        fs::write(temp.path().join("web.yaml"), "tcp_ports: [443]\n").unwrap();

        let resolution: Resolution<Host> = DefinitionReader::collect(temp.path(), |_| true);
        assert_eq!(resolution.resolved.len(), 1);
        assert_eq!(resolution.skipped.len(), 1);
        assert!(matches!(resolution.skipped[0].reason, SkipReason::DuplicateName(ref n) if n == "web"));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(" DMZ "), "dmz");
        assert_eq!(normalize_name("web-01"), "web-01");
        assert_eq!(normalize_name("Corp\t"), definition_name("networks/corp.yml").unwrap());
    }

    #[test]
    fn test_decode_failure_is_invalid_format() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "tcp_ports: nope\n").unwrap();

        let err = DefinitionReader::read_definition::<Host>(&path).unwrap_err();
        assert!(matches!(err, SpecError::InvalidFormat { path: ref p, .. } if p == &path));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_definitions_are_listed() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let target = temp.path().join("shared");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("dmz.yml"), "included_hosts: [web]\n").unwrap();

        let dir = temp.path().join("networks");
        fs::create_dir(&dir).unwrap();
        symlink(target.join("dmz.yml"), dir.join("dmz.yml")).unwrap();
        symlink(temp.path().join("absent.yml"), dir.join("gone.yml")).unwrap();
        symlink(&target, dir.join("linked.yml")).unwrap();

        assert_eq!(DefinitionReader::definition_names(&dir), vec!["dmz", "gone"]);

        let resolution: Resolution<Network> = DefinitionReader::collect(&dir, |_| true);
        assert_eq!(resolution.resolved["dmz"].included_hosts, vec!["web"]);
        assert_eq!(resolution.skipped.len(), 1);
        assert_eq!(resolution.skipped[0].path, dir.join("gone.yml"));
        assert!(matches!(resolution.skipped[0].reason, SkipReason::Malformed(_)));
    }
}
