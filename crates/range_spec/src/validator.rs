//! Environment validation utilities.

use std::collections::BTreeSet;

use crate::layout::EnvironmentLayout;
use crate::models::{Environment, SkipReason};
use crate::reader::{normalize_name, DefinitionReader};

/// Diagnostics collected for one environment.
///
/// Errors make the environment unusable; warnings point at definitions that
/// were silently dropped or never found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// No errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Valid, and in `strict` mode also free of warnings.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_valid() && !(strict && !self.warnings.is_empty())
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

/// Validator for loaded environments.
pub struct EnvironmentValidator;

impl EnvironmentValidator {
    /// Validate a loaded environment against its files on disk.
    pub fn validate(env: &Environment, layout: &EnvironmentLayout) -> ValidationResult {
        let mut result = Self::validate_settings(env);
        result.merge(Self::validate_skipped(env));
        result.merge(Self::validate_references(env, layout));
        result
    }

    /// Check the environment's own settings.
    pub fn validate_settings(env: &Environment) -> ValidationResult {
        let mut result = ValidationResult::new();

        if env.pod_count < 1 {
            result.add_error("pod_count must be at least 1");
        }
        if env.prefix.is_empty() {
            result.add_warning("prefix is empty, pod resource names will only differ by number");
        }
        if env.aws_config.region.is_empty() {
            result.add_warning("aws_config.region is not set, default jump host images cannot be resolved");
        }
        if env.included_networks.is_empty() {
            result.add_warning("included_networks is empty");
        }

        let mut seen = BTreeSet::new();
        for name in &env.included_networks {
            if !seen.insert(normalize_name(name)) {
                result.add_warning(format!("Network '{}' is included more than once", name));
            }
        }

        result
    }

    /// Turn definitions dropped during resolution into diagnostics.
    pub fn validate_skipped(env: &Environment) -> ValidationResult {
        let mut result = ValidationResult::new();

        for skipped in &env.skipped {
            match &skipped.reason {
                SkipReason::Malformed(message) => {
                    result.add_error(format!("{}: {}", skipped.path.display(), message))
                }
                SkipReason::DuplicateName(name) => result.add_warning(format!(
                    "{} was replaced by another definition named '{}'",
                    skipped.path.display(),
                    name
                )),
            }
        }

        result
    }

    /// Report included names that have no definition file.
    pub fn validate_references(env: &Environment, layout: &EnvironmentLayout) -> ValidationResult {
        let mut result = ValidationResult::new();

        let networks: BTreeSet<String> =
            DefinitionReader::definition_names(layout.networks_dir()).into_iter().collect();
        let hosts: BTreeSet<String> =
            DefinitionReader::definition_names(layout.hosts_dir()).into_iter().collect();

        for name in &env.included_networks {
            if !networks.contains(&normalize_name(name)) {
                result.add_warning(format!("Included network '{}' has no definition file", name));
            }
        }

        for network in env.resolved_networks.values() {
            for host in &network.included_hosts {
                if !hosts.contains(&normalize_name(host)) {
                    result.add_warning(format!(
                        "Host '{}' included by network '{}' has no definition file",
                        host, network.name
                    ));
                }
            }
        }

        result
    }
}
