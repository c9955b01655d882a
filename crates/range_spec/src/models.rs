//! Data models for environments, networks and hosts.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::reader::normalize_name;

/// CIDR used when an environment does not declare one.
pub const DEFAULT_CIDR: &str = "10.0.0.0/8";

/// Free-form variables attached to an environment.
pub type Vars = BTreeMap<String, String>;

/// Root entity: one competition range, replicated `pod_count` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub ip_whitelist: Vec<String>,
    #[serde(default)]
    pub variables: Vars,
    #[serde(default)]
    pub aws_config: AwsConfig,
    #[serde(default = "default_pod_count")]
    pub pod_count: u32,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub included_networks: Vec<String>,
    #[serde(default)]
    pub jump_hosts: JumpHosts,

    /// Networks materialized by this environment, keyed by derived name.
    #[serde(skip)]
    pub resolved_networks: BTreeMap<String, Network>,

    /// Definitions dropped during the last resolution.
    #[serde(skip)]
    pub skipped: Vec<SkippedDefinition>,
}

fn default_pod_count() -> u32 {
    1
}

impl Environment {
    /// Create an empty environment with a single pod.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: String::new(),
            ip_whitelist: Vec::new(),
            variables: Vars::new(),
            aws_config: AwsConfig::default(),
            pod_count: default_pod_count(),
            domain: String::new(),
            included_networks: Vec::new(),
            jump_hosts: JumpHosts::default(),
            resolved_networks: BTreeMap::new(),
            skipped: Vec::new(),
        }
    }

    /// The configured CIDR, or [`DEFAULT_CIDR`] when none is set.
    pub fn effective_cidr(&self) -> &str {
        if self.aws_config.cidr.is_empty() {
            DEFAULT_CIDR
        } else {
            &self.aws_config.cidr
        }
    }

    /// Look up a resolved network by name.
    pub fn network(&self, name: &str) -> Option<&Network> {
        self.resolved_networks.get(&normalize_name(name))
    }

    /// Iterate over every resolved host together with its network.
    pub fn hosts(&self) -> impl Iterator<Item = (&Network, &Host)> {
        self.resolved_networks
            .values()
            .flat_map(|network| network.resolved_hosts.values().map(move |host| (network, host)))
    }

    /// Pod offsets this environment is replicated over, starting at zero.
    pub fn pod_offsets(&self) -> std::ops::Range<i64> {
        0..i64::from(self.pod_count)
    }
}

/// Cloud placement for an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConfig {
    #[serde(default)]
    pub cidr: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub zone: String,
}

/// Bastion hosts shared by every pod of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpHosts {
    #[serde(default)]
    pub cidr: String,
    #[serde(default)]
    pub windows: JumpHostSpec,
    #[serde(default)]
    pub kali: JumpHostSpec,
}

impl JumpHosts {
    /// Get the block for one flavor.
    pub fn flavor(&self, flavor: JumpFlavor) -> &JumpHostSpec {
        match flavor {
            JumpFlavor::Windows => &self.windows,
            JumpFlavor::Kali => &self.kali,
        }
    }
}

/// Sizing and provisioning for one jump host flavor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpHostSpec {
    #[serde(default)]
    pub ami: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub scripts: Vec<String>,
}

impl JumpHostSpec {
    /// The image override, if one is configured.
    pub fn image_override(&self) -> Option<&str> {
        let ami = self.ami.trim();
        (!ami.is_empty()).then_some(ami)
    }
}

/// Operating system flavors offered for jump hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpFlavor {
    Windows,
    Kali,
}

impl JumpFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            JumpFlavor::Windows => "windows",
            JumpFlavor::Kali => "kali",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "windows" => Some(JumpFlavor::Windows),
            "kali" => Some(JumpFlavor::Kali),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![JumpFlavor::Windows, JumpFlavor::Kali]
    }

    /// Key of the default image for this flavor in the image table.
    pub fn default_image_key(&self) -> &'static str {
        match self {
            JumpFlavor::Windows => "w2k16",
            JumpFlavor::Kali => "ubuntu",
        }
    }
}

impl fmt::Display for JumpFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logical subnet of an environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Always replaced by the name derived from the file name on load.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub included_hosts: Vec<String>,

    #[serde(skip)]
    pub resolved_hosts: BTreeMap<String, Host>,

    /// Name of the owning environment.
    #[serde(skip)]
    environment: String,
}

impl Network {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a host to the inclusion list.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.included_hosts.push(host.into());
        self
    }

    /// Name of the environment this network was resolved for.
    ///
    /// Empty for networks that were parsed outside of an environment load.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub(crate) fn attach(&mut self, environment: &str) {
        self.environment = environment.to_string();
    }
}

/// One machine within a network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Always replaced by the name derived from the file name on load.
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub tcp_ports: Vec<u16>,
    #[serde(default)]
    pub udp_ports: Vec<u16>,
}

impl Host {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    pub fn with_tcp(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.tcp_ports.extend(ports);
        self
    }

    pub fn with_udp(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.udp_ports.extend(ports);
        self
    }
}

/// A definition file that did not make it into a resolved graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDefinition {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Why a definition file was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be decoded.
    Malformed(String),
    /// Another file with the same derived name replaced this one.
    DuplicateName(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed(message) => write!(f, "malformed: {}", message),
            SkipReason::DuplicateName(name) => write!(f, "duplicate name '{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults() {
        let env: Environment = serde_yaml::from_str("name: blue\nprefix: b\n").unwrap();
        assert_eq!(env.pod_count, 1);
        assert_eq!(env.effective_cidr(), DEFAULT_CIDR);
        assert!(env.resolved_networks.is_empty());
    }

    #[test]
    fn test_environment_full_definition() {
        let env: Environment = serde_yaml::from_str(
            r#"
name: red
prefix: rd
ip_whitelist: ["1.2.3.4/32"]
variables:
  flag: "ctf{x}"
aws_config:
  cidr: 172.16.0.0/12
  region: us-west-2
  zone: us-west-2a
pod_count: 4
domain: range.local
included_networks: [dmz, Corp]
jump_hosts:
  cidr: 10.255.0.0/16
  windows:
    ami: ami-123
    count: 2
    size: t2.medium
    scripts: [setup.ps1]
  kali:
    count: 1
"#,
        )
        .unwrap();

        assert_eq!(env.pod_count, 4);
        assert_eq!(env.effective_cidr(), "172.16.0.0/12");
        assert_eq!(env.variables.get("flag").map(String::as_str), Some("ctf{x}"));
        assert_eq!(env.included_networks, vec!["dmz", "Corp"]);
        assert_eq!(env.jump_hosts.flavor(JumpFlavor::Windows).image_override(), Some("ami-123"));
        assert_eq!(env.jump_hosts.flavor(JumpFlavor::Kali).image_override(), None);
        assert_eq!(env.pod_offsets().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_negative_pod_count_rejected() {
        let result: Result<Environment, _> = serde_yaml::from_str("name: x\npod_count: -1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_jump_flavor_keys() {
        assert_eq!(JumpFlavor::from_str("Kali"), Some(JumpFlavor::Kali));
        assert_eq!(JumpFlavor::Kali.default_image_key(), "ubuntu");
        assert_eq!(JumpFlavor::Windows.default_image_key(), "w2k16");
        assert_eq!(JumpFlavor::from_str("bsd"), None);
    }
}
