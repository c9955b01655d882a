//! Inclusion-filtered resolution of networks and hosts.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::layout::EnvironmentLayout;
use crate::models::{Host, Network};
use crate::reader::{normalize_name, DefinitionReader, Resolution};

/// Lower-cased lookup set for an inclusion list.
fn inclusion_set(included: &[String]) -> BTreeSet<String> {
    included.iter().map(|name| normalize_name(name)).collect()
}

/// Resolves the networks an environment includes.
pub struct NetworkResolver;

impl NetworkResolver {
    /// Resolve the included networks of `environment`, then their hosts.
    ///
    /// Names listed in `included` without a matching file are simply absent.
    /// Skipped host files are reported alongside skipped network files.
    pub fn resolve_included_networks(
        layout: &EnvironmentLayout,
        included: &[String],
    ) -> Resolution<Network> {
        let wanted = inclusion_set(included);
        let mut resolution: Resolution<Network> =
            DefinitionReader::collect(layout.networks_dir(), |name| wanted.contains(name));

        let hosts_dir = layout.hosts_dir();
        for network in resolution.resolved.values_mut() {
            network.attach(layout.name());

            let hosts = HostResolver::resolve_included_hosts(&hosts_dir, &network.included_hosts);
            debug!(
                "Network {} resolved {} of {} included hosts",
                network.name,
                hosts.resolved.len(),
                network.included_hosts.len()
            );
            network.resolved_hosts = hosts.resolved;
            resolution.skipped.extend(hosts.skipped);
        }

        resolution.skipped.sort_by(|a, b| a.path.cmp(&b.path));
        resolution.skipped.dedup();
        resolution
    }
}

/// Resolves the hosts a network includes.
pub struct HostResolver;

impl HostResolver {
    /// Resolve the hosts in `hosts_dir` named by `included`.
    pub fn resolve_included_hosts(hosts_dir: &Path, included: &[String]) -> Resolution<Host> {
        let wanted = inclusion_set(included);
        DefinitionReader::collect(hosts_dir, |name| wanted.contains(name))
    }
}
