//! Public port aggregation over a resolved environment.

use std::collections::BTreeSet;

use crate::models::{Environment, Host};

/// Collects the ports exposed by the hosts of an environment.
pub struct PortAggregator;

impl PortAggregator {
    /// Distinct TCP ports exposed by any resolved host.
    pub fn public_tcp_ports(env: &Environment) -> BTreeSet<u16> {
        Self::collect(env, |host| &host.tcp_ports)
    }

    /// Distinct UDP ports exposed by any resolved host.
    pub fn public_udp_ports(env: &Environment) -> BTreeSet<u16> {
        Self::collect(env, |host| &host.udp_ports)
    }

    fn collect<F>(env: &Environment, ports: F) -> BTreeSet<u16>
    where
        F: Fn(&Host) -> &Vec<u16>,
    {
        env.hosts()
            .flat_map(|(_, host)| ports(host).iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;

    fn environment() -> Environment {
        let mut dmz = Network::new("dmz");
        dmz.resolved_hosts.insert("web".into(), Host::new("web").with_tcp([22, 80]));
        dmz.resolved_hosts.insert("proxy".into(), Host::new("proxy").with_tcp([80, 443]));

        let mut corp = Network::new("corp");
        corp.resolved_hosts
            .insert("dns".into(), Host::new("dns").with_tcp([53]).with_udp([53, 123]));
        corp.resolved_hosts.insert("ntp".into(), Host::new("ntp").with_udp([123]));

        let mut env = Environment::new("blue");
        env.resolved_networks.insert("dmz".into(), dmz);
        env.resolved_networks.insert("corp".into(), corp);
        env
    }

    #[test]
    fn test_tcp_ports_deduplicated() {
        let ports = PortAggregator::public_tcp_ports(&environment());
        assert_eq!(ports.into_iter().collect::<Vec<_>>(), vec![22, 53, 80, 443]);
    }

    #[test]
    fn test_udp_ports_deduplicated() {
        let ports = PortAggregator::public_udp_ports(&environment());
        assert_eq!(ports.into_iter().collect::<Vec<_>>(), vec![53, 123]);
    }

    #[test]
    fn test_empty_environment() {
        assert!(PortAggregator::public_tcp_ports(&Environment::new("empty")).is_empty());
    }
}
