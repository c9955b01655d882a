//! Per-pod infrastructure plan derived from a resolved environment.
//!
//! The plan is the hand-off to infrastructure generation: everything a
//! generator needs to stamp out `pod_count` isolated copies of an
//! environment without re-reading any definition files.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use range_spec::{Environment, EnvironmentLayout, JumpFlavor, PortAggregator};

use crate::ami::AmiResolver;
use crate::error::IacResult;

/// Everything derived from one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfraPlan {
    pub environment: String,
    pub domain: String,
    pub region: String,
    pub zone: String,
    pub cidr: String,
    pub ip_whitelist: Vec<String>,
    pub tcp_ports: BTreeSet<u16>,
    pub udp_ports: BTreeSet<u16>,
    pub jump_hosts: Vec<JumpHostPlan>,
    pub pods: Vec<PodPlan>,
    pub terraform_file: PathBuf,
}

/// One jump host flavor that will be launched in every pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpHostPlan {
    pub flavor: JumpFlavor,
    pub image: String,
    pub count: u32,
    pub size: String,
    pub scripts: Vec<String>,
}

/// Names and credentials of one pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodPlan {
    pub offset: i64,
    pub suffix: String,
    pub password: String,
    pub networks: BTreeMap<String, NetworkPlan>,
}

/// Resource names of one network inside a pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkPlan {
    pub resource_name: String,
    pub hosts: BTreeMap<String, String>,
}

impl InfraPlan {
    /// Build the plan for a resolved environment.
    ///
    /// Images are only resolved for flavors with a non-zero count.
    pub fn build(
        env: &Environment,
        layout: &EnvironmentLayout,
        images: &AmiResolver<'_>,
    ) -> IacResult<Self> {
        let mut jump_hosts = Vec::new();
        for flavor in JumpFlavor::all() {
            let spec = env.jump_hosts.flavor(flavor);
            if spec.count == 0 {
                continue;
            }
            jump_hosts.push(JumpHostPlan {
                flavor,
                image: images.resolve_image(flavor, env)?,
                count: spec.count,
                size: spec.size.clone(),
                scripts: spec.scripts.clone(),
            });
        }

        let namer = env.pod_namer();
        let pods: Vec<PodPlan> = env
            .pod_offsets()
            .map(|offset| PodPlan {
                offset,
                suffix: namer.suffix(offset),
                password: namer.pod_password(offset),
                networks: env
                    .resolved_networks
                    .iter()
                    .map(|(name, network)| {
                        let hosts = network
                            .resolved_hosts
                            .keys()
                            .map(|host| (host.clone(), namer.resource_name(host, offset)))
                            .collect();
                        let plan = NetworkPlan {
                            resource_name: namer.resource_name(name, offset),
                            hosts,
                        };
                        (name.clone(), plan)
                    })
                    .collect(),
            })
            .collect();
        debug!("Planned {} pods for {}", pods.len(), env.name);

        Ok(Self {
            environment: env.name.clone(),
            domain: env.domain.clone(),
            region: env.aws_config.region.clone(),
            zone: env.aws_config.zone.clone(),
            cidr: env.effective_cidr().to_string(),
            ip_whitelist: env.ip_whitelist.clone(),
            tcp_ports: PortAggregator::public_tcp_ports(env),
            udp_ports: PortAggregator::public_udp_ports(env),
            jump_hosts,
            pods,
            terraform_file: layout.tf_file(),
        })
    }

    /// Pretty-printed JSON form of the plan.
    pub fn to_json(&self) -> IacResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
