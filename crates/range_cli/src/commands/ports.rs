//! Ports command - List public ports of an environment.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use range_spec::{EnvironmentLoader, PortAggregator};

#[derive(Args)]
pub struct PortsArgs {
    /// Name of the environment
    env: String,
}

pub fn execute(root: &Path, args: PortsArgs) -> Result<()> {
    let env = EnvironmentLoader::new(root)
        .load(&args.env)
        .with_context(|| format!("Failed to load environment {}", args.env))?;

    let join = |ports: std::collections::BTreeSet<u16>| {
        ports.iter().map(u16::to_string).collect::<Vec<_>>().join(",")
    };
    println!("tcp: {}", join(PortAggregator::public_tcp_ports(&env)));
    println!("udp: {}", join(PortAggregator::public_udp_ports(&env)));
    Ok(())
}
