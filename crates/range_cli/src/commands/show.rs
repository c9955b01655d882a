//! Show command - Print the resolved environment graph.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use range_spec::{normalize_name, EnvironmentLoader};

#[derive(Args)]
pub struct ShowArgs {
    /// Name of the environment
    env: String,
}

pub fn execute(root: &Path, args: ShowArgs) -> Result<()> {
    info!("Loading environment: {}", args.env);

    let env = EnvironmentLoader::new(root)
        .load(&args.env)
        .with_context(|| format!("Failed to load environment {}", args.env))?;

    println!("🌐 {} (prefix '{}', {} pods)", env.name, env.prefix, env.pod_count);
    println!("   region: {}  zone: {}  cidr: {}", env.aws_config.region, env.aws_config.zone, env.effective_cidr());
    if !env.domain.is_empty() {
        println!("   domain: {}", env.domain);
    }

    for name in &env.included_networks {
        match env.network(name) {
            Some(network) => {
                println!("   📁 {}", network.name);
                for host in &network.included_hosts {
                    match network.resolved_hosts.get(&normalize_name(host)) {
                        Some(h) => println!(
                            "      🖥️  {}  tcp {:?}  udp {:?}",
                            h.hostname, h.tcp_ports, h.udp_ports
                        ),
                        None => println!("      ⚠️  {} (not resolved)", host),
                    }
                }
            }
            None => println!("   ⚠️  {} (not resolved)", name),
        }
    }

    if !env.skipped.is_empty() {
        println!();
        println!("Skipped definitions:");
        for skipped in &env.skipped {
            println!("   - {} ({})", skipped.path.display(), skipped.reason);
        }
    }

    Ok(())
}
