//! Create commands - New network and host definitions from templates.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use range_spec::EnvironmentLayout;
use range_templates::{
    DefinitionCreator, DirectoryTemplates, EmbeddedTemplates, HostDraft, NetworkDraft,
    TemplateSource,
};

#[derive(Args)]
pub struct CreateNetworkArgs {
    /// Name of the environment
    env: String,

    /// Name of the network to create
    name: String,

    /// Hosts included by the network
    #[arg(long = "host", value_delimiter = ',')]
    hosts: Vec<String>,

    /// Directory with network.yml/host.yml overriding the built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,
}

#[derive(Args)]
pub struct CreateHostArgs {
    /// Name of the environment
    env: String,

    /// Hostname of the host to create
    hostname: String,

    /// Public TCP ports
    #[arg(long, value_delimiter = ',')]
    tcp: Vec<u16>,

    /// Public UDP ports
    #[arg(long, value_delimiter = ',')]
    udp: Vec<u16>,

    /// Directory with network.yml/host.yml overriding the built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,
}

fn creator(root: &Path, env: &str, templates: Option<PathBuf>) -> Result<DefinitionCreator> {
    let layout = EnvironmentLayout::new(root, env)?;
    layout
        .ensure_exists()
        .with_context(|| format!("Environment {} is not initialized", env))?;

    let source: Arc<dyn TemplateSource> = match templates {
        Some(path) => Arc::new(DirectoryTemplates::new(path)),
        None => Arc::new(EmbeddedTemplates),
    };
    Ok(DefinitionCreator::new(layout, source))
}

pub fn execute_network(root: &Path, args: CreateNetworkArgs) -> Result<()> {
    info!("Creating network {} in {}", args.name, args.env);

    let draft = NetworkDraft {
        name: args.name,
        included_hosts: args.hosts,
    };
    let created = creator(root, &args.env, args.templates)?
        .create_network(&draft)
        .context("Failed to create network")?;

    println!("✅ Network created: {}", created.path.display());
    Ok(())
}

pub fn execute_host(root: &Path, args: CreateHostArgs) -> Result<()> {
    info!("Creating host {} in {}", args.hostname, args.env);

    let draft = HostDraft {
        hostname: args.hostname,
        tcp_ports: args.tcp,
        udp_ports: args.udp,
    };
    let created = creator(root, &args.env, args.templates)?
        .create_host(&draft)
        .context("Failed to create host")?;

    println!("✅ Host created: {}", created.path.display());
    Ok(())
}
