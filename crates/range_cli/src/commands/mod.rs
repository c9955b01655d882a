//! CLI command definitions.
//!
//! Each subcommand maps to one operation on an environment below the
//! ranger root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use range_iac::StaticImageTable;

pub mod ami;
pub mod create;
pub mod list;
pub mod password;
pub mod plan;
pub mod ports;
pub mod show;
pub mod validate;

/// ranger - competition range definitions
#[derive(Parser)]
#[command(name = "ranger")]
#[command(version, about = "ranger - resolve and generate competition range definitions")]
#[command(long_about = r#"
ranger resolves competition range environments (environment -> networks ->
hosts) from YAML definitions and generates new definitions from templates.

COMMANDS:
  list            → List environments below the root
  show            → Print the resolved environment graph
  validate        → Report skipped, duplicate and dangling definitions
  ports           → List public TCP/UDP ports across all hosts
  plan            → Emit the per-pod infrastructure plan as JSON
  create-network  → Create a network definition from a template
  create-host     → Create a host definition from a template
  ami             → Resolve the jump host image for a flavor
  password        → Print the password of a pod

EXIT CODES:
  0 - Success
  1 - General error
  2 - Not found
  3 - Validation failure
  4 - Template error
  5 - IaC error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root directory holding environments/<name>/
    #[arg(short, long, global = true, env = "RANGER_HOME", default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List environments below the root
    List(list::ListArgs),

    /// Print the resolved environment graph
    Show(show::ShowArgs),

    /// Validate an environment's definitions
    Validate(validate::ValidateArgs),

    /// List public ports exposed by an environment
    Ports(ports::PortsArgs),

    /// Emit the per-pod infrastructure plan
    Plan(plan::PlanArgs),

    /// Create a network definition from a template
    #[command(name = "create-network")]
    CreateNetwork(create::CreateNetworkArgs),

    /// Create a host definition from a template
    #[command(name = "create-host")]
    CreateHost(create::CreateHostArgs),

    /// Resolve the jump host image for a flavor
    Ami(ami::AmiArgs),

    /// Print the password of a pod
    Password(password::PasswordArgs),
}

/// Marker error for commands whose checks failed.
#[derive(Debug)]
pub struct ValidationFailed(pub String);

impl std::fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.0)
    }
}

impl std::error::Error for ValidationFailed {}

/// The image table from `path`, or the built-in one.
pub fn load_image_table(path: Option<&Path>) -> Result<StaticImageTable> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read image table {:?}", path))?;
            Ok(StaticImageTable::from_yaml(&content)?)
        }
        None => Ok(StaticImageTable::builtin()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_iac::ImageCatalog;
    use tempfile::tempdir;

    #[test]
    fn test_image_table_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("images.yml");
        fs::write(&path, "ubuntu:\n  regions:\n    us-east-1: ami-site-kali\n").unwrap();

        let table = load_image_table(Some(&path)).unwrap();
        assert_eq!(table.image("ubuntu", "us-east-1").as_deref(), Some("ami-site-kali"));
        assert!(table.get("w2k16").is_none());

        assert!(load_image_table(None).unwrap().get("w2k16").is_some());
        assert!(load_image_table(Some(&temp.path().join("absent.yml"))).is_err());
    }
}
