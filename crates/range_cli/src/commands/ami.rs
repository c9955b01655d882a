//! Ami command - Resolve the jump host image for a flavor.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Args;

use range_iac::AmiResolver;
use range_spec::{EnvironmentLoader, JumpFlavor};

use super::load_image_table;

#[derive(Args)]
pub struct AmiArgs {
    /// Name of the environment
    env: String,

    /// Jump host flavor (windows, kali)
    flavor: String,

    /// Image table to use instead of the built-in one (YAML)
    #[arg(long)]
    images: Option<PathBuf>,
}

pub fn execute(root: &Path, args: AmiArgs) -> Result<()> {
    let flavor = JumpFlavor::from_str(&args.flavor)
        .ok_or_else(|| anyhow!("Unknown jump host flavor: {} (expected windows or kali)", args.flavor))?;

    let env = EnvironmentLoader::new(root)
        .load(&args.env)
        .with_context(|| format!("Failed to load environment {}", args.env))?;

    let table = load_image_table(args.images.as_deref())?;
    let image = AmiResolver::new(&table).resolve_image(flavor, &env)?;
    println!("{}", image);
    Ok(())
}
