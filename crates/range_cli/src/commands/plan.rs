//! Plan command - Emit the per-pod infrastructure plan.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use range_iac::{AmiResolver, InfraPlan};
use range_spec::EnvironmentLoader;

use super::load_image_table;

#[derive(Args)]
pub struct PlanArgs {
    /// Name of the environment
    env: String,

    /// Image table to use instead of the built-in one (YAML)
    #[arg(long)]
    images: Option<PathBuf>,

    /// Write the plan to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn execute(root: &Path, args: PlanArgs) -> Result<()> {
    let loader = EnvironmentLoader::new(root);
    let env = loader
        .load(&args.env)
        .with_context(|| format!("Failed to load environment {}", args.env))?;
    let layout = loader.layout(&args.env)?;

    let table = load_image_table(args.images.as_deref())?;

    let plan = InfraPlan::build(&env, &layout, &AmiResolver::new(&table))
        .context("Failed to build infrastructure plan")?;
    let json = plan.to_json()?;

    match args.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Plan for {} written to {:?}", env.name, path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
