//! Validate command - Validate an environment's definitions.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use range_spec::{EnvironmentLoader, EnvironmentValidator};

use super::ValidationFailed;

#[derive(Args)]
pub struct ValidateArgs {
    /// Name of the environment to validate
    env: String,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

pub fn execute(root: &Path, args: ValidateArgs) -> Result<()> {
    info!("Validating environment: {}", args.env);

    let loader = EnvironmentLoader::new(root);
    let env = loader
        .load(&args.env)
        .with_context(|| format!("Failed to load environment {}", args.env))?;
    let layout = loader.layout(&args.env)?;

    let result = EnvironmentValidator::validate(&env, &layout);

    for error in &result.errors {
        println!("   ❌ {}", error);
    }
    for warning in &result.warnings {
        println!("   ⚠️  {}", warning);
    }

    if !result.passes(args.strict) {
        return Err(ValidationFailed(format!(
            "{} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        ))
        .into());
    }

    println!("✅ Environment {} is valid", env.name);
    Ok(())
}
