//! Password command - Print the password of a pod.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;

use range_spec::EnvironmentLoader;

#[derive(Args)]
pub struct PasswordArgs {
    /// Name of the environment
    env: String,

    /// Pod offset (0-based); all pods when omitted
    pod: Option<i64>,
}

pub fn execute(root: &Path, args: PasswordArgs) -> Result<()> {
    let env = EnvironmentLoader::new(root)
        .load(&args.env)
        .with_context(|| format!("Failed to load environment {}", args.env))?;
    let namer = env.pod_namer();

    match args.pod {
        Some(pod) if !env.pod_offsets().contains(&pod) => {
            bail!("Pod {} is out of range for {} ({} pods)", pod, env.name, env.pod_count)
        }
        Some(pod) => println!("{}", namer.pod_password(pod)),
        None => {
            for pod in env.pod_offsets() {
                println!("{}\t{}", namer.suffix(pod), namer.pod_password(pod));
            }
        }
    }
    Ok(())
}
