//! List command - Show the environments below the root.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use range_spec::EnvironmentLoader;

#[derive(Args)]
pub struct ListArgs {}

pub fn execute(root: &Path, _args: ListArgs) -> Result<()> {
    let names = EnvironmentLoader::new(root).list()?;
    if names.is_empty() {
        println!("No environments under {}", root.display());
        return Ok(());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
