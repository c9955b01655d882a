//! ranger CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Environment or definition not found
//! - 3: Validation failure
//! - 4: Template error
//! - 5: IaC error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use range_iac::IacError;
use range_spec::SpecError;
use range_templates::TemplateError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const NOT_FOUND: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
    pub const IAC_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over the flags
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,range={}", level)));
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let root = cli.root.clone();
    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&root, args),
        Commands::Show(args) => commands::show::execute(&root, args),
        Commands::Validate(args) => commands::validate::execute(&root, args),
        Commands::Ports(args) => commands::ports::execute(&root, args),
        Commands::Plan(args) => commands::plan::execute(&root, args),
        Commands::CreateNetwork(args) => commands::create::execute_network(&root, args),
        Commands::CreateHost(args) => commands::create::execute_host(&root, args),
        Commands::Ami(args) => commands::ami::execute(&root, args),
        Commands::Password(args) => commands::password::execute(&root, args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<SpecError>() {
            return match err {
                SpecError::NotFound(_) | SpecError::InvalidName(_) => ExitCodes::NOT_FOUND,
                _ => ExitCodes::VALIDATION_FAILURE,
            };
        }
        if cause.downcast_ref::<TemplateError>().is_some() {
            return ExitCodes::TEMPLATE_ERROR;
        }
        if cause.downcast_ref::<IacError>().is_some() {
            return ExitCodes::IAC_ERROR;
        }
        if cause.downcast_ref::<commands::ValidationFailed>().is_some() {
            return ExitCodes::VALIDATION_FAILURE;
        }
    }
    ExitCodes::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_categorize_error() {
        let not_found = anyhow::Error::from(SpecError::NotFound(PathBuf::from("environments/x")))
            .context("Failed to load environment x");
        assert_eq!(categorize_error(&not_found), ExitCodes::NOT_FOUND);

        let exists = anyhow::Error::from(TemplateError::AlreadyExists {
            kind: "host",
            name: "web".to_string(),
        });
        assert_eq!(categorize_error(&exists), ExitCodes::TEMPLATE_ERROR);

        let failed = anyhow::Error::from(commands::ValidationFailed("1 errors".to_string()));
        assert_eq!(categorize_error(&failed), ExitCodes::VALIDATION_FAILURE);

        assert_eq!(categorize_error(&anyhow::anyhow!("boom")), ExitCodes::GENERAL_ERROR);
    }
}
