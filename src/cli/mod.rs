//! Command-line front end
//!
//! - Argument parsing with clap
//! - Configuration loading with CLI overrides
//! - Command dispatch to the actions

pub mod executor;
pub mod parser;

pub use executor::execute_command;
pub use parser::{Cli, Commands};

use anyhow::Context;

use crate::actions::Actions;
use crate::config::{ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load settings, start logging, and run the selected command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(&cli)?;

    init_logger(&settings.logger).context("Failed to initialize logging")?;
    tracing::debug!(base_url = %settings.api.base_url, "Configuration loaded");

    let actions = Actions::from_settings(&settings).context("Failed to set up API client")?;
    execute_command(&cli.command, &actions).await
}

/// Read configuration and fold in the command-line overrides.
///
/// `--config` must point at an existing file. Without it the layered
/// directory is used, falling back to built-in defaults when it is absent.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => ConfigLoader::from_file(path).load(),
        None => ConfigLoader::new().and_then(|loader| loader.load_or_default()),
    }
    .context("Failed to load configuration")?;

    if let Some(base_url) = &cli.base_url {
        settings.api.base_url = base_url.clone();
    }
    if cli.no_cache {
        settings.cache.enabled = false;
    }
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    settings
        .validate()
        .context("Invalid configuration after applying command-line options")?;
    Ok(settings)
}
