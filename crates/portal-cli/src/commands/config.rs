//! `config show|init|path`.

use crate::output;
use anyhow::{Context, Result};
use clap::Subcommand;
use portal_core::config::PortalConfig;
use portal_infrastructure::ConfigService;
use std::process::ExitCode;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file plus environment)
    Show,
    /// Write a default config file if none exists
    Init,
    /// Print the config file location
    Path,
}

pub fn run(
    service: &ConfigService,
    effective: &PortalConfig,
    command: ConfigCommand,
    json: bool,
) -> Result<ExitCode> {
    match command {
        ConfigCommand::Show => {
            if json {
                output::json(effective)?;
            } else {
                let rendered =
                    toml::to_string_pretty(effective).context("Failed to render configuration")?;
                print!("{}", rendered);
            }
        }
        ConfigCommand::Init => {
            let path = service.config_path();
            if service.init()? {
                output::success(&format!("Wrote {}", path.display()));
            } else {
                output::info(&format!("{} already exists", path.display()));
            }
        }
        ConfigCommand::Path => println!("{}", service.config_path().display()),
    }
    Ok(ExitCode::SUCCESS)
}
