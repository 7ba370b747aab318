use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portal_core::config::DEFAULT_LOG_LEVEL;
use portal_core::guard::RouteAccess;
use portal_infrastructure::{ConfigService, PortalPaths};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;
mod logging;
mod output;

use commands::catalog::CatalogCommand;
use commands::config::ConfigCommand;
use commands::session::PasswordArgs;
use context::{AppContext, ContextOptions};

#[derive(Parser)]
#[command(name = "studyportal")]
#[command(about = "StudyPortal CLI - exam and placement preparation portal client", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overriding config and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Keep credentials in memory only
    #[arg(long, global = true)]
    no_persist: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[command(flatten)]
        password: PasswordArgs,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[command(flatten)]
        password: PasswordArgs,
    },
    /// End the current session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show session and configuration status
    Status,
    /// Show how a view of the given access class would route
    Guard {
        /// protected | public-only | open
        access: RouteAccess,
    },
    /// Browse the study catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            output::error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let paths = PortalPaths::default();
    let service = match &cli.config {
        Some(path) => ConfigService::with_file(paths, path.clone()),
        None => ConfigService::new(paths)?,
    };

    let config = match service.load() {
        Ok(config) => config,
        Err(err) => {
            logging::init(DEFAULT_LOG_LEVEL);
            return Err(err).with_context(|| {
                format!("Failed to load {}", service.config_path().display())
            });
        }
    };

    logging::init(if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    });

    let command = match cli.command {
        Commands::Config { command } => {
            return commands::config::run(&service, &config, command, cli.json);
        }
        other => other,
    };

    let options = ContextOptions {
        base_url: cli.base_url,
        ephemeral: cli.no_persist,
    };
    let ctx = AppContext::open(&service, config, &options).await?;

    let result = match command {
        Commands::Login { email, password } => {
            commands::session::login(&ctx, &email, password, cli.json).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::session::register(&ctx, &name, &email, password, cli.json).await,
        Commands::Logout => commands::session::logout(&ctx, cli.json).await,
        Commands::Whoami => commands::session::whoami(&ctx, cli.json),
        Commands::Status => commands::session::status(&ctx, cli.json),
        Commands::Guard { access } => commands::guard::run(&ctx, access, cli.json),
        Commands::Catalog { command } => commands::catalog::run(&ctx, command, cli.json).await,
        Commands::Config { .. } => Ok(ExitCode::SUCCESS),
    };

    ctx.close().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_catalog_filters() {
        let cli = Cli::try_parse_from([
            "studyportal",
            "catalog",
            "questions",
            "dsa",
            "arrays",
            "--difficulty",
            "HARD",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Catalog {
                command: CatalogCommand::Questions { difficulty, search, .. },
            } => {
                assert_eq!(
                    difficulty,
                    portal_core::catalog::Selection::Only(portal_core::catalog::Difficulty::Hard)
                );
                assert!(search.is_empty());
            }
            _ => panic!("expected catalog questions"),
        }
    }

    #[test]
    fn password_flags_are_mutually_exclusive() {
        let cli = Cli::try_parse_from([
            "studyportal",
            "login",
            "--email",
            "a@b.com",
            "--password-stdin",
        ])
        .unwrap();
        match cli.command {
            Commands::Login { password, .. } => {
                assert!(password.password.is_none());
                assert!(password.password_stdin);
            }
            _ => panic!("expected login"),
        }

        assert!(
            Cli::try_parse_from([
                "studyportal",
                "login",
                "--email",
                "a@b.com",
                "--password",
                "pw",
                "--password-stdin",
            ])
            .is_err()
        );
    }

    #[test]
    fn parses_guard_access_class() {
        let cli = Cli::try_parse_from(["studyportal", "guard", "public-only"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Guard {
                access: RouteAccess::PublicOnly
            }
        ));

        assert!(Cli::try_parse_from(["studyportal", "guard", "admin"]).is_err());
    }
}
