// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! # Laissez Portal CLI
//!
//! The `laissez` binary is the terminal front end of the Laissez portal.
//!
//! ## Commands
//!
//! - `laissez agent register|list` - Register a paid agent, list your agents
//! - `laissez link` - Link a messaging account using a link code
//! - `laissez health` - Check the backend is reachable
//! - `laissez whoami` - Show the signed-in identity
//! - `laissez config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use laissez_portal::commands::{self, AgentCommand, ConfigCommand, LinkArgs, WhoamiArgs};
use laissez_portal::context::GlobalOptions;

/// Laissez Portal - Monetize agents and link messaging accounts
#[derive(Parser)]
#[command(name = "laissez")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "LAISSEZ_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, global = true, env = "LAISSEZ_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LAISSEZ_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Agent registration
    #[command(name = "agent")]
    Agent {
        #[command(subcommand)]
        command: AgentCommand,
    },

    /// Link a messaging account to your Laissez account
    #[command(name = "link")]
    Link(LinkArgs),

    /// Check backend health
    #[command(name = "health")]
    Health,

    /// Show the signed-in identity
    #[command(name = "whoami")]
    Whoami(WhoamiArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let options = GlobalOptions {
        config_path: cli.config,
        api_url: cli.api_url,
    };

    match cli.command {
        Some(Commands::Agent { command }) => commands::agent::handle_command(command, &options).await,
        Some(Commands::Link(args)) => commands::link::handle_command(args, &options).await,
        Some(Commands::Health) => commands::health::handle_command(&options).await,
        Some(Commands::Whoami(args)) => commands::whoami::handle_command(args, &options).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, options.config_path).await
        }
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    Ok(())
}
