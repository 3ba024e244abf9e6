// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::{Path, PathBuf};

use laissez_core::domain::portal_config::PortalConfigManifest;

pub const MINIMAL_TEMPLATE: &str = include_str!("../../templates/config-minimal.yaml");
pub const EXAMPLES_TEMPLATE: &str = include_str!("../../templates/config-with-examples.yaml");

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path (default: ./laissez-config.yaml)
        #[arg(short, long, default_value = "./laissez-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,
    },
}

pub async fn handle_command(
    command: ConfigCommand,
    config_override: Option<PathBuf>,
) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths).await,
        ConfigCommand::Validate { file } => validate(file.or(config_override)).await,
        ConfigCommand::Generate { output, examples } => generate(&output, examples).await,
    }
}

async fn show(config_override: Option<PathBuf>, show_paths: bool) -> Result<()> {
    let config = PortalConfigManifest::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. LAISSEZ_CONFIG_PATH: {}",
            std::env::var("LAISSEZ_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./laissez-config.yaml");
        println!("  4. ~/.laissez/config.yaml");
        println!("  5. /etc/laissez/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!("  Name: {}", config.metadata.name);
    println!();

    println!("{}", "API:".bold());
    println!("  Base URL: {}", config.spec.api.base_url);
    match config.spec.api.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: {}", "(none)".dimmed()),
    }
    println!();

    println!("{}", "Auth:".bold());
    println!(
        "  App ID: {}",
        config.spec.auth.app_id.as_deref().unwrap_or("(not set)")
    );
    let token_state = if config.spec.auth.resolved_access_token().is_some() {
        "configured".green()
    } else {
        "(not set)".dimmed()
    };
    println!("  Access token: {}", token_state);
    let methods: Vec<String> = config
        .spec
        .auth
        .login_methods
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("  Login methods: {}", methods.join(", "));
    println!();

    println!("{}", "Link:".bold());
    println!("  Redirect delay: {}ms", config.spec.link.redirect_delay_ms);
    println!("  Home route: {}", config.spec.link.home_route);
    if let Some(dir) = &config.spec.link.storage_dir {
        println!("  Storage dir: {}", dir.display());
    }
    println!();

    Ok(())
}

async fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = PortalConfigManifest::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}

pub async fn generate(output: &Path, with_examples: bool) -> Result<()> {
    let sample = if with_examples {
        EXAMPLES_TEMPLATE
    } else {
        MINIMAL_TEMPLATE
    };

    std::fs::write(output, sample)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!(
        "{}",
        format!("✓ Configuration generated: {}", output.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_valid() {
        for template in [MINIMAL_TEMPLATE, EXAMPLES_TEMPLATE] {
            let config = PortalConfigManifest::from_yaml_str(template).unwrap();
            config.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn test_generate_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("laissez-config.yaml");

        generate(&output, true).await.unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, EXAMPLES_TEMPLATE);
    }
}
