// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! Agent registration commands
//!
//! Commands: register, list

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::sync::Arc;

use laissez_core::application::{AgentRegistrationService, RegistrationError};
use laissez_core::domain::portal::AgentRecord;
use laissez_core::domain::price::Price;
use laissez_core::domain::session::AuthSession;

use crate::console::{spinner, ConsoleNotifier};
use crate::context::{GlobalOptions, PortalContext};

#[derive(Subcommand)]
pub enum AgentCommand {
    /// Register an agent endpoint with a per-request price
    Register(RegisterArgs),

    /// List your registered agents
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Agent base URL
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Telegram bot token
    #[arg(long, env = "LAISSEZ_BOT_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Price per request in USD (minimum 0.001)
    #[arg(long, value_name = "PRICE")]
    pub price: Option<String>,

    /// Raise the price by N steps of 0.001
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub increment: u32,

    /// Lower the price by N steps of 0.001, stopping at the minimum
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub decrement: u32,
}

pub async fn handle_command(command: AgentCommand, options: &GlobalOptions) -> Result<()> {
    let ctx = PortalContext::load(options)?;
    match command {
        AgentCommand::Register(args) => register(args, &ctx).await,
        AgentCommand::List { json } => list(&ctx, json).await,
    }
}

pub async fn register(args: RegisterArgs, ctx: &PortalContext) -> Result<()> {
    let service = AgentRegistrationService::new(
        ctx.client.clone(),
        ctx.session.clone(),
        Arc::new(ConsoleNotifier),
    );

    service.set_url(args.url.trim());
    service.set_bot_token(args.bot_token.trim());
    if let Some(price) = &args.price {
        if !service.set_price_input(price) {
            bail!("Price must be a number of at least {}", Price::MIN);
        }
    }
    for _ in 0..args.increment {
        service.increment_price();
    }
    for _ in 0..args.decrement {
        if !service.decrement_price() {
            println!("{}", format!("Price is already at the minimum of {}", Price::MIN).yellow());
            break;
        }
    }

    let form = service.form();
    println!(
        "Registering agent {} at {} per request",
        form.url.bold(),
        form.price.to_string().bold()
    );

    let pb = spinner("Saving agent configuration...")?;
    let result = service.submit().await;
    pb.finish_and_clear();

    match result {
        Ok(response) => {
            if let Some(webhook) = response.webhook_url() {
                println!("  Webhook: {}", webhook);
            }
            Ok(())
        }
        Err(RegistrationError::Invalid(e)) => {
            Err(anyhow::Error::new(e).context("Invalid agent configuration"))
        }
        Err(e) => Err(anyhow::Error::new(e).context("Agent registration failed")),
    }
}

pub async fn list(ctx: &PortalContext, json: bool) -> Result<()> {
    let token = ctx
        .session
        .get_access_token()
        .await
        .context("Failed to read access token")?;

    let pb = spinner("Fetching agents...")?;
    let result = ctx.client.list_agents(token.as_deref()).await;
    pb.finish_and_clear();
    let agents = result.context("Failed to list agents")?.data;

    if json {
        println!("{}", serde_json::to_string_pretty(&agents)?);
        return Ok(());
    }

    if agents.is_empty() {
        println!("{}", "No agents found".yellow());
        return Ok(());
    }

    println!("{} agents found:", agents.len());
    println!("{:<8} {:<40} {:<10} {:<14} {}", "ID", "URL", "PRICE", "BOT TOKEN", "CREATED");
    for agent in &agents {
        print_agent(agent);
    }

    Ok(())
}

fn print_agent(agent: &AgentRecord) {
    let id = agent.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    let price = Price::from_dollars(agent.price)
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("${}", agent.price));
    println!(
        "{:<8} {:<40} {:<10} {:<14} {}",
        id,
        agent.url.bold(),
        price,
        mask_secret(&agent.bot_token),
        agent.created_at.as_deref().unwrap_or("-")
    );
}

/// Keep only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
