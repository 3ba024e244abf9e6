// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use colored::Colorize;

use crate::console::spinner;
use crate::context::{GlobalOptions, PortalContext};

pub async fn handle_command(options: &GlobalOptions) -> Result<()> {
    let ctx = PortalContext::load(options)?;
    check(&ctx).await
}

pub async fn check(ctx: &PortalContext) -> Result<()> {
    let base_url = ctx.client.base_url().to_string();
    let pb = spinner(format!("Contacting {}...", base_url))?;
    let result = ctx.client.health().await;
    pb.finish_and_clear();

    let health = result.with_context(|| format!("Backend at {} is not healthy", base_url))?;
    println!(
        "{}",
        format!("✓ {} is {} ({})", health.service, health.status, base_url).green()
    );
    Ok(())
}
