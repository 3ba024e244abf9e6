// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;

use laissez_core::domain::dashboard::{DashboardView, DeveloperTab};
use laissez_core::domain::session::AuthSession;

use crate::context::{GlobalOptions, PortalContext};

#[derive(Args, Debug, Clone, Default)]
pub struct WhoamiArgs {
    /// Show the developer dashboard view
    #[arg(long)]
    pub developer: bool,

    /// Developer dashboard tab
    #[arg(long, value_enum, requires = "developer")]
    pub tab: Option<TabArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Transactions,
    Agents,
}

impl From<TabArg> for DeveloperTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Transactions => DeveloperTab::Transactions,
            TabArg::Agents => DeveloperTab::Agents,
        }
    }
}

impl WhoamiArgs {
    pub fn view(&self) -> DashboardView {
        let view = DashboardView::default();
        match (self.developer, self.tab) {
            (true, Some(tab)) => view.with_tab(tab.into()),
            (true, None) => view.developer(),
            (false, _) => view.user(),
        }
    }
}

pub async fn handle_command(args: WhoamiArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = PortalContext::load(options)?;

    let Some(profile) = ctx.session.get_session() else {
        if ctx.session.is_authenticated() {
            println!("{}", "Signed in with an opaque access token".yellow());
        } else {
            println!("{}", "Not signed in".yellow());
            println!("Set LAISSEZ_ACCESS_TOKEN or auth.access_token in the configuration.");
        }
        return Ok(());
    };

    println!("{}", profile.display_name().bold());
    println!("  ID: {}", profile.id);
    if let Some(email) = &profile.email {
        println!("  Email: {}", email);
    }
    if let Some(wallet) = &profile.wallet_address {
        println!("  Wallet: {}", wallet);
    }

    let view = args.view();
    println!();
    println!("{}", "Dashboard:".bold());
    println!("  Headline: {}", view.headline());
    if let Some(tab) = view.tab() {
        println!("  Tab: {:?}", tab);
    }

    Ok(())
}
