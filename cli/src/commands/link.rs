// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! Account linking command
//!
//! Exchanges a single-use link code for a platform account link. The code
//! comes from the link URL the messaging platform handed out, from
//! `--code`, or from a code remembered earlier in this login session.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::warn;
use url::Url;

use laissez_core::application::{LinkAccountFlow, LinkDependencies, LinkSettings};
use laissez_core::domain::link::{LinkCode, LinkStatus};
use laissez_core::domain::notification::{Notification, Notifier};
use laissez_core::domain::session::{AuthSession, LoginMethod};

use crate::console::{prompt_link_code, status_line, ConsoleNavigator, ConsoleNotifier};
use crate::context::{GlobalOptions, PortalContext};

#[derive(Args, Debug, Clone, Default)]
pub struct LinkArgs {
    /// Link URL received from the messaging platform (its `code` query
    /// parameter is used)
    #[arg(long, value_name = "URL")]
    pub link_url: Option<String>,

    /// Link code entered by hand
    #[arg(long, value_name = "CODE")]
    pub code: Option<String>,

    /// Never prompt; fail instead
    #[arg(long)]
    pub no_input: bool,
}

pub async fn handle_command(args: LinkArgs, options: &GlobalOptions) -> Result<()> {
    let ctx = PortalContext::load(options)?;
    run(args, &ctx).await
}

pub async fn run(args: LinkArgs, ctx: &PortalContext) -> Result<()> {
    let query_code = match &args.link_url {
        Some(raw) => {
            let link = Url::parse(raw).with_context(|| format!("Invalid link URL: {}", raw))?;
            let code = LinkCode::from_link_url(&link);
            if code.is_none() {
                warn!("Link URL has no code parameter");
            }
            code
        }
        None => None,
    };

    let deps = LinkDependencies {
        session: ctx.session.clone(),
        api: ctx.client.clone(),
        store: Arc::new(ctx.link_code_store()),
        notifier: Arc::new(ConsoleNotifier),
        navigator: Arc::new(ConsoleNavigator),
    };
    let settings = LinkSettings {
        login_method: ctx
            .config
            .spec
            .auth
            .login_methods
            .first()
            .copied()
            .unwrap_or(LoginMethod::Google),
        ..LinkSettings::from(&ctx.config.spec.link)
    };

    let mut flow = LinkAccountFlow::new(deps, settings, query_code);
    if let Some(code) = &args.code {
        flow.set_manual_code(code);
    }

    let interactive = !args.no_input && std::io::stdin().is_terminal();
    let mut status = flow.evaluate().await;

    if status == LinkStatus::MissingCode && interactive {
        println!("{}", status_line(status));
        if let Some(code) = prompt_link_code()? {
            flow.set_manual_code(&code);
            status = flow.evaluate().await;
        }
    }

    if status == LinkStatus::Idle && !ctx.session.is_authenticated() {
        if !interactive {
            bail!("Not signed in. Set LAISSEZ_ACCESS_TOKEN or run interactively to log in.");
        }
        ConsoleNotifier.notify(
            Notification::info("Sign in to link your account")
                .with_description(LinkStatus::LoggingIn.description()),
        );
        status = match flow.login().await {
            Ok(status) => status,
            Err(_) => flow.status(),
        };
    }

    println!("{}", status_line(status));
    match status {
        LinkStatus::Success => {
            flow.wait_for_redirect().await;
            Ok(())
        }
        LinkStatus::MissingCode => bail!("No pending link code"),
        LinkStatus::Error => bail!("Account link failed"),
        other => bail!("Account link did not complete (status: {})", other),
    }
}
