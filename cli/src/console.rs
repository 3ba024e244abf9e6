// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! Terminal adapters for the portal ports.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use laissez_core::domain::link::{LinkStatus, Navigator};
use laissez_core::domain::notification::{Notification, NotificationLevel, Notifier};
use laissez_core::domain::session::LoginMethod;
use laissez_core::infrastructure::{TokenPrompt, TracingNotifier};

/// Prints notifications as coloured lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        TracingNotifier.notify(notification.clone());
        let line = match notification.level {
            NotificationLevel::Success => format!("✓ {}", notification.title).green(),
            NotificationLevel::Error => format!("✗ {}", notification.title).red(),
            NotificationLevel::Info => notification.title.normal(),
        };
        println!("{}", line.bold());
        if let Some(description) = &notification.description {
            println!("  {}", description);
        }
    }
}

/// There is no page to leave in a terminal, so navigation is announced.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "Redirect");
        println!("{}", format!("Returning to {}", route).dimmed());
    }
}

/// Asks the user to paste an access token obtained from the web portal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerTokenPrompt;

impl TokenPrompt for DialoguerTokenPrompt {
    fn prompt(&self, method: LoginMethod) -> Result<String> {
        println!(
            "Sign in with {} in the Laissez web portal, then paste your access token.",
            method.to_string().bold()
        );
        let token = Password::new()
            .with_prompt("Access token")
            .allow_empty_password(true)
            .interact()?;
        Ok(token)
    }
}

/// Ask for a link code. Blank input yields `None`.
pub fn prompt_link_code() -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt("Link code")
        .allow_empty(true)
        .interact_text()?;
    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// One line describing a link status, coloured by outcome.
pub fn status_line(status: LinkStatus) -> String {
    let text = status.description();
    match status {
        LinkStatus::Success => text.green().to_string(),
        LinkStatus::Error => text.red().to_string(),
        LinkStatus::MissingCode => text.yellow().to_string(),
        _ => text.dimmed().to_string(),
    }
}
