// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Configuration Form
//!
//! [`AgentForm`] is the editable, unvalidated state behind the agent
//! registration form: raw URL text, raw bot token and a [`Price`].
//! [`AgentForm::validate`] enforces the same constraints a browser applies
//! to `required` / `type=url` / `min` inputs and yields an [`AgentConfig`]
//! that is safe to submit.
//!
//! ## Invariants
//!
//! - `AgentForm::default()` is the reset state: empty URL, empty token,
//!   price $0.001.
//! - An `AgentConfig` always carries an absolute URL and a non-empty token.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::domain::price::Price;

/// Editable form state. Fields are raw user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentForm {
    pub url: String,
    pub bot_token: String,
    pub price: Price,
}

/// A validated agent configuration, ready for submission. `url` is the
/// entered text, trimmed; it has been checked to parse as a URL but is
/// not rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub url: String,
    pub bot_token: String,
    pub price: Price,
}

/// Client-side constraint violations. A form in this state is never sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Agent URL is required")]
    MissingUrl,

    #[error("Agent URL is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("Telegram bot token is required")]
    MissingBotToken,
}

impl AgentForm {
    pub fn new(url: impl Into<String>, bot_token: impl Into<String>, price: Price) -> Self {
        Self {
            url: url.into(),
            bot_token: bot_token.into(),
            price,
        }
    }

    /// Apply direct numeric entry to the price. Rejected input leaves the
    /// previous price untouched and returns `false`.
    pub fn set_price_input(&mut self, input: &str) -> bool {
        match Price::parse(input) {
            Some(price) => {
                self.price = price;
                true
            }
            None => false,
        }
    }

    pub fn increment_price(&mut self) {
        self.price = self.price.incremented();
    }

    /// Returns `false` (and does nothing) at the $0.001 floor.
    pub fn decrement_price(&mut self) -> bool {
        match self.price.decremented() {
            Some(price) => {
                self.price = price;
                true
            }
            None => false,
        }
    }

    pub fn can_decrement(&self) -> bool {
        self.price.can_decrement()
    }

    /// Check required / URL / token constraints.
    pub fn validate(&self) -> Result<AgentConfig, FormError> {
        // `required` treats whitespace-only input as present, but a URL
        // input never accepts it.
        let raw_url = self.url.trim();
        if raw_url.is_empty() {
            return Err(FormError::MissingUrl);
        }
        Url::parse(raw_url).map_err(|e| FormError::InvalidUrl(e.to_string()))?;

        if self.bot_token.is_empty() {
            return Err(FormError::MissingBotToken);
        }

        Ok(AgentConfig {
            url: raw_url.to_string(),
            bot_token: self.bot_token.clone(),
            price: self.price,
        })
    }
}
