// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Account Link Session
//!
//! A *link code* is an opaque single-use token minted by an external
//! platform (e.g. a Telegram bot) so that the platform account can be tied
//! to a Laissez identity. The portal exchanges it exactly once through
//! `POST /api/link/complete`.
//!
//! ## Status Lifecycle
//!
//! ```text
//! Idle ──login()──▶ LoggingIn ──(authenticated)──▶ Linking ──▶ Success
//!   │                   │                             │
//!   │                   └──(login failed)──▶ Error ◀──┘ (rejected / no token)
//!   └──(ready, no code)──▶ MissingCode
//! ```
//!
//! ## Code Resolution
//!
//! A code can arrive three ways and is resolved in this order:
//! 1. the `code` query parameter of the link URL,
//! 2. a code the user pasted manually,
//! 3. the code remembered in session-scoped storage under
//!    [`LINK_CODE_STORAGE_KEY`] from an earlier visit in the same session.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

use crate::domain::portal::ApiError;
use crate::domain::session::SessionError;

/// Session storage key for the most recently seen link code.
pub const LINK_CODE_STORAGE_KEY: &str = "laissez_link_code";

/// Non-empty, trimmed opaque link code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LinkCode(String);

impl LinkCode {
    /// Trim and wrap `raw`. Blank input is not a code.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Extract the `code` query parameter from a link URL.
    pub fn from_link_url(link: &Url) -> Option<Self> {
        link.query_pairs()
            .find(|(key, _)| key == "code")
            .and_then(|(_, value)| Self::parse(&value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LinkCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LinkCode::parse(&value).ok_or_else(|| "link code cannot be empty".to_string())
    }
}

impl From<LinkCode> for String {
    fn from(code: LinkCode) -> Self {
        code.0
    }
}

/// Pick the effective code: query beats manual beats stored.
pub fn resolve_code(
    query: Option<&LinkCode>,
    manual: Option<&LinkCode>,
    stored: Option<LinkCode>,
) -> Option<LinkCode> {
    query.or(manual).cloned().or(stored)
}

/// Where the link flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkStatus {
    Idle,
    LoggingIn,
    Linking,
    Success,
    MissingCode,
    Error,
}

impl LinkStatus {
    /// User-facing status line.
    pub fn description(&self) -> &'static str {
        match self {
            LinkStatus::Idle => "Ready to link your account.",
            LinkStatus::LoggingIn => "Redirecting to Google...",
            LinkStatus::Linking => "Completing link...",
            LinkStatus::Success => "All set! Your account has been linked.",
            LinkStatus::MissingCode => {
                "No pending link code was found. Please start the linking flow from the originating platform."
            }
            LinkStatus::Error => "We could not complete the link. Please try again.",
        }
    }

    /// `Success` is final for the page; `MissingCode` and `Error` wait for
    /// the user to supply a code or retry.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LinkStatus::Success | LinkStatus::MissingCode | LinkStatus::Error
        )
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkStatus::Idle => "idle",
            LinkStatus::LoggingIn => "loggingIn",
            LinkStatus::Linking => "linking",
            LinkStatus::Success => "success",
            LinkStatus::MissingCode => "missingCode",
            LinkStatus::Error => "error",
        };
        f.write_str(name)
    }
}

/// Session-scoped storage for the pending link code. Survives the login
/// round-trip but not the end of the user session.
pub trait LinkCodeStore: Send + Sync {
    fn load(&self) -> Option<LinkCode>;

    fn save(&self, code: &LinkCode) -> std::io::Result<()>;

    fn clear(&self) -> std::io::Result<()>;
}

/// Port for leaving the link page once linking is done.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Why a link attempt did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("No pending link code")]
    MissingCode,

    #[error("Missing access token")]
    MissingToken,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LinkError {
    /// Text shown under the "Unable to complete link" notification.
    pub fn user_message(&self) -> String {
        match self {
            LinkError::Api(api) => api
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| "Failed to complete account link".to_string()),
            other => other.to_string(),
        }
    }

    /// Missing code or token: not transient, needs user action.
    pub fn is_precondition(&self) -> bool {
        matches!(self, LinkError::MissingCode | LinkError::MissingToken)
    }
}
