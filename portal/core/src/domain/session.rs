// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Authenticated Session Capability
//!
//! The identity provider (credential issuance, login redirects, token
//! refresh) is an external collaborator. The portal only needs a narrow,
//! read-mostly view of it, expressed by [`AuthSession`]. Services receive
//! the session as an `Arc<dyn AuthSession>` rather than reaching for
//! ambient state, so tests can script readiness, login outcomes and tokens.
//!
//! Implementations live in [`crate::infrastructure::session`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Login methods offered by the identity provider. The platform enables
/// Google only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Google,
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginMethod::Google => f.write_str("google"),
        }
    }
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider-scoped user id (JWT `sub`).
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            wallet_address: None,
        }
    }

    /// Email, then wallet address, then the raw id.
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .or(self.wallet_address.as_deref())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Authentication is not ready yet")]
    NotReady,

    #[error("{0}")]
    LoginFailed(String),

    #[error("Could not obtain access token: {0}")]
    Token(String),
}

/// Injectable view of the identity provider session.
#[async_trait]
pub trait AuthSession: Send + Sync {
    /// Whether the provider has finished initialising. Before this, neither
    /// `is_authenticated` nor an absent code means anything.
    fn is_ready(&self) -> bool;

    fn is_authenticated(&self) -> bool;

    /// Current user, when authenticated.
    fn get_session(&self) -> Option<UserProfile>;

    /// Short-lived bearer token. `Ok(None)` means the provider has no token
    /// to give (e.g. the session lapsed).
    async fn get_access_token(&self) -> Result<Option<String>, SessionError>;

    /// Start an interactive login.
    async fn login(&self, method: LoginMethod) -> Result<(), SessionError>;

    async fn logout(&self) -> Result<(), SessionError>;
}
