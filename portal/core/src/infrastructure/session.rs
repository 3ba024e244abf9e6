// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Bearer Token Session
//!
//! [`AuthSession`] adapter for hosts that obtain the identity provider's
//! access token out of band: from configuration, from the environment, or
//! pasted by the user at a login prompt.
//!
//! Tokens issued by the provider are JWTs. The payload is decoded
//! **without** signature verification, only to show who is signed in, to
//! notice an expired token before the backend does, and to warn when the
//! token was minted for a different application id. The backend remains
//! the authority on token validity.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::domain::session::{AuthSession, LoginMethod, SessionError, UserProfile};

/// Interactive source of a fresh access token.
pub trait TokenPrompt: Send + Sync {
    fn prompt(&self, method: LoginMethod) -> anyhow::Result<String>;
}

/// Unverified JWT payload fields the portal looks at.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,

    #[serde(default)]
    pub aud: Option<Audience>,

    #[serde(default)]
    pub exp: Option<u64>,

    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, app_id: &str) -> bool {
        match self {
            Audience::One(aud) => aud == app_id,
            Audience::Many(auds) => auds.iter().any(|aud| aud == app_id),
        }
    }
}

impl TokenClaims {
    /// Decode the payload segment of a compact JWT. Opaque tokens yield
    /// `None`.
    pub fn decode_unverified(token: &str) -> Option<Self> {
        let mut segments = token.split('.');
        let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

pub struct BearerTokenSession {
    token: RwLock<Option<String>>,
    prompt: Option<Arc<dyn TokenPrompt>>,
    app_id: Option<String>,
}

impl BearerTokenSession {
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            token: RwLock::new(token),
            prompt: None,
            app_id: None,
        }
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn TokenPrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Application id tokens are expected to be issued for.
    pub fn with_app_id(mut self, app_id: Option<String>) -> Self {
        self.app_id = app_id.filter(|id| !id.trim().is_empty());
        if let Some(token) = self.token.read().as_deref() {
            self.check_audience(token);
        }
        self
    }

    fn claims(&self) -> Option<TokenClaims> {
        self.token.read().as_deref().and_then(TokenClaims::decode_unverified)
    }

    fn check_audience(&self, token: &str) {
        let (Some(app_id), Some(claims)) = (self.app_id.as_deref(), TokenClaims::decode_unverified(token))
        else {
            return;
        };
        if let Some(aud) = &claims.aud {
            if !aud.contains(app_id) {
                warn!("Access token was not issued for app id {}", app_id);
            }
        }
    }

    fn has_live_token(&self) -> bool {
        let guard = self.token.read();
        match guard.as_deref() {
            None => false,
            Some(token) => !TokenClaims::decode_unverified(token)
                .is_some_and(|claims| claims.is_expired_at(now_secs())),
        }
    }
}

#[async_trait]
impl AuthSession for BearerTokenSession {
    fn is_ready(&self) -> bool {
        true
    }

    fn is_authenticated(&self) -> bool {
        self.has_live_token()
    }

    fn get_session(&self) -> Option<UserProfile> {
        if !self.has_live_token() {
            return None;
        }
        let claims = self.claims()?;
        let mut profile = UserProfile::new(claims.sub?);
        profile.email = claims.email;
        Some(profile)
    }

    async fn get_access_token(&self) -> Result<Option<String>, SessionError> {
        if self.token.read().is_some() && !self.has_live_token() {
            return Err(SessionError::Token("The access token has expired".to_string()));
        }
        Ok(self.token.read().clone())
    }

    async fn login(&self, method: LoginMethod) -> Result<(), SessionError> {
        let prompt = self
            .prompt
            .clone()
            .ok_or_else(|| SessionError::LoginFailed("Interactive login is not available".to_string()))?;

        let entered = tokio::task::spawn_blocking(move || prompt.prompt(method))
            .await
            .map_err(|e| SessionError::LoginFailed(e.to_string()))?
            .map_err(|e| SessionError::LoginFailed(e.to_string()))?;

        let token = entered.trim().to_string();
        if token.is_empty() {
            return Err(SessionError::LoginFailed("No access token was provided".to_string()));
        }
        if TokenClaims::decode_unverified(&token).is_some_and(|c| c.is_expired_at(now_secs())) {
            return Err(SessionError::LoginFailed("The access token has expired".to_string()));
        }

        self.check_audience(&token);
        *self.token.write() = Some(token);
        info!(%method, "Session authenticated");
        Ok(())
    }

    async fn logout(&self) -> Result<(), SessionError> {
        *self.token.write() = None;
        info!("Session cleared");
        Ok(())
    }
}
