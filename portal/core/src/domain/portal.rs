// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Portal API Port (Anti-Corruption Layer)
//!
//! Request/response contract of the Laissez backend as consumed by the
//! portal, plus the [`PortalApi`] trait the application services talk to.
//! The HTTP implementation lives in the `laissez-portal-sdk` crate
//! (`LaissezClient`); tests substitute in-process mocks.
//!
//! | Endpoint | Request | Auth |
//! |----------|---------|------|
//! | `POST /api/agents` | [`CreateAgentRequest`] | optional bearer |
//! | `GET /api/agents` | none | optional bearer |
//! | `POST /api/link/complete` | [`CompleteLinkRequest`] | required bearer |
//! | `GET /api/health` | none | none |
//!
//! Every non-2xx response may carry a `detail` string which is surfaced to
//! the user verbatim.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::agent::AgentConfig;
use crate::domain::link::LinkCode;
use crate::domain::price::Price;

/// Body of `POST /api/agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAgentRequest {
    pub url: String,
    pub bot_token: String,
    pub price: Price,
}

impl From<&AgentConfig> for CreateAgentRequest {
    fn from(config: &AgentConfig) -> Self {
        Self {
            url: config.url.clone(),
            bot_token: config.bot_token.clone(),
            price: config.price,
        }
    }
}

/// Successful `POST /api/agents` body. All fields are optional; older
/// backends answer with `{ success, message, data }` only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAgentResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_info: Option<WebhookInfo>,
}

impl CreateAgentResponse {
    /// The Telegram webhook URL, when the backend provisioned one.
    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_info
            .as_ref()
            .and_then(|info| info.webhook_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Confirmation that a messaging webhook was set up alongside the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_response: Option<serde_json::Value>,
}

/// A stored agent as returned by `GET /api/agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub url: String,

    pub bot_token: String,

    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListAgentsResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub data: Vec<AgentRecord>,
}

/// Body of `POST /api/link/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteLinkRequest {
    pub code: String,
}

impl From<&LinkCode> for CompleteLinkRequest {
    fn from(code: &LinkCode) -> Self {
        Self {
            code: code.as_str().to_string(),
        }
    }
}

/// Successful `POST /api/link/complete` body. Only success matters to the
/// portal; the rest is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompleteLinkResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,

    #[serde(default)]
    pub service: String,
}

/// Error body shape shared by every endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Failures talking to the backend.
///
/// `Rejected` is a handled failure: the server answered with a non-2xx
/// status. `Transport` and `Decode` mean no usable response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request rejected with status {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-provided `detail`, if this was a handled failure that had one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when no response was obtained from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Decode(_))
    }
}

/// Port to the Laissez backend.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// `POST /api/agents`. The bearer token is attached when present.
    async fn create_agent(
        &self,
        request: &CreateAgentRequest,
        bearer: Option<&str>,
    ) -> Result<CreateAgentResponse, ApiError>;

    /// `POST /api/link/complete` with a mandatory bearer token.
    async fn complete_link(
        &self,
        request: &CompleteLinkRequest,
        bearer: &str,
    ) -> Result<CompleteLinkResponse, ApiError>;
}
