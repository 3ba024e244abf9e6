// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use laissez_core::domain::portal::{
    ApiError, CompleteLinkRequest, CompleteLinkResponse, CreateAgentRequest, CreateAgentResponse,
    ErrorBody, HealthResponse, ListAgentsResponse, PortalApi,
};

/// Client for the Laissez backend API.
#[derive(Debug, Clone)]
pub struct LaissezClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl LaissezClient {
    /// Create a new client. A trailing slash on `base_url` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            api_key: None,
        }
    }

    /// Default bearer token, used when a call does not supply its own.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Apply a whole-request timeout. Without one requests wait for the
    /// server indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> anyhow::Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/health`.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let body = self.execute(self.client.get(self.endpoint("/api/health"))).await?;
        decode_strict(&body)
    }

    /// `POST /api/agents`.
    pub async fn create_agent(
        &self,
        request: &CreateAgentRequest,
        bearer: Option<&str>,
    ) -> Result<CreateAgentResponse, ApiError> {
        let req = self.client.post(self.endpoint("/api/agents")).json(request);
        let body = self.execute(self.authorize(req, bearer)).await?;
        Ok(decode_lenient(&body))
    }

    /// `GET /api/agents`.
    pub async fn list_agents(&self, bearer: Option<&str>) -> Result<ListAgentsResponse, ApiError> {
        let req = self.client.get(self.endpoint("/api/agents"));
        let body = self.execute(self.authorize(req, bearer)).await?;
        decode_strict(&body)
    }

    /// `POST /api/link/complete`.
    pub async fn complete_link(
        &self,
        request: &CompleteLinkRequest,
        bearer: &str,
    ) -> Result<CompleteLinkResponse, ApiError> {
        let req = self
            .client
            .post(self.endpoint("/api/link/complete"))
            .json(request);
        let body = self.execute(self.authorize(req, Some(bearer))).await?;
        Ok(decode_lenient(&body))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        match bearer.or(self.api_key.as_deref()) {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    /// Send the request and return the body of a 2xx response. Non-2xx
    /// responses become [`ApiError::Rejected`] carrying the server's
    /// `detail` when the body has one.
    async fn execute(&self, req: RequestBuilder) -> Result<String, ApiError> {
        let response = req
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return Ok(body);
        }

        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail);
        warn!(status = status.as_u16(), detail = ?detail, "Request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

fn decode_strict<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Any 2xx counts as success, whatever the body looks like.
fn decode_lenient<T: DeserializeOwned + Default>(body: &str) -> T {
    serde_json::from_str(body).unwrap_or_else(|e| {
        debug!("Ignoring unparseable success body: {}", e);
        T::default()
    })
}

#[async_trait]
impl PortalApi for LaissezClient {
    async fn create_agent(
        &self,
        request: &CreateAgentRequest,
        bearer: Option<&str>,
    ) -> Result<CreateAgentResponse, ApiError> {
        LaissezClient::create_agent(self, request, bearer).await
    }

    async fn complete_link(
        &self,
        request: &CompleteLinkRequest,
        bearer: &str,
    ) -> Result<CompleteLinkResponse, ApiError> {
        LaissezClient::complete_link(self, request, bearer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalised() {
        let client = LaissezClient::new("http://localhost:8001/");
        assert_eq!(client.base_url(), "http://localhost:8001");
        assert_eq!(client.endpoint("/api/agents"), "http://localhost:8001/api/agents");
    }

    #[test]
    fn test_lenient_decode_defaults() {
        let parsed: CreateAgentResponse = decode_lenient("not json");
        assert_eq!(parsed, CreateAgentResponse::default());

        let strict: Result<HealthResponse, ApiError> = decode_strict("");
        assert!(matches!(strict, Err(ApiError::Decode(_))));
    }
}
