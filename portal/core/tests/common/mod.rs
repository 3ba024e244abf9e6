// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use laissez_core::domain::portal::{
    ApiError, CompleteLinkRequest, CompleteLinkResponse, CreateAgentRequest, CreateAgentResponse,
    PortalApi,
};
use laissez_core::domain::session::{AuthSession, LoginMethod, SessionError, UserProfile};

/// Scripted backend. Records every call.
pub struct MockPortal {
    agent_result: Mutex<Result<CreateAgentResponse, ApiError>>,
    link_result: Mutex<Result<CompleteLinkResponse, ApiError>>,
    pub agent_calls: Mutex<Vec<(CreateAgentRequest, Option<String>)>>,
    pub link_calls: Mutex<Vec<(CompleteLinkRequest, String)>>,
    gate: Option<Gate>,
}

/// Holds a request in flight until released.
#[derive(Clone, Default)]
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl MockPortal {
    pub fn new() -> Self {
        Self {
            agent_result: Mutex::new(Ok(CreateAgentResponse::default())),
            link_result: Mutex::new(Ok(CompleteLinkResponse::default())),
            agent_calls: Mutex::new(Vec::new()),
            link_calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated(gate: Gate) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn respond_agent(&self, result: Result<CreateAgentResponse, ApiError>) {
        *self.agent_result.lock() = result;
    }

    pub fn respond_link(&self, result: Result<CompleteLinkResponse, ApiError>) {
        *self.link_result.lock() = result;
    }

    pub fn agent_call_count(&self) -> usize {
        self.agent_calls.lock().len()
    }

    pub fn link_call_count(&self) -> usize {
        self.link_calls.lock().len()
    }

    async fn pass_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

#[async_trait]
impl PortalApi for MockPortal {
    async fn create_agent(
        &self,
        request: &CreateAgentRequest,
        bearer: Option<&str>,
    ) -> Result<CreateAgentResponse, ApiError> {
        self.agent_calls
            .lock()
            .push((request.clone(), bearer.map(str::to_string)));
        self.pass_gate().await;
        self.agent_result.lock().clone()
    }

    async fn complete_link(
        &self,
        request: &CompleteLinkRequest,
        bearer: &str,
    ) -> Result<CompleteLinkResponse, ApiError> {
        self.link_calls
            .lock()
            .push((request.clone(), bearer.to_string()));
        self.pass_gate().await;
        self.link_result.lock().clone()
    }
}

/// Identity provider stand-in with scripted readiness, login and token.
pub struct ScriptedSession {
    ready: AtomicBool,
    authenticated: AtomicBool,
    token: Mutex<Option<String>>,
    login_error: Mutex<Option<SessionError>>,
    pub login_calls: Mutex<Vec<LoginMethod>>,
}

impl ScriptedSession {
    pub fn new(ready: bool, authenticated: bool, token: Option<&str>) -> Self {
        Self {
            ready: AtomicBool::new(ready),
            authenticated: AtomicBool::new(authenticated),
            token: Mutex::new(token.map(str::to_string)),
            login_error: Mutex::new(None),
            login_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn signed_in(token: &str) -> Self {
        Self::new(true, true, Some(token))
    }

    pub fn anonymous() -> Self {
        Self::new(true, false, None)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn fail_login(&self, error: SessionError) {
        *self.login_error.lock() = Some(error);
    }

    pub fn set_token(&self, token: Option<&str>) {
        *self.token.lock() = token.map(str::to_string);
    }
}

#[async_trait]
impl AuthSession for ScriptedSession {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn get_session(&self) -> Option<UserProfile> {
        self.is_authenticated()
            .then(|| UserProfile::new("did:privy:test-user"))
    }

    async fn get_access_token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.lock().clone())
    }

    async fn login(&self, method: LoginMethod) -> Result<(), SessionError> {
        self.login_calls.lock().push(method);
        if let Some(error) = self.login_error.lock().clone() {
            return Err(error);
        }
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.authenticated.store(false, Ordering::SeqCst);
        Ok(())
    }
}
