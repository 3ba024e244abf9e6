// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Link Account Flow
//!
//! Drives the [`LinkStatus`] machine for one link page instance.
//!
//! The host calls [`LinkAccountFlow::evaluate`] whenever something the
//! flow depends on may have changed: the session became ready, the user
//! logged in, a code was pasted. `evaluate` is safe to call any number of
//! times; the completion request is sent at most once per flow instance
//! because a successful link sets a latch that only a new instance resets.
//!
//! ## Invariants
//!
//! - A query code is written to the [`LinkCodeStore`] as soon as the flow
//!   is created so that it survives the login round-trip.
//! - `POST /api/link/complete` is never issued without both a code and a
//!   bearer token.
//! - After `Success` the stored code is gone and a redirect to the home
//!   route fires once the configured delay elapses.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::link::{
    resolve_code, LinkCode, LinkCodeStore, LinkError, LinkStatus, Navigator,
};
use crate::domain::notification::{Notification, Notifier};
use crate::domain::portal::{CompleteLinkRequest, PortalApi};
use crate::domain::portal_config::LinkConfig;
use crate::domain::session::{AuthSession, LoginMethod};

pub const LINKED_TITLE: &str = "Account linked";
pub const LINK_FAILED_TITLE: &str = "Unable to complete link";
pub const LOGIN_FAILED_TITLE: &str = "Login failed";

#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub redirect_delay: Duration,
    pub home_route: String,
    pub login_method: LoginMethod,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            redirect_delay: Duration::from_millis(2500),
            home_route: "/".to_string(),
            login_method: LoginMethod::Google,
        }
    }
}

impl From<&LinkConfig> for LinkSettings {
    fn from(config: &LinkConfig) -> Self {
        Self {
            redirect_delay: config.redirect_delay(),
            home_route: config.home_route.clone(),
            ..Self::default()
        }
    }
}

/// Collaborators of a [`LinkAccountFlow`].
#[derive(Clone)]
pub struct LinkDependencies {
    pub session: Arc<dyn AuthSession>,
    pub api: Arc<dyn PortalApi>,
    pub store: Arc<dyn LinkCodeStore>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

pub struct LinkAccountFlow {
    deps: LinkDependencies,
    settings: LinkSettings,
    query_code: Option<LinkCode>,
    manual_code: Option<LinkCode>,
    status: LinkStatus,
    loading: bool,
    linked: bool,
    redirect: Option<JoinHandle<()>>,
}

impl LinkAccountFlow {
    pub fn new(deps: LinkDependencies, settings: LinkSettings, query_code: Option<LinkCode>) -> Self {
        if let Some(code) = &query_code {
            if let Err(e) = deps.store.save(code) {
                warn!("Failed to remember link code for this session: {}", e);
            }
        }

        Self {
            deps,
            settings,
            query_code,
            manual_code: None,
            status: LinkStatus::Idle,
            loading: false,
            linked: false,
            redirect: None,
        }
    }

    pub fn status(&self) -> LinkStatus {
        self.status
    }

    /// True while the completion request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True once a link completed on this instance.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn query_code(&self) -> Option<&LinkCode> {
        self.query_code.as_ref()
    }

    /// Record a pasted code. Blank input clears it.
    pub fn set_manual_code(&mut self, input: &str) {
        self.manual_code = LinkCode::parse(input);
    }

    /// The code that would be exchanged right now.
    pub fn code(&self) -> Option<LinkCode> {
        resolve_code(
            self.query_code.as_ref(),
            self.manual_code.as_ref(),
            self.deps.store.load(),
        )
    }

    /// Readiness effect. Returns the status after evaluation.
    pub async fn evaluate(&mut self) -> LinkStatus {
        // Success is terminal; the stored code is already gone.
        if self.linked || !self.deps.session.is_ready() {
            return self.status;
        }

        let Some(code) = self.code() else {
            self.transition(LinkStatus::MissingCode);
            return self.status;
        };

        if !self.deps.session.is_authenticated() {
            return self.status;
        }

        self.finalize(code).await;
        self.status
    }

    /// Start an interactive login, then re-evaluate on success.
    pub async fn login(&mut self) -> Result<LinkStatus, LinkError> {
        if self.linked {
            return Ok(self.status);
        }
        self.transition(LinkStatus::LoggingIn);

        match self.deps.session.login(self.settings.login_method).await {
            Ok(()) => {
                info!(method = %self.settings.login_method, "Login completed");
                Ok(self.evaluate().await)
            }
            Err(e) => {
                error!("Login failed: {}", e);
                self.deps
                    .notifier
                    .notify(Notification::error(LOGIN_FAILED_TITLE).with_description(e.to_string()));
                self.transition(LinkStatus::Error);
                Err(LinkError::Session(e))
            }
        }
    }

    /// Wait for the post-link redirect, if one is scheduled.
    pub async fn wait_for_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            if let Err(e) = handle.await {
                warn!("Redirect task did not finish: {}", e);
            }
        }
    }

    async fn finalize(&mut self, code: LinkCode) {
        self.loading = true;
        self.transition(LinkStatus::Linking);
        let result = self.complete(&code).await;
        self.loading = false;

        match result {
            Ok(()) => {
                if let Err(e) = self.deps.store.clear() {
                    warn!("Failed to clear stored link code: {}", e);
                }
                self.linked = true;
                self.transition(LinkStatus::Success);
                self.deps.notifier.notify(Notification::success(LINKED_TITLE));
                self.schedule_redirect();
            }
            Err(e) => {
                error!("Link completion failed: {}", e);
                self.deps
                    .notifier
                    .notify(Notification::error(LINK_FAILED_TITLE).with_description(e.user_message()));
                self.transition(LinkStatus::Error);
            }
        }
    }

    async fn complete(&self, code: &LinkCode) -> Result<(), LinkError> {
        let token = self
            .deps
            .session
            .get_access_token()
            .await?
            .ok_or(LinkError::MissingToken)?;

        let response = self
            .deps
            .api
            .complete_link(&CompleteLinkRequest::from(code), &token)
            .await?;

        info!(platform = ?response.platform, "Link code exchanged");
        Ok(())
    }

    fn schedule_redirect(&mut self) {
        let navigator = Arc::clone(&self.deps.navigator);
        let route = self.settings.home_route.clone();
        let delay = self.settings.redirect_delay;
        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(&route);
        }));
    }

    fn transition(&mut self, next: LinkStatus) {
        if self.status != next {
            info!(from = %self.status, to = %next, "Link status changed");
            self.status = next;
        }
    }
}
