// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Registration Service
//!
//! Owns the agent configuration form and submits it to `POST /api/agents`.
//!
//! ## Submission
//!
//! ```text
//! submit()
//!   └─ submitting: false → true      (second submit → AlreadySubmitting)
//!   └─ AgentForm::validate()         (invalid → FormError, no request)
//!   └─ AuthSession::get_access_token (None → request without Authorization)
//!   └─ PortalApi::create_agent
//!        ├─ Ok       → success notification, form reset to defaults
//!        ├─ Rejected → "Failed to save configuration" + detail, form kept
//!        └─ Transport/Decode → "Network error", form kept
//!   └─ submitting: → false           (drop guard, every exit path)
//! ```
//!
//! No timeout is applied here; a request that never completes keeps
//! `is_submitting()` true.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::agent::{AgentForm, FormError};
use crate::domain::notification::{Notification, Notifier};
use crate::domain::portal::{ApiError, CreateAgentRequest, CreateAgentResponse, PortalApi};
use crate::domain::session::AuthSession;

pub const SUCCESS_TITLE: &str = "Agent configuration saved successfully!";
pub const WEBHOOK_CONFIGURED: &str = "Telegram webhook has been set up.";
pub const SAVED_TO_DATABASE: &str = "Configuration saved to database.";
pub const FAILURE_TITLE: &str = "Failed to save configuration";
pub const FAILURE_FALLBACK: &str = "Please try again.";
pub const NETWORK_TITLE: &str = "Network error";
pub const NETWORK_DESCRIPTION: &str = "Unable to connect to the server. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Clears the submitting flag however `submit` exits.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AgentRegistrationService {
    api: Arc<dyn PortalApi>,
    session: Arc<dyn AuthSession>,
    notifier: Arc<dyn Notifier>,
    form: Mutex<AgentForm>,
    submitting: AtomicBool,
    last_message: Mutex<Option<Notification>>,
}

impl AgentRegistrationService {
    pub fn new(
        api: Arc<dyn PortalApi>,
        session: Arc<dyn AuthSession>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            form: Mutex::new(AgentForm::default()),
            submitting: AtomicBool::new(false),
            last_message: Mutex::new(None),
        }
    }

    /// Snapshot of the current form values.
    pub fn form(&self) -> AgentForm {
        self.form.lock().clone()
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.form.lock().url = url.into();
    }

    pub fn set_bot_token(&self, bot_token: impl Into<String>) {
        self.form.lock().bot_token = bot_token.into();
    }

    /// Direct price entry. Invalid input is ignored and returns `false`.
    pub fn set_price_input(&self, input: &str) -> bool {
        let accepted = self.form.lock().set_price_input(input);
        if !accepted {
            debug!(input, "Ignoring price entry below $0.001 or not a number");
        }
        accepted
    }

    pub fn increment_price(&self) {
        self.form.lock().increment_price();
    }

    /// No-op at the $0.001 floor.
    pub fn decrement_price(&self) -> bool {
        self.form.lock().decrement_price()
    }

    pub fn can_decrement(&self) -> bool {
        self.form.lock().can_decrement()
    }

    /// True while a submission is in flight (the submit control is
    /// disabled).
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Notification produced by the most recent submission.
    pub fn last_message(&self) -> Option<Notification> {
        self.last_message.lock().clone()
    }

    pub async fn submit(&self) -> Result<CreateAgentResponse, RegistrationError> {
        if self.submitting.swap(true, Ordering::AcqRel) {
            return Err(RegistrationError::AlreadySubmitting);
        }
        let _guard = SubmitGuard(&self.submitting);
        *self.last_message.lock() = None;

        let config = self.form().validate()?;
        let request = CreateAgentRequest::from(&config);

        let bearer = match self.session.get_access_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Could not read access token, submitting without authorization: {}", e);
                None
            }
        };

        info!(
            url = %request.url,
            price = %config.price,
            authorized = bearer.is_some(),
            "Submitting agent configuration"
        );

        match self.api.create_agent(&request, bearer.as_deref()).await {
            Ok(response) => {
                let description = if response.webhook_url().is_some() {
                    WEBHOOK_CONFIGURED
                } else {
                    SAVED_TO_DATABASE
                };
                self.publish(Notification::success(SUCCESS_TITLE).with_description(description));
                *self.form.lock() = AgentForm::default();
                info!(webhook = response.webhook_url().is_some(), "Agent configuration saved");
                Ok(response)
            }
            Err(err) => {
                let notification = if err.is_transport() {
                    Notification::error(NETWORK_TITLE).with_description(NETWORK_DESCRIPTION)
                } else {
                    Notification::error(FAILURE_TITLE)
                        .with_description(err.detail().unwrap_or(FAILURE_FALLBACK))
                };
                warn!("Agent configuration was not saved: {}", err);
                self.publish(notification);
                Err(err.into())
            }
        }
    }

    fn publish(&self, notification: Notification) {
        *self.last_message.lock() = Some(notification.clone());
        self.notifier.notify(notification);
    }
}
