// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

mod common;

use std::sync::Arc;

use common::{Gate, MockPortal, ScriptedSession};
use laissez_core::application::agent_registration::{
    AgentRegistrationService, RegistrationError, FAILURE_FALLBACK, FAILURE_TITLE,
    NETWORK_DESCRIPTION, NETWORK_TITLE, SAVED_TO_DATABASE, SUCCESS_TITLE, WEBHOOK_CONFIGURED,
};
use laissez_core::domain::agent::{AgentForm, FormError};
use laissez_core::domain::notification::NotificationLevel;
use laissez_core::domain::portal::{ApiError, CreateAgentResponse, WebhookInfo};
use laissez_core::infrastructure::RecordingNotifier;

struct Harness {
    service: Arc<AgentRegistrationService>,
    api: Arc<MockPortal>,
    notifier: Arc<RecordingNotifier>,
}

fn harness_with(api: MockPortal, session: ScriptedSession) -> Harness {
    let api = Arc::new(api);
    let notifier = Arc::new(RecordingNotifier::new());
    let service = Arc::new(AgentRegistrationService::new(
        api.clone(),
        Arc::new(session),
        notifier.clone(),
    ));
    Harness {
        service,
        api,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(MockPortal::new(), ScriptedSession::signed_in("privy-token"))
}

fn fill_example_form(service: &AgentRegistrationService) {
    service.set_url("https://x.com");
    service.set_bot_token("123:ABC");
    assert!(service.set_price_input("0.002"));
}

fn webhook_response() -> CreateAgentResponse {
    CreateAgentResponse {
        success: true,
        webhook_info: Some(WebhookInfo {
            webhook_url: Some("https://t.me/laissez_bot".to_string()),
            telegram_response: None,
        }),
        ..CreateAgentResponse::default()
    }
}

#[tokio::test]
async fn test_success_with_webhook_resets_form() {
    let h = harness();
    h.api.respond_agent(Ok(webhook_response()));
    fill_example_form(&h.service);

    let response = h.service.submit().await.unwrap();
    assert_eq!(response.webhook_url(), Some("https://t.me/laissez_bot"));

    let calls = h.api.agent_calls.lock().clone();
    assert_eq!(calls.len(), 1);
    let (request, bearer) = &calls[0];
    assert_eq!(request.url, "https://x.com");
    assert_eq!(request.bot_token, "123:ABC");
    assert_eq!(request.price.millis(), 2);
    assert_eq!(bearer.as_deref(), Some("privy-token"));

    let notification = h.notifier.last().unwrap();
    assert_eq!(notification.level, NotificationLevel::Success);
    assert_eq!(notification.title, SUCCESS_TITLE);
    assert_eq!(notification.description.as_deref(), Some(WEBHOOK_CONFIGURED));

    assert_eq!(h.service.form(), AgentForm::default());
    assert!(!h.service.is_submitting());
}

#[tokio::test]
async fn test_success_without_webhook_reports_database_save() {
    let h = harness();
    h.api.respond_agent(Ok(CreateAgentResponse {
        success: true,
        message: Some("Agent configuration saved successfully".to_string()),
        ..CreateAgentResponse::default()
    }));
    fill_example_form(&h.service);

    h.service.submit().await.unwrap();

    let notification = h.notifier.last().unwrap();
    assert_eq!(notification.description.as_deref(), Some(SAVED_TO_DATABASE));
    assert_eq!(h.service.last_message(), Some(notification));
    assert_eq!(h.service.form(), AgentForm::default());
}

#[tokio::test]
async fn test_rejection_surfaces_detail_and_keeps_form() {
    let h = harness();
    h.api.respond_agent(Err(ApiError::Rejected {
        status: 400,
        detail: Some("invalid token".to_string()),
    }));
    fill_example_form(&h.service);
    let before = h.service.form();

    let err = h.service.submit().await.unwrap_err();
    assert!(matches!(err, RegistrationError::Api(ApiError::Rejected { status: 400, .. })));

    let notification = h.notifier.last().unwrap();
    assert_eq!(notification.level, NotificationLevel::Error);
    assert_eq!(notification.title, FAILURE_TITLE);
    assert_eq!(notification.description.as_deref(), Some("invalid token"));

    assert_eq!(h.service.form(), before);
    assert!(!h.service.is_submitting());
}

#[tokio::test]
async fn test_rejection_without_detail_uses_fallback() {
    let h = harness();
    h.api.respond_agent(Err(ApiError::Rejected {
        status: 500,
        detail: None,
    }));
    fill_example_form(&h.service);

    assert!(h.service.submit().await.is_err());
    assert_eq!(
        h.notifier.last().unwrap().description.as_deref(),
        Some(FAILURE_FALLBACK)
    );
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    let h = harness();
    h.api
        .respond_agent(Err(ApiError::Transport("connection refused".to_string())));
    fill_example_form(&h.service);
    let before = h.service.form();

    let err = h.service.submit().await.unwrap_err();
    assert!(matches!(err, RegistrationError::Api(ApiError::Transport(_))));

    let notification = h.notifier.last().unwrap();
    assert_eq!(notification.title, NETWORK_TITLE);
    assert_eq!(notification.description.as_deref(), Some(NETWORK_DESCRIPTION));
    assert_eq!(h.service.form(), before);
    assert!(!h.service.is_submitting());
}

#[tokio::test]
async fn test_invalid_form_never_reaches_backend() {
    let h = harness();

    h.service.set_url("not-a-url");
    h.service.set_bot_token("123:ABC");
    let err = h.service.submit().await.unwrap_err();
    assert!(matches!(err, RegistrationError::Invalid(FormError::InvalidUrl(_))));

    h.service.set_url("https://x.com");
    h.service.set_bot_token("");
    let err = h.service.submit().await.unwrap_err();
    assert_eq!(err, RegistrationError::Invalid(FormError::MissingBotToken));

    assert_eq!(h.api.agent_call_count(), 0);
    assert!(h.notifier.notifications().is_empty());
    assert!(!h.service.is_submitting());
}

#[tokio::test]
async fn test_missing_token_submits_without_authorization() {
    let h = harness_with(MockPortal::new(), ScriptedSession::new(true, false, None));
    fill_example_form(&h.service);

    h.service.submit().await.unwrap();

    let calls = h.api.agent_calls.lock().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, None);
}

#[tokio::test]
async fn test_submit_control_disabled_while_in_flight() {
    let gate = Gate::default();
    let h = harness_with(MockPortal::gated(gate.clone()), ScriptedSession::signed_in("t"));
    fill_example_form(&h.service);
    assert!(!h.service.is_submitting());

    let service = h.service.clone();
    let in_flight = tokio::spawn(async move { service.submit().await });

    gate.entered.notified().await;
    assert!(h.service.is_submitting());
    assert_eq!(
        h.service.submit().await.unwrap_err(),
        RegistrationError::AlreadySubmitting
    );

    gate.release.notify_one();
    in_flight.await.unwrap().unwrap();

    assert!(!h.service.is_submitting());
    assert_eq!(h.api.agent_call_count(), 1);
}

#[tokio::test]
async fn test_submit_control_reenabled_after_failure() {
    let gate = Gate::default();
    let h = harness_with(MockPortal::gated(gate.clone()), ScriptedSession::signed_in("t"));
    h.api.respond_agent(Err(ApiError::Decode("eof".to_string())));
    fill_example_form(&h.service);

    let service = h.service.clone();
    let in_flight = tokio::spawn(async move { service.submit().await });
    gate.entered.notified().await;
    assert!(h.service.is_submitting());

    gate.release.notify_one();
    assert!(in_flight.await.unwrap().is_err());
    assert!(!h.service.is_submitting());
    assert_eq!(h.notifier.last().unwrap().title, NETWORK_TITLE);
}

#[tokio::test]
async fn test_price_stepper_through_service() {
    let h = harness();
    assert!(!h.service.can_decrement());
    assert!(!h.service.decrement_price());

    for _ in 0..3 {
        h.service.increment_price();
    }
    assert_eq!(h.service.form().price.millis(), 4);
    assert!(h.service.decrement_price());
    assert_eq!(h.service.form().price.millis(), 3);

    assert!(!h.service.set_price_input("0"));
    assert_eq!(h.service.form().price.millis(), 3);
}
