// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Adapters for the session, link code storage and notification ports.

pub mod code_store;
pub mod notifier;
pub mod session;

pub use code_store::{InMemoryLinkCodeStore, SessionFileLinkCodeStore};
pub use notifier::{RecordingNavigator, RecordingNotifier, TracingNotifier};
pub use session::{BearerTokenSession, TokenPrompt};
