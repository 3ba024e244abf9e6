// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Application services orchestrating the domain ports.

pub mod agent_registration;
pub mod link_account;

pub use agent_registration::{AgentRegistrationService, RegistrationError};
pub use link_account::{LinkAccountFlow, LinkDependencies, LinkSettings};
