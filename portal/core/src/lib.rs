// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Laissez portal core
//!
//! Agent registration and account linking for the Laissez agent
//! monetization platform, independent of any particular front end.
//!
//! # Architecture
//!
//! - **domain:** value types, link status machine, `PortalApi` / `AuthSession` ports
//! - **application:** `AgentRegistrationService`, `LinkAccountFlow`
//! - **infrastructure:** session, link code storage and notifier adapters

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
