// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Wire types of the Laissez API, re-exported from the core crate so SDK
//! users need a single dependency.

pub use laissez_core::domain::link::LinkCode;
pub use laissez_core::domain::portal::{
    AgentRecord, ApiError, CompleteLinkRequest, CompleteLinkResponse, CreateAgentRequest,
    CreateAgentResponse, HealthResponse, ListAgentsResponse, WebhookInfo,
};
pub use laissez_core::domain::price::Price;
