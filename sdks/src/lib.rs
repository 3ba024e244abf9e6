// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Laissez Portal Rust SDK
//!
//! HTTP client for the Laissez backend. [`LaissezClient`] implements the
//! core crate's [`PortalApi`](laissez_core::domain::portal::PortalApi) port.

pub mod client;
pub mod types;

pub use client::LaissezClient;
pub use types::*;
