// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer: value types, state machines and the ports the
//! application services depend on.

pub mod agent;
pub mod dashboard;
pub mod link;
pub mod notification;
pub mod portal;
pub mod portal_config;
pub mod price;
pub mod session;
