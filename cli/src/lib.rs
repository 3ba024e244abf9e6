// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! Laissez portal CLI library - exposes testable components
//!
//! # Architecture
//!
//! - **Layer:** Interface / Presentation Layer
//! - **Purpose:** Terminal adapters for the portal's notification,
//!   navigation and login ports, plus the command handlers

pub mod commands;
pub mod console;
pub mod context;
