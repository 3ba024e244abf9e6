// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the Laissez portal CLI

pub mod agent;
pub mod config;
pub mod health;
pub mod link;
pub mod whoami;

pub use self::agent::AgentCommand;
pub use self::config::ConfigCommand;
pub use self::link::LinkArgs;
pub use self::whoami::WhoamiArgs;
