// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

//! Wiring shared by the commands: configuration, backend client and
//! session.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use laissez_core::domain::portal_config::PortalConfigManifest;
use laissez_core::infrastructure::{BearerTokenSession, SessionFileLinkCodeStore};
use laissez_sdk::LaissezClient;

use crate::console::DialoguerTokenPrompt;

/// Flags accepted by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
}

pub struct PortalContext {
    pub config: PortalConfigManifest,
    pub client: Arc<LaissezClient>,
    pub session: Arc<BearerTokenSession>,
}

impl PortalContext {
    /// Load configuration and build the client and session from it.
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let mut config = PortalConfigManifest::load_or_default(options.config_path.clone())
            .context("Failed to load configuration")?;
        if let Some(api_url) = &options.api_url {
            config.spec.api.base_url = api_url.clone();
        }
        config.validate().context("Configuration validation failed")?;
        Self::from_config(config)
    }

    pub fn from_config(config: PortalConfigManifest) -> Result<Self> {
        let mut client = LaissezClient::new(config.spec.api.base_url.clone());
        if let Some(timeout) = config.spec.api.timeout() {
            client = client
                .with_timeout(timeout)
                .context("Failed to build HTTP client")?;
        }
        debug!(base_url = client.base_url(), "Backend client ready");

        let session = BearerTokenSession::new(config.spec.auth.resolved_access_token())
            .with_prompt(Arc::new(DialoguerTokenPrompt))
            .with_app_id(config.spec.auth.app_id.clone());

        Ok(Self {
            config,
            client: Arc::new(client),
            session: Arc::new(session),
        })
    }

    pub fn link_code_store(&self) -> SessionFileLinkCodeStore {
        let dir = self
            .config
            .spec
            .link
            .storage_dir
            .clone()
            .unwrap_or_else(SessionFileLinkCodeStore::default_dir);
        SessionFileLinkCodeStore::new(dir)
    }
}
