// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0

// Portal Configuration Types
//
// Defines the configuration schema for Laissez portal clients, including:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Backend API endpoint
// - Identity provider application id and bearer token source
// - Link flow redirect settings
// - HTTP client settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::session::LoginMethod;

pub const API_VERSION: &str = "laissez.io/v1";
pub const KIND: &str = "PortalConfig";

/// Top-level Kubernetes-style portal configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfigManifest {
    /// API version (must be "laissez.io/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "PortalConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: PortalConfigSpec,
}

/// Manifest metadata (Kubernetes-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Human-readable profile name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfigSpec {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Identity provider settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Account link flow settings
    #[serde(default)]
    pub link: LinkConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/api/...` paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. Unset means requests may wait
    /// indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Identity provider application id. Missing is allowed but logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// Bearer token (supports "env:VAR_NAME" for environment variables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Enabled login methods
    #[serde(default = "default_login_methods")]
    pub login_methods: Vec<LoginMethod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Delay before returning home after a successful link, in milliseconds
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Route navigated to after a successful link
    #[serde(default = "default_home_route")]
    pub home_route: String,

    /// Directory for the session-scoped link code. Defaults to the user
    /// runtime directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            access_token: None,
            login_methods: default_login_methods(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay_ms(),
            home_route: default_home_route(),
            storage_dir: None,
        }
    }
}

impl Default for PortalConfigManifest {
    fn default() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "laissez-portal".to_string());

        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: hostname,
                labels: None,
            },
            spec: PortalConfigSpec::default(),
        }
    }
}

impl LinkConfig {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl AuthConfig {
    /// Resolve `access_token`, following "env:VAR_NAME" indirection.
    /// A blank result counts as no token.
    pub fn resolved_access_token(&self) -> Option<String> {
        let raw = self.access_token.as_deref()?;
        let value = match raw.strip_prefix("env:") {
            Some(var) => std::env::var(var).ok()?,
            None => raw.to_string(),
        };
        let value = value.trim().to_string();
        (!value.is_empty()).then_some(value)
    }
}

impl PortalConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. LAISSEZ_CONFIG_PATH environment variable
    /// 2. ./laissez-config.yaml (working directory)
    /// 3. ~/.laissez/config.yaml (user home)
    /// 4. /etc/laissez/config.yaml (system, Unix) or C:\ProgramData\Laissez\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("LAISSEZ_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./laissez-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".laissez").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        #[cfg(unix)]
        let system_config = PathBuf::from("/etc/laissez/config.yaml");
        #[cfg(windows)]
        let system_config = PathBuf::from("C:\\ProgramData\\Laissez\\config.yaml");

        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path fails if missing/invalid
        let mut config = if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            Self::from_yaml_file(&path)
                .map_err(|e| anyhow::anyhow!("Failed to load config at {:?}: {}", path, e))?
        } else if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            Self::from_yaml_file(config_path)?
        } else {
            tracing::debug!("No configuration file found in standard locations. Using defaults.");
            Self::default()
        };

        config.apply_env_overrides();
        config.warn_on_missing_app_id();
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("LAISSEZ_API_URL") {
            tracing::info!("Environment override: LAISSEZ_API_URL={}", url);
            self.spec.api.base_url = url;
        }

        if let Some(app_id) = lookup("LAISSEZ_PRIVY_APP_ID") {
            tracing::info!("Environment override: LAISSEZ_PRIVY_APP_ID");
            self.spec.auth.app_id = Some(app_id);
        }

        if lookup("LAISSEZ_ACCESS_TOKEN").is_some() {
            tracing::info!("Environment override: LAISSEZ_ACCESS_TOKEN");
            self.spec.auth.access_token = Some("env:LAISSEZ_ACCESS_TOKEN".to_string());
        }

        if let Some(val) = lookup("LAISSEZ_HTTP_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) => {
                    tracing::info!("Environment override: LAISSEZ_HTTP_TIMEOUT_SECS={}", secs);
                    self.spec.api.timeout_secs = Some(secs);
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for LAISSEZ_HTTP_TIMEOUT_SECS: '{}'. Expected seconds. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    fn warn_on_missing_app_id(&self) {
        let missing = self
            .spec
            .auth
            .app_id
            .as_deref()
            .map(str::trim)
            .map_or(true, str::is_empty);
        if missing {
            tracing::warn!("Missing LAISSEZ_PRIVY_APP_ID: identity provider app id is not configured");
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        let base = url::Url::parse(&self.spec.api.base_url).map_err(|e| {
            anyhow::anyhow!("spec.api.base_url '{}' is not a valid URL: {}", self.spec.api.base_url, e)
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            anyhow::bail!("spec.api.base_url must use http or https, got '{}'", base.scheme());
        }

        if self.spec.api.timeout_secs == Some(0) {
            anyhow::bail!("spec.api.timeout_secs must be greater than zero when set");
        }

        if self.spec.auth.login_methods.is_empty() {
            anyhow::bail!("spec.auth.login_methods must enable at least one method");
        }

        if !self.spec.link.home_route.starts_with('/') {
            anyhow::bail!(
                "spec.link.home_route must be an absolute route, got '{}'",
                self.spec.link.home_route
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = PortalConfigManifest::default();
        assert_eq!(manifest.api_version, "laissez.io/v1");
        assert_eq!(manifest.kind, "PortalConfig");
        assert!(!manifest.metadata.name.is_empty());
        assert_eq!(manifest.spec.api.base_url, "http://localhost:8001");
        assert_eq!(manifest.spec.api.timeout(), None);
        assert_eq!(manifest.spec.link.redirect_delay(), Duration::from_millis(2500));
        assert_eq!(manifest.spec.link.home_route, "/");
        assert_eq!(manifest.spec.auth.login_methods, vec![LoginMethod::Google]);
    }

    #[test]
    fn test_minimal_yaml_fills_defaults() {
        let yaml = r#"
apiVersion: laissez.io/v1
kind: PortalConfig
metadata:
  name: staging
spec:
  api:
    base_url: https://staging.laissez.io
"#;
        let manifest = PortalConfigManifest::from_yaml_str(yaml).unwrap();
        assert_eq!(manifest.metadata.name, "staging");
        assert_eq!(manifest.spec.api.base_url, "https://staging.laissez.io");
        assert_eq!(manifest.spec.link.redirect_delay_ms, 2500);
        assert!(manifest.spec.auth.app_id.is_none());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut manifest = PortalConfigManifest::default();
        assert!(manifest.validate().is_ok());

        manifest.api_version = "wrong/v1".to_string();
        assert!(manifest.validate().is_err());
        manifest.api_version = API_VERSION.to_string();

        manifest.kind = "NodeConfig".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.spec.api.base_url = "not a url".to_string();
        assert!(manifest.validate().is_err());
        manifest.spec.api.base_url = "ftp://laissez.io".to_string();
        assert!(manifest.validate().is_err());
        manifest.spec.api.base_url = "https://laissez.io".to_string();

        manifest.spec.api.timeout_secs = Some(0);
        assert!(manifest.validate().is_err());
        manifest.spec.api.timeout_secs = Some(30);

        manifest.spec.link.home_route = "home".to_string();
        assert!(manifest.validate().is_err());
        manifest.spec.link.home_route = "/".to_string();

        manifest.spec.auth.login_methods.clear();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut manifest = PortalConfigManifest::default();
        let env: HashMap<&str, &str> = HashMap::from([
            ("LAISSEZ_API_URL", "https://api.laissez.io"),
            ("LAISSEZ_PRIVY_APP_ID", "app-123"),
            ("LAISSEZ_ACCESS_TOKEN", "secret"),
            ("LAISSEZ_HTTP_TIMEOUT_SECS", "15"),
        ]);
        manifest.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(manifest.spec.api.base_url, "https://api.laissez.io");
        assert_eq!(manifest.spec.auth.app_id.as_deref(), Some("app-123"));
        assert_eq!(
            manifest.spec.auth.access_token.as_deref(),
            Some("env:LAISSEZ_ACCESS_TOKEN")
        );
        assert_eq!(manifest.spec.api.timeout(), Some(Duration::from_secs(15)));

        let mut untouched = PortalConfigManifest::default();
        untouched.apply_overrides(|key| {
            (key == "LAISSEZ_HTTP_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(untouched.spec.api.timeout_secs, None);
    }

    #[test]
    fn test_literal_access_token() {
        let mut auth = AuthConfig::default();
        assert_eq!(auth.resolved_access_token(), None);

        auth.access_token = Some("  tok-1 ".to_string());
        assert_eq!(auth.resolved_access_token().as_deref(), Some("tok-1"));

        auth.access_token = Some("env:LAISSEZ_TEST_SURELY_UNSET_VAR".to_string());
        assert_eq!(auth.resolved_access_token(), None);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("laissez-config.yaml");

        let mut manifest = PortalConfigManifest::default();
        manifest.metadata.name = "local".to_string();
        manifest.spec.auth.app_id = Some("app-xyz".to_string());
        manifest.to_yaml_file(&path).unwrap();

        let loaded = PortalConfigManifest::load_or_default(Some(path)).unwrap();
        assert_eq!(loaded.metadata.name, "local");
        assert!(loaded.spec.auth.app_id.is_some());

        let missing = dir.path().join("absent.yaml");
        assert!(PortalConfigManifest::load_or_default(Some(missing)).is_err());
    }
}

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_login_methods() -> Vec<LoginMethod> {
    vec![LoginMethod::Google]
}

fn default_redirect_delay_ms() -> u64 {
    2500
}

fn default_home_route() -> String {
    "/".to_string()
}
