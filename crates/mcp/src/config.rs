// Credential and endpoint configuration for the MCP server

use anyhow::{Context, Result};
use higgsfield_sdk::config::mask_credential;
use higgsfield_sdk::HiggsfieldClient;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_API_KEY: &str = "HF_API_KEY";
pub const ENV_SECRET: &str = "HF_SECRET";
pub const ENV_BASE_URL: &str = "HF_BASE_URL";

pub const DEFAULT_CONFIG_FILE: &str = "higgsfield.toml";

pub const ENV_LOG_FILTER: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "higgsfield_mcp=info,higgsfield_sdk=info";

/// Optional `higgsfield.toml` contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load the file if it exists, otherwise an empty configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Configuration file not found, skipping");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file {}", path.display()))
    }
}

/// Values given on the command line; these win over everything else.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub api_key: Option<String>,
    pub secret: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_key: String,
    pub secret: String,
    pub base_url: Option<String>,
}

impl ResolvedConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty() && !self.secret.is_empty()
    }

    pub fn build_client(&self) -> Result<HiggsfieldClient> {
        let mut builder = HiggsfieldClient::builder()
            .api_key(self.api_key.clone())
            .secret(self.secret.clone());
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        builder.build().context("Failed to build Higgsfield client")
    }
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("api_key", &mask_credential(&self.api_key))
            .field("secret", &mask_credential(&self.secret))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Merge sources with precedence overrides > environment > file.
/// Empty strings count as unset at every level.
pub fn resolve(
    overrides: &CredentialOverrides,
    env: impl Fn(&str) -> Option<String>,
    file: &FileConfig,
) -> ResolvedConfig {
    let pick = |cli: &Option<String>, var: &str, file: &Option<String>| {
        [cli.clone(), env(var), file.clone()]
            .into_iter()
            .flatten()
            .find(|v| !v.trim().is_empty())
    };

    ResolvedConfig {
        api_key: pick(&overrides.api_key, ENV_API_KEY, &file.api_key).unwrap_or_default(),
        secret: pick(&overrides.secret, ENV_SECRET, &file.secret).unwrap_or_default(),
        base_url: pick(&overrides.base_url, ENV_BASE_URL, &file.base_url),
    }
}

/// Log filter directives: `RUST_LOG` when set and non-empty, else the default.
/// Call after `.env` is loaded so a filter set there applies.
pub fn log_directives(env: impl Fn(&str) -> Option<String>) -> String {
    env(ENV_LOG_FILTER)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// `resolve` against the process environment.
pub fn resolve_from_env(overrides: &CredentialOverrides, file: &FileConfig) -> ResolvedConfig {
    resolve(overrides, |name| std::env::var(name).ok(), file)
}
