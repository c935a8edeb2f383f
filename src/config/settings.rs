//! Provider settings: where the remote service lives and how to authenticate.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::toml_loader::load_config;
use crate::error::ConfigError;

/// Access scope requested for remote calls unless overridden.
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Base URL of the Identity Toolkit admin API.
pub const DEFAULT_API_BASE: &str = "https://identitytoolkit.googleapis.com/admin/v2";

/// Environment variable holding a pre-acquired access token.
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for constructing the remote client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    /// Access scope, passed through to the token source unchanged.
    pub scope: String,
    /// Base URL of the admin API.
    pub api_base: String,
    /// Environment variable the token is read from.
    pub access_token_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            access_token_env: DEFAULT_ACCESS_TOKEN_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderSettings {
    /// Load settings from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, scope: Option<&str>, api_base: Option<&str>) -> Self {
        if let Some(scope) = scope {
            self.scope = scope.to_string();
        }
        if let Some(api_base) = api_base {
            self.api_base = api_base.to_string();
        }
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Return `$XDG_CONFIG_HOME/idp-config/settings.toml`, falling back to
/// `~/.config/idp-config/settings.toml`.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| {
            std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .map_or_else(|_| PathBuf::from("."), PathBuf::from)
                .join(".config")
        },
        PathBuf::from,
    );
    config_dir.join("idp-config").join("settings.toml")
}
