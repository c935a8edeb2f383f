//! Subcommand implementations.
//!
//! Each command has a `run` entry point used by the binary, which builds the
//! HTTP client from settings, and an `execute` function that takes any
//! [`RemoteClient`] so the command logic can run against a fake service.
pub mod apply;
pub mod plan;
pub mod refresh;
pub mod reset;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::Path;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::client::{EnvTokenSource, HttpClient};
use crate::config::{ProviderSettings, default_settings_path};
use crate::logging::STAGE_TARGET;
use crate::state::StateRecord;

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates settings resolution and client construction so that each
/// command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Resolved provider settings.
    pub settings: ProviderSettings,
    /// Client for the admin API.
    pub client: HttpClient,
}

impl CommandSetup {
    /// Load settings, apply command-line overrides, and build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed.
    pub fn init(global: &GlobalOpts) -> Result<Self> {
        tracing::info!(target: STAGE_TARGET, "Loading settings");
        let path = global
            .settings
            .clone()
            .unwrap_or_else(default_settings_path);
        let settings = ProviderSettings::load(&path)
            .with_context(|| format!("loading {}", path.display()))?
            .with_overrides(global.scope.as_deref(), global.api_base.as_deref());

        tracing::debug!("settings file: {}", path.display());
        tracing::debug!("api base: {}", settings.api_base);
        tracing::debug!("scope: {}", settings.scope);

        let tokens = Arc::new(EnvTokenSource::new(settings.access_token_env.as_str()));
        let client = HttpClient::new(
            settings.api_base.as_str(),
            settings.scope.as_str(),
            settings.timeout(),
            tokens,
        );
        Ok(Self { settings, client })
    }
}

/// Load a state file that must already exist.
fn load_existing_state(path: &Path) -> Result<StateRecord> {
    StateRecord::load(path)?
        .with_context(|| format!("no state file at {}; run apply first", path.display()))
}
