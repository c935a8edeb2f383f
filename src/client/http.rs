//! [`RemoteClient`] over the Identity Toolkit admin REST API.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::{RemoteClient, TokenSource};
use crate::cancel::CancelToken;
use crate::error::RemoteError;
use crate::model::remote::RemoteConfig;

/// Blocking HTTP client for the per-project configuration resource.
///
/// Every call runs through [`CancelToken::run`] so an interrupted command
/// returns promptly instead of waiting for the request timeout.
pub struct HttpClient {
    agent: ureq::Agent,
    api_base: String,
    scope: String,
    tokens: Arc<dyn TokenSource>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_base", &self.api_base)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a client for `api_base`, requesting tokens for `scope`.
    #[must_use]
    pub fn new(
        api_base: impl Into<String>,
        scope: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            scope: scope.into(),
            tokens,
        }
    }

    /// The API base URL requests are sent to.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn config_url(&self, project_id: &str) -> String {
        format!("{}/projects/{project_id}/config", self.api_base)
    }

    fn bearer(&self) -> Result<String, RemoteError> {
        let token = self.tokens.access_token(&self.scope)?;
        Ok(format!("Bearer {token}"))
    }
}

impl RemoteClient for HttpClient {
    fn get_config(
        &self,
        cancel: &CancelToken,
        project_id: &str,
    ) -> Result<RemoteConfig, RemoteError> {
        let agent = self.agent.clone();
        let url = self.config_url(project_id);
        let auth = self.bearer()?;

        cancel.run(move || {
            let config: RemoteConfig = agent
                .get(&url)
                .header("Authorization", &auth)
                .header("Accept", "application/json")
                .call()?
                .body_mut()
                .read_json()?;
            Ok(config)
        })
    }

    fn update_config(
        &self,
        cancel: &CancelToken,
        project_id: &str,
        config: &RemoteConfig,
    ) -> Result<RemoteConfig, RemoteError> {
        let agent = self.agent.clone();
        let url = self.config_url(project_id);
        let auth = self.bearer()?;
        let mask = config.update_mask();
        let body = config.clone();

        cancel.run(move || {
            let stored: RemoteConfig = agent
                .patch(&url)
                .query("updateMask", &mask)
                .header("Authorization", &auth)
                .header("Accept", "application/json")
                .send_json(&body)?
                .body_mut()
                .read_json()?;
            Ok(stored)
        })
    }
}
