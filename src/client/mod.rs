//! Remote client seam.
//!
//! The lifecycle controller only ever talks to a [`RemoteClient`]; the
//! binary injects an [`HttpClient`] and tests inject a mock or an in-memory
//! fake.  Credentials come from a separate [`TokenSource`] so the client
//! never decides how tokens are obtained.
mod http;

pub use http::HttpClient;

use std::env;

use crate::cancel::CancelToken;
use crate::error::RemoteError;
use crate::model::remote::RemoteConfig;

/// Operations the remote identity service offers on the per-project
/// configuration singleton.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteClient {
    /// Fetch the configuration of `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::NotFound`] if the project has no configuration,
    /// [`RemoteError::Cancelled`] if `cancel` fires first, and other
    /// variants for transport or service failures.
    fn get_config(
        &self,
        cancel: &CancelToken,
        project_id: &str,
    ) -> Result<RemoteConfig, RemoteError>;

    /// Replace the configuration of `project_id` with `config` and return
    /// what the service stored.
    ///
    /// A call that returns [`RemoteError::Cancelled`] may still have been
    /// applied.  The write replaces the whole object, so re-issuing it
    /// converges to the same state.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_config`].
    fn update_config(
        &self,
        cancel: &CancelToken,
        project_id: &str,
        config: &RemoteConfig,
    ) -> Result<RemoteConfig, RemoteError>;
}

/// Supplier of bearer tokens for a scope.
pub trait TokenSource: Send + Sync {
    /// Return an access token valid for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Credentials`] if no token is available.
    fn access_token(&self, scope: &str) -> Result<String, RemoteError>;
}

/// Reads a pre-acquired token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvTokenSource {
    var: String,
}

impl EnvTokenSource {
    /// Read tokens from the variable named `var`.
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TokenSource for EnvTokenSource {
    fn access_token(&self, _scope: &str) -> Result<String, RemoteError> {
        match env::var(&self.var) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            Ok(_) | Err(env::VarError::NotPresent) => Err(RemoteError::Credentials(format!(
                "{} is not set",
                self.var
            ))),
            Err(env::VarError::NotUnicode(_)) => Err(RemoteError::Credentials(format!(
                "{} is not valid UTF-8",
                self.var
            ))),
        }
    }
}
