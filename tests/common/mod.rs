// Shared helpers for integration tests.
//
// Provides an in-memory stand-in for the remote admin API and builders for
// the declarative inputs the tests feed it, so each integration test can run
// a full lifecycle without network access.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use identity_platform_config::cancel::CancelToken;
use identity_platform_config::client::RemoteClient;
use identity_platform_config::error::RemoteError;
use identity_platform_config::model::{
    DeclarativeConfig, EmailPolicy, NotificationConfig, NotificationPolicy, PhoneNumberPolicy,
    RemoteConfig, SendEmail, SendEmailPolicy, SignInConfig,
};

/// One call received by [`InMemoryService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get(String),
    Update(String, RemoteConfig),
}

/// An in-memory remote service holding one configuration per project.
///
/// Updates follow the admin API's replace semantics: `signIn`, `subtype` and
/// `authorizedDomains` are always replaced, so leaving them out clears them;
/// `notification` is only replaced when present.  A cleared sign-in reads
/// back with every method present and switched off.  Projects that were
/// never seeded answer `NotFound`.
#[derive(Debug, Default)]
pub struct InMemoryService {
    configs: Mutex<HashMap<String, RemoteConfig>>,
    calls: Mutex<Vec<Call>>,
    write_failures: Mutex<VecDeque<RemoteError>>,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service where `project_id` exists with a fresh configuration.
    pub fn with_project(project_id: &str) -> Self {
        let service = Self::new();
        service.seed(project_id, fresh_config(project_id));
        service
    }

    /// Store `config` for `project_id` as-is.
    pub fn seed(&self, project_id: &str, config: RemoteConfig) {
        self.configs
            .lock()
            .expect("configs lock")
            .insert(project_id.to_string(), config);
    }

    /// Remove `project_id`, so later calls answer `NotFound`.
    pub fn remove(&self, project_id: &str) {
        self.configs
            .lock()
            .expect("configs lock")
            .remove(project_id);
    }

    /// Make the next update fail with `err` without changing stored state.
    pub fn fail_next_write(&self, err: RemoteError) {
        self.write_failures
            .lock()
            .expect("failures lock")
            .push_back(err);
    }

    /// Current stored configuration.
    pub fn stored(&self, project_id: &str) -> Option<RemoteConfig> {
        self.configs
            .lock()
            .expect("configs lock")
            .get(project_id)
            .cloned()
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Bodies of every update received so far.
    pub fn writes(&self) -> Vec<RemoteConfig> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(_, body) => Some(body),
                Call::Get(_) => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl RemoteClient for InMemoryService {
    fn get_config(
        &self,
        cancel: &CancelToken,
        project_id: &str,
    ) -> Result<RemoteConfig, RemoteError> {
        if cancel.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }
        self.record(Call::Get(project_id.to_string()));
        self.stored(project_id).ok_or(RemoteError::NotFound)
    }

    fn update_config(
        &self,
        cancel: &CancelToken,
        project_id: &str,
        config: &RemoteConfig,
    ) -> Result<RemoteConfig, RemoteError> {
        if cancel.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }
        self.record(Call::Update(project_id.to_string(), config.clone()));
        if let Some(err) = self.write_failures.lock().expect("failures lock").pop_front() {
            return Err(err);
        }

        let mut configs = self.configs.lock().expect("configs lock");
        let current = configs.get_mut(project_id).ok_or(RemoteError::NotFound)?;

        let sign_in = config.sign_in.clone().unwrap_or_else(SignInConfig::disabled);
        let disabled = SignInConfig::disabled();
        current.sign_in = Some(SignInConfig {
            email: sign_in.email.or(disabled.email),
            phone_number: sign_in.phone_number.or(disabled.phone_number),
        });
        current.subtype.clone_from(&config.subtype);
        current.authorized_domains = Some(config.authorized_domains.clone().unwrap_or_default());
        if config.notification.is_some() {
            current.notification.clone_from(&config.notification);
        }
        Ok(current.clone())
    }
}

/// The configuration a newly provisioned project reports.
pub fn fresh_config(project_id: &str) -> RemoteConfig {
    RemoteConfig {
        name: format!("projects/{project_id}/config"),
        sign_in: Some(SignInConfig::disabled()),
        notification: Some(NotificationConfig {
            send_email: Some(SendEmail::default()),
        }),
        subtype: "IDENTITY_PLATFORM".to_string(),
        authorized_domains: Some(Vec::new()),
    }
}

/// A fully configured declarative model for `project_id`.
pub fn full_desired(project_id: &str) -> DeclarativeConfig {
    DeclarativeConfig {
        email: Some(EmailPolicy {
            enabled: true,
            password_required: false,
        }),
        phone_number: Some(PhoneNumberPolicy { enabled: false }),
        notification: Some(NotificationPolicy {
            send_email: Some(SendEmailPolicy {
                callback_uri: "https://x/cb".to_string(),
            }),
        }),
        subtype: Some("IDENTITY_PLATFORM".to_string()),
        authorized_domains: vec!["a.com".to_string(), "b.com".to_string()],
        ..DeclarativeConfig::new(project_id)
    }
}

/// TOML desired-state file matching [`full_desired`].
pub fn full_desired_toml(project_id: &str) -> String {
    format!(
        r#"project_id = "{project_id}"
subtype = "IDENTITY_PLATFORM"
authorized_domains = ["a.com", "b.com"]

[[email]]
enabled = true
password_required = false

[[phone_number]]
enabled = false

[[notification]]
[[notification.send_email]]
callback_uri = "https://x/cb"
"#
    )
}

/// A temporary directory holding a desired-state file and a state path.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` as `desired.toml` and return its path.
    pub fn write_desired(&self, content: &str) -> PathBuf {
        let path = self.path().join("desired.toml");
        std::fs::write(&path, content).expect("write desired.toml");
        path
    }

    /// Path of the state file (not created).
    pub fn state_path(&self) -> PathBuf {
        self.path().join("state").join("state.json")
    }
}
