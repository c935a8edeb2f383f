//! Lifecycle controller for the per-project configuration singleton.
//!
//! The remote service has no create or delete primitive: a configuration
//! object always exists for a project.  The controller therefore exposes
//! [`ConfigLifecycle::configure`] (write the full desired configuration)
//! and [`ConfigLifecycle::reset`] (write an empty one) next to
//! [`ConfigLifecycle::read`] and [`ConfigLifecycle::update`].
//!
//! The `*_record` methods run the same operations against a [`StateRecord`],
//! maintaining its identity: it is set only after a successful write and
//! cleared on confirmed absence or after a successful reset.
use std::fmt;

use crate::cancel::CancelToken;
use crate::client::RemoteClient;
use crate::error::{Error, MappingError, Operation, RemoteError};
use crate::mapping::{hydrate, project, record_observed, reset_config};
use crate::model::declarative::{DEFAULT_SUBTYPE, DeclarativeConfig};
use crate::model::remote::RemoteConfig;
use crate::state::StateRecord;
use crate::state::schema::SUBTYPE;

/// Result of [`ConfigLifecycle::configure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configured {
    /// Identity assigned by the remote service.
    pub identity: String,
    /// Configuration observed immediately after the write.
    pub observed: DeclarativeConfig,
}

/// Result of [`ConfigLifecycle::read_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The configuration exists and was recorded.
    Present,
    /// The service reports no configuration; the identity was cleared.
    Absent,
}

/// Runs lifecycle operations against one remote client.
pub struct ConfigLifecycle<'a> {
    client: &'a dyn RemoteClient,
    cancel: &'a CancelToken,
}

impl fmt::Debug for ConfigLifecycle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLifecycle")
            .field("cancel", self.cancel)
            .finish_non_exhaustive()
    }
}

impl<'a> ConfigLifecycle<'a> {
    /// Bind a controller to `client`; every remote call observes `cancel`.
    #[must_use]
    pub const fn new(client: &'a dyn RemoteClient, cancel: &'a CancelToken) -> Self {
        Self { client, cancel }
    }

    /// Write the full desired configuration, then read it back.
    ///
    /// # Errors
    ///
    /// Fails with a mapping error before any remote call if `desired` has an
    /// unconfigured group, with a write error if the update call fails, and
    /// with a read or mapping error if the read-back fails.
    pub fn configure(&self, desired: &DeclarativeConfig) -> Result<Configured, Error> {
        let operation = Operation::Configure;
        let identity = self.write(operation, desired)?;
        let observed = self.read_after_write(operation, &desired.project_id, &identity)?;
        Ok(Configured { identity, observed })
    }

    /// Observe the remote configuration.  `Ok(None)` means the service
    /// confirmed there is none.
    ///
    /// # Errors
    ///
    /// Fails if the read call fails for any reason other than absence, or if
    /// the response lacks a required group.
    pub fn read(&self, project_id: &str) -> Result<Option<DeclarativeConfig>, Error> {
        let operation = Operation::Read;
        let Some(remote) = self.fetch(operation, project_id)? else {
            tracing::info!(project_id, "remote config for {project_id} does not exist");
            return Ok(None);
        };
        let identity = identity_of(project_id, &remote.name);
        observe(operation, project_id, &identity, &remote).map(Some)
    }

    /// Re-apply the full desired configuration, then read it back.
    ///
    /// Applying the same configuration twice produces the same remote state.
    /// After a cancelled write the remote state is unknown: the write may
    /// already have landed.  Calling `update` again with the same input
    /// converges either way.
    ///
    /// # Errors
    ///
    /// Same as [`Self::configure`].
    pub fn update(&self, desired: &DeclarativeConfig) -> Result<DeclarativeConfig, Error> {
        let operation = Operation::Update;
        let identity = self.write(operation, desired)?;
        self.read_after_write(operation, &desired.project_id, &identity)
    }

    /// Reset sign-in and authorized domains to empty, keeping `subtype`.
    ///
    /// # Errors
    ///
    /// Fails with a write error if the update call fails.
    pub fn reset(&self, project_id: &str, subtype: &str) -> Result<(), Error> {
        let operation = Operation::Reset;
        require_project_id(operation, project_id)?;

        let body = reset_config(subtype);
        tracing::debug!(project_id, %operation, mask = %body.update_mask(), "writing reset config");
        self.client
            .update_config(self.cancel, project_id, &body)
            .map_err(|e| Error::write(operation, project_id, e))?;
        tracing::info!(project_id, %operation, "reset remote config for {project_id}");
        Ok(())
    }

    /// Configure from a state record and record the observation.
    ///
    /// The identity is recorded as soon as the write succeeds, so a failed
    /// read-back still leaves the record pointing at the written object.
    ///
    /// # Errors
    ///
    /// Same as [`Self::configure`], plus [`Error::Hydration`] if any observed
    /// attribute could not be recorded.
    pub fn create_record(&self, record: &mut StateRecord) -> Result<(), Error> {
        self.write_record(Operation::Configure, record)
    }

    /// Refresh a state record from the remote configuration.
    ///
    /// # Errors
    ///
    /// Same as [`Self::read`], plus [`Error::Hydration`] if any observed
    /// attribute could not be recorded.
    pub fn read_record(&self, record: &mut StateRecord) -> Result<ReadOutcome, Error> {
        let operation = Operation::Read;
        let project_id = record_project_id(operation, record)?;

        match self.read(&project_id)? {
            None => {
                record.clear_id();
                Ok(ReadOutcome::Absent)
            }
            Some(observed) => {
                record_into(operation, &observed, record)?;
                Ok(ReadOutcome::Present)
            }
        }
    }

    /// Update from a state record and record the observation.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_record`].
    pub fn update_record(&self, record: &mut StateRecord) -> Result<(), Error> {
        self.write_record(Operation::Update, record)
    }

    /// Reset using the record's `subtype` and clear its identity.
    ///
    /// # Errors
    ///
    /// Same as [`Self::reset`].  The identity is kept on failure.
    pub fn delete_record(&self, record: &mut StateRecord) -> Result<(), Error> {
        let project_id = record_project_id(Operation::Reset, record)?;
        let subtype = record
            .get(SUBTYPE)
            .and_then(serde_json::Value::as_str)
            .unwrap_or(DEFAULT_SUBTYPE)
            .to_string();

        self.reset(&project_id, &subtype)?;
        record.clear_id();
        Ok(())
    }

    fn write_record(&self, operation: Operation, record: &mut StateRecord) -> Result<(), Error> {
        let project_id = record_project_id(operation, record)?;
        let desired = DeclarativeConfig::from_record(record)
            .map_err(|e| Error::mapping(operation, &project_id, e))?;

        let identity = self.write(operation, &desired)?;
        record.set_id(identity.as_str());
        let observed = self.read_after_write(operation, &project_id, &identity)?;
        record_into(operation, &observed, record)
    }

    /// Project and write `desired`, returning the identity of the result.
    fn write(&self, operation: Operation, desired: &DeclarativeConfig) -> Result<String, Error> {
        let project_id = desired.project_id.as_str();
        require_project_id(operation, project_id)?;
        let body = project(desired).map_err(|e| Error::mapping(operation, project_id, e))?;

        tracing::debug!(project_id, %operation, mask = %body.update_mask(), "writing remote config");
        let stored = self
            .client
            .update_config(self.cancel, project_id, &body)
            .map_err(|e| Error::write(operation, project_id, e))?;

        let identity = identity_of(project_id, &stored.name);
        tracing::info!(project_id, %operation, identity = %identity, "wrote remote config {identity}");
        Ok(identity)
    }

    fn read_after_write(
        &self,
        operation: Operation,
        project_id: &str,
        identity: &str,
    ) -> Result<DeclarativeConfig, Error> {
        let remote = self
            .fetch(operation, project_id)?
            .ok_or_else(|| Error::read(operation, project_id, RemoteError::NotFound))?;
        observe(operation, project_id, identity, &remote)
    }

    fn fetch(&self, operation: Operation, project_id: &str) -> Result<Option<RemoteConfig>, Error> {
        require_project_id(operation, project_id)?;
        tracing::debug!(project_id, %operation, "reading remote config");
        match self.client.get_config(self.cancel, project_id) {
            Ok(remote) => Ok(Some(remote)),
            Err(RemoteError::NotFound) => Ok(None),
            Err(e) => Err(Error::read(operation, project_id, e)),
        }
    }
}

/// Hydrate `remote`, filling in `identity` when the service left the name
/// empty.
fn observe(
    operation: Operation,
    project_id: &str,
    identity: &str,
    remote: &RemoteConfig,
) -> Result<DeclarativeConfig, Error> {
    let mut observed =
        hydrate(project_id, remote).map_err(|e| Error::mapping(operation, project_id, e))?;
    if observed.name.as_deref().is_none_or(str::is_empty) {
        observed.name = Some(identity.to_string());
    }
    Ok(observed)
}

fn record_into(
    operation: Operation,
    observed: &DeclarativeConfig,
    record: &mut StateRecord,
) -> Result<(), Error> {
    let report = record_observed(observed, record);
    if report.is_complete() {
        return Ok(());
    }
    for failure in &report.failures {
        tracing::warn!(project_id = %observed.project_id, %operation, "could not record {failure}");
    }
    Err(Error::Hydration {
        operation,
        project_id: observed.project_id.clone(),
        recorded: report.recorded,
        failures: report.failures,
    })
}

/// The remote `name`, or the conventional resource path when it is empty.
fn identity_of(project_id: &str, name: &str) -> String {
    if name.is_empty() {
        format!("projects/{project_id}/config")
    } else {
        name.to_string()
    }
}

fn require_project_id(operation: Operation, project_id: &str) -> Result<(), Error> {
    if project_id.is_empty() {
        return Err(Error::mapping(
            operation,
            project_id,
            MappingError::MissingProjectId,
        ));
    }
    Ok(())
}

fn record_project_id(operation: Operation, record: &StateRecord) -> Result<String, Error> {
    record
        .project_id()
        .map(str::to_string)
        .ok_or_else(|| Error::mapping(operation, "", MappingError::MissingProjectId))
}
