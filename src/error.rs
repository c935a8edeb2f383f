//! Domain-specific error types for the configuration reconciler.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! The mapping layer, the remote client, and the file loaders each return
//! their own typed error; the lifecycle controller wraps them in [`Error`]
//! together with the operation name and the `project_id` being reconciled.
//! Command handlers at the CLI boundary convert to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! Error                      (operation + project_id context)
//! ├── Mapping(MappingError)  InvalidShape, InvalidElementType, IncompleteRemoteState
//! ├── RemoteRead(RemoteError)
//! ├── RemoteWrite(RemoteError)
//! ├── Cancelled
//! ├── NotFound
//! └── Hydration              per-field FieldError list
//!
//! ConfigError                settings, desired-state and state files
//! ```

use std::fmt;

use thiserror::Error;

/// Lifecycle operation that produced an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// First write of a desired configuration (create).
    Configure,
    /// Observation of the remote configuration.
    Read,
    /// Re-application of a desired configuration to an existing identity.
    Update,
    /// Delete, implemented as a reset to an empty configuration.
    Reset,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configure => "configure",
            Self::Read => "read",
            Self::Update => "update",
            Self::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Errors raised while translating between the declarative and remote models.
///
/// These always indicate a data contract violation and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A singleton group has the wrong number of elements.
    #[error("{group}: expected {expected} element, found {found}")]
    InvalidShape {
        /// Attribute path of the offending group (e.g. `notification.send_email`).
        group: String,
        /// Cardinality the group must satisfy (`"exactly one"` or `"at most one"`).
        expected: &'static str,
        /// Number of elements actually present.
        found: usize,
    },

    /// A value inside the declarative record has the wrong kind.
    #[error("{path}: expected {expected}, found {found}")]
    InvalidElementType {
        /// Attribute path of the offending value (e.g. `email[0].enabled`).
        path: String,
        /// Kind the schema requires.
        expected: &'static str,
        /// Kind that was found.
        found: &'static str,
    },

    /// The declarative record carries an attribute the schema does not define.
    #[error("{path}: unsupported attribute")]
    UnknownAttribute {
        /// Attribute path of the unknown key.
        path: String,
    },

    /// The caller supplied a value for an attribute only the service assigns.
    #[error("{path}: computed attribute cannot be set")]
    ComputedAttribute {
        /// Attribute path of the computed value.
        path: String,
    },

    /// The caller did not supply the scope the configuration belongs to.
    #[error("project_id is required")]
    MissingProjectId,

    /// The remote service returned a configuration without a required group.
    #[error("remote config is missing {group}")]
    IncompleteRemoteState {
        /// Remote path of the missing group (e.g. `notification.sendEmail`).
        group: &'static str,
    },
}

/// Errors returned by a [`RemoteClient`](crate::client::RemoteClient).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The remote configuration does not exist for the requested scope.
    #[error("remote config not found")]
    NotFound,

    /// The call was abandoned because the cancel token fired.
    #[error("request cancelled")]
    Cancelled,

    /// The service answered with a non-success status.
    #[error("HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be delivered or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// No access token could be obtained for the request.
    #[error("credentials unavailable: {0}")]
    Credentials(String),
}

impl From<ureq::Error> for RemoteError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(404) => Self::NotFound,
            ureq::Error::StatusCode(status) => Self::Status { status },
            ureq::Error::Json(e) => Self::InvalidResponse(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// A single attribute that could not be written into a state record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct FieldError {
    /// Attribute name.
    pub field: String,
    /// Why the assignment was rejected.
    pub reason: String,
}

/// Classification of an [`Error`] onto the reconciler's failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed singleton group or record structure.
    InvalidShape,
    /// Wrong scalar kind inside a group.
    InvalidElementType,
    /// The remote object lacks a required nested group.
    IncompleteRemoteState,
    /// The remote read call failed.
    RemoteRead,
    /// The remote write call failed.
    RemoteWrite,
    /// The operation was cancelled mid-call.
    Cancelled,
    /// The remote object does not exist.
    NotFound,
    /// Some observed fields could not be recorded in the state record.
    StateAssignment,
}

/// Errors returned by the lifecycle controller.
///
/// Every variant names the operation and the `project_id` so a failure can
/// be traced back to its input without exposing remote-service internals.
#[derive(Error, Debug)]
pub enum Error {
    /// Projection or hydration rejected the data.
    #[error("{operation} {project_id}: {source}")]
    Mapping {
        /// Operation in progress.
        operation: Operation,
        /// Scope being reconciled.
        project_id: String,
        /// Underlying mapping failure.
        #[source]
        source: MappingError,
    },

    /// Fetching the remote configuration failed.
    #[error("{operation} {project_id}: reading remote config failed: {source}")]
    RemoteRead {
        /// Operation in progress.
        operation: Operation,
        /// Scope being reconciled.
        project_id: String,
        /// Underlying client failure.
        #[source]
        source: RemoteError,
    },

    /// Writing the remote configuration failed.
    #[error("{operation} {project_id}: writing remote config failed: {source}")]
    RemoteWrite {
        /// Operation in progress.
        operation: Operation,
        /// Scope being reconciled.
        project_id: String,
        /// Underlying client failure.
        #[source]
        source: RemoteError,
    },

    /// The cancel token fired while a remote call was outstanding.
    #[error("{operation} {project_id}: cancelled")]
    Cancelled {
        /// Operation in progress.
        operation: Operation,
        /// Scope being reconciled.
        project_id: String,
    },

    /// The remote configuration does not exist.
    #[error("{operation} {project_id}: remote config does not exist")]
    NotFound {
        /// Operation in progress.
        operation: Operation,
        /// Scope being reconciled.
        project_id: String,
    },

    /// Hydration succeeded but some fields could not be recorded.
    #[error(
        "{operation} {project_id}: {} field(s) could not be recorded: {}",
        .failures.len(),
        join_failures(.failures)
    )]
    Hydration {
        /// Operation in progress.
        operation: Operation,
        /// Scope being reconciled.
        project_id: String,
        /// Fields that were written before and after the failures.
        recorded: Vec<String>,
        /// Fields that were rejected.
        failures: Vec<FieldError>,
    },
}

fn join_failures(failures: &[FieldError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Wrap a mapping failure with its operation context.
    pub(crate) fn mapping(operation: Operation, project_id: &str, source: MappingError) -> Self {
        Self::Mapping {
            operation,
            project_id: project_id.to_string(),
            source,
        }
    }

    /// Wrap a failed read call, keeping cancellation distinct.
    pub(crate) fn read(operation: Operation, project_id: &str, source: RemoteError) -> Self {
        let project_id = project_id.to_string();
        match source {
            RemoteError::Cancelled => Self::Cancelled {
                operation,
                project_id,
            },
            RemoteError::NotFound => Self::NotFound {
                operation,
                project_id,
            },
            source => Self::RemoteRead {
                operation,
                project_id,
                source,
            },
        }
    }

    /// Wrap a failed write call, keeping cancellation distinct.
    pub(crate) fn write(operation: Operation, project_id: &str, source: RemoteError) -> Self {
        let project_id = project_id.to_string();
        match source {
            RemoteError::Cancelled => Self::Cancelled {
                operation,
                project_id,
            },
            source => Self::RemoteWrite {
                operation,
                project_id,
                source,
            },
        }
    }

    /// Classify this error onto the failure taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Mapping { source, .. } => match source {
                MappingError::InvalidShape { .. }
                | MappingError::UnknownAttribute { .. }
                | MappingError::ComputedAttribute { .. }
                | MappingError::MissingProjectId => ErrorKind::InvalidShape,
                MappingError::InvalidElementType { .. } => ErrorKind::InvalidElementType,
                MappingError::IncompleteRemoteState { .. } => ErrorKind::IncompleteRemoteState,
            },
            Self::RemoteRead { .. } => ErrorKind::RemoteRead,
            Self::RemoteWrite { .. } => ErrorKind::RemoteWrite,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Hydration { .. } => ErrorKind::StateAssignment,
        }
    }

    /// The operation that failed.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Mapping { operation, .. }
            | Self::RemoteRead { operation, .. }
            | Self::RemoteWrite { operation, .. }
            | Self::Cancelled { operation, .. }
            | Self::NotFound { operation, .. }
            | Self::Hydration { operation, .. } => *operation,
        }
    }
}

/// Errors that arise from loading settings, desired-state, or state files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing a file.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path to the file involved.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file contains a syntax error that prevents parsing.
    #[error("Invalid syntax in {file}: {message}")]
    InvalidSyntax {
        /// Path to the file that failed to parse.
        file: String,
        /// Parser message.
        message: String,
    },

    /// The file parses but holds attributes the caller may not set.
    #[error("Invalid desired state in {file}: {source}")]
    InvalidDesiredState {
        /// Path to the desired-state file.
        file: String,
        /// The offending attribute.
        source: MappingError,
    },
}
