//! Identity Platform configuration reconciler.
//!
//! Reconciles a declared Identity Platform configuration for a project with
//! the configuration held by the remote admin API, with create, read, update
//! and delete semantics suited to an infrastructure-as-code engine.  The
//! remote service keeps exactly one configuration object per project, so
//! "create" writes the full configuration and "delete" resets it.
//!
//! The public API is organised into these layers:
//!
//! - **[`model`]**: the declarative and remote configuration shapes
//! - **[`state`]**: the persisted state record, its schema and codec
//! - **[`mapping`]**: projection and hydration between the two models
//! - **[`lifecycle`]**: configure / read / update / reset over a [`client::RemoteClient`]
//! - **[`resources`]**: drift detection on top of the lifecycle read
//! - **[`commands`]**: top-level subcommand orchestration (`apply`, `plan`, `refresh`, `reset`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cancel;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod resources;
pub mod state;

pub use error::{Error, ErrorKind, Operation};
