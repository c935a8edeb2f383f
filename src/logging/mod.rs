//! Logging infrastructure for structured console and file output.
//!
//! Events go through [`tracing`].  Two targets get special rendering:
//! [`STAGE_TARGET`] for section headers and [`DRY_RUN_TARGET`] for changes
//! that a dry run would have made.

mod subscriber;

pub use subscriber::init_subscriber;

/// Target for stage headers, e.g. `tracing::info!(target: "idp::stage", "Apply")`.
pub const STAGE_TARGET: &str = "idp::stage";

/// Target for dry-run lines.
pub const DRY_RUN_TARGET: &str = "idp::dry_run";

/// Serializes environment-variable manipulation across parallel test threads.
#[cfg(test)]
pub(crate) static TEST_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
