//! Refresh command implementation.
use anyhow::Result;

use crate::cancel::CancelToken;
use crate::cli::{GlobalOpts, StateOpts};
use crate::client::RemoteClient;
use crate::lifecycle::{ConfigLifecycle, ReadOutcome};
use crate::logging::STAGE_TARGET;

/// Run the refresh command.
///
/// # Errors
///
/// Returns an error if settings or the state file cannot be loaded, or the
/// remote read fails.
pub fn run(global: &GlobalOpts, opts: &StateOpts, cancel: &CancelToken) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    execute(&setup.client, cancel, opts).map(|_| ())
}

/// Read the remote configuration into the state file.
///
/// On confirmed absence the identity is cleared and the file rewritten so
/// that the next `apply` configures again.
///
/// # Errors
///
/// Returns an error if the state file is missing or the read fails.  The
/// state file is left untouched on error.
pub fn execute(
    client: &dyn RemoteClient,
    cancel: &CancelToken,
    opts: &StateOpts,
) -> Result<ReadOutcome> {
    let mut record = super::load_existing_state(&opts.state)?;
    tracing::info!(target: STAGE_TARGET, "Refreshing {}", record.project_id().unwrap_or("<unset>"));

    let outcome = ConfigLifecycle::new(client, cancel).read_record(&mut record)?;
    record.save(&opts.state)?;

    match outcome {
        ReadOutcome::Present => tracing::info!("recorded {}", record.id().unwrap_or("observation")),
        ReadOutcome::Absent => tracing::warn!("remote config no longer exists; identity cleared"),
    }
    Ok(outcome)
}
