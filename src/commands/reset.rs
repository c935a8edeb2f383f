//! Reset command implementation.
use anyhow::Result;

use crate::cancel::CancelToken;
use crate::cli::{GlobalOpts, StateOpts};
use crate::client::RemoteClient;
use crate::lifecycle::ConfigLifecycle;
use crate::logging::STAGE_TARGET;

/// Run the reset command.
///
/// # Errors
///
/// Returns an error if settings or the state file cannot be loaded, or the
/// remote write fails.
pub fn run(global: &GlobalOpts, opts: &StateOpts, cancel: &CancelToken) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    execute(&setup.client, cancel, opts)
}

/// Reset the configuration named by the state file and clear its identity.
///
/// # Errors
///
/// Returns an error if the state file is missing or the write fails.  The
/// state file keeps its identity on error.
pub fn execute(client: &dyn RemoteClient, cancel: &CancelToken, opts: &StateOpts) -> Result<()> {
    let mut record = super::load_existing_state(&opts.state)?;
    tracing::info!(target: STAGE_TARGET, "Resetting {}", record.project_id().unwrap_or("<unset>"));

    ConfigLifecycle::new(client, cancel).delete_record(&mut record)?;
    record.save(&opts.state)?;
    tracing::info!("sign-in and authorized domains cleared");
    Ok(())
}
