//! Apply command implementation.
use anyhow::{Result, bail};

use crate::cancel::CancelToken;
use crate::cli::{ApplyOpts, GlobalOpts};
use crate::client::RemoteClient;
use crate::config::desired;
use crate::lifecycle::ConfigLifecycle;
use crate::logging::{DRY_RUN_TARGET, STAGE_TARGET};
use crate::model::DeclarativeConfig;
use crate::resources::{PlatformConfigResource, Resource, ResourceState};
use crate::state::StateRecord;

/// What `apply` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The state had no identity; the configuration was written and the
    /// identity recorded.
    Configured,
    /// The state had an identity; the configuration was re-applied.
    Updated,
    /// Dry run: nothing was written.
    Planned(ResourceState),
}

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if settings, desired state, or state cannot be loaded,
/// or if the lifecycle operation fails.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, cancel: &CancelToken) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    execute(&setup.client, cancel, opts).map(|_| ())
}

/// Apply the desired-state file against `client`.
///
/// The identity recorded in the existing state file decides between
/// configure and update.  The state file is written whenever the operation
/// succeeds or a new identity was recorded before a later step failed.
///
/// # Errors
///
/// Returns an error if loading fails or the lifecycle operation fails.
pub fn execute(
    client: &dyn RemoteClient,
    cancel: &CancelToken,
    opts: &ApplyOpts,
) -> Result<ApplyOutcome> {
    let mut record = desired::load(&opts.desired)?;
    let prior_id = StateRecord::load(&opts.state)?.and_then(|s| s.id().map(str::to_string));
    if let Some(id) = &prior_id {
        record.set_id(id.as_str());
    }

    let lifecycle = ConfigLifecycle::new(client, cancel);

    if opts.dry_run {
        return plan_only(&lifecycle, &record);
    }

    let (result, outcome) = if prior_id.is_none() {
        tracing::info!(target: STAGE_TARGET, "Configuring {}", record.project_id().unwrap_or("<unset>"));
        (lifecycle.create_record(&mut record), ApplyOutcome::Configured)
    } else {
        tracing::info!(target: STAGE_TARGET, "Updating {}", record.project_id().unwrap_or("<unset>"));
        (lifecycle.update_record(&mut record), ApplyOutcome::Updated)
    };

    if result.is_ok() || record.id() != prior_id.as_deref() {
        record.save(&opts.state)?;
        tracing::debug!("wrote {}", opts.state.display());
    }
    result?;

    tracing::info!(
        "{} is {}",
        record.project_id().unwrap_or_default(),
        record.id().unwrap_or_default()
    );
    Ok(outcome)
}

fn plan_only(lifecycle: &ConfigLifecycle<'_>, record: &StateRecord) -> Result<ApplyOutcome> {
    let desired = DeclarativeConfig::from_record(record)?;
    let resource = PlatformConfigResource::new(desired, lifecycle);
    let state = resource.current_state()?;

    match &state {
        ResourceState::Correct => {
            tracing::info!("{} is up to date", resource.description());
        }
        ResourceState::Missing => {
            tracing::info!(target: DRY_RUN_TARGET, "would configure {}", resource.description());
        }
        ResourceState::Incorrect { current } => {
            tracing::info!(
                target: DRY_RUN_TARGET,
                "would update {} (currently {current})",
                resource.description()
            );
        }
        ResourceState::Invalid { reason } => {
            bail!("cannot apply {}: {reason}", resource.description());
        }
    }
    Ok(ApplyOutcome::Planned(state))
}
