//! Plan command implementation.
use anyhow::Result;

use crate::cancel::CancelToken;
use crate::cli::{GlobalOpts, PlanOpts};
use crate::client::RemoteClient;
use crate::config::desired;
use crate::lifecycle::ConfigLifecycle;
use crate::logging::STAGE_TARGET;
use crate::model::DeclarativeConfig;
use crate::resources::{PlatformConfigResource, Resource, ResourceState};

/// Run the plan command.
///
/// # Errors
///
/// Returns an error if settings or the desired-state file cannot be loaded,
/// or the remote read fails.
pub fn run(global: &GlobalOpts, opts: &PlanOpts, cancel: &CancelToken) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    execute(&setup.client, cancel, opts).map(|_| ())
}

/// Report the drift between the desired-state file and the remote service.
///
/// # Errors
///
/// Returns an error if the desired state cannot be decoded or the remote
/// read fails.
pub fn execute(
    client: &dyn RemoteClient,
    cancel: &CancelToken,
    opts: &PlanOpts,
) -> Result<ResourceState> {
    let desired = DeclarativeConfig::from_record(&desired::load(&opts.desired)?)?;
    let lifecycle = ConfigLifecycle::new(client, cancel);

    tracing::info!(target: STAGE_TARGET, "Planning {}", desired.project_id);
    let resource = PlatformConfigResource::new(desired, &lifecycle);
    let (state, drift) = resource.observe()?;

    match &state {
        ResourceState::Correct => tracing::info!("no changes"),
        ResourceState::Missing => tracing::info!("{} will be configured", resource.description()),
        ResourceState::Incorrect { .. } => {
            for change in &drift {
                tracing::info!("~ {}: {} -> {}", change.name, change.observed, change.desired);
            }
        }
        ResourceState::Invalid { reason } => tracing::warn!("{reason}"),
    }
    Ok(state)
}
