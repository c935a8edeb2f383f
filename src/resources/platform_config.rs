//! Drift check for a project's Identity Platform configuration.
use anyhow::Result;
use serde_json::Value;

use super::{Resource, ResourceState};
use crate::error::ErrorKind;
use crate::lifecycle::ConfigLifecycle;
use crate::mapping::project;
use crate::model::declarative::DeclarativeConfig;
use crate::state::schema::NAME;

/// One attribute whose desired and observed values differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDrift {
    /// Attribute name.
    pub name: &'static str,
    /// Desired value in record layout.
    pub desired: Value,
    /// Observed value in record layout.
    pub observed: Value,
}

/// Compare two models attribute by attribute, ignoring the identity.
#[must_use]
pub fn diff(desired: &DeclarativeConfig, observed: &DeclarativeConfig) -> Vec<AttributeDrift> {
    desired
        .to_attributes()
        .into_iter()
        .zip(observed.to_attributes())
        .filter(|((name, want), (_, have))| *name != NAME && want != have)
        .map(|((name, want), (_, have))| AttributeDrift {
            name,
            desired: want,
            observed: have,
        })
        .collect()
}

/// The Identity Platform configuration of one project, compared against the
/// remote service through a [`ConfigLifecycle`].
#[derive(Debug)]
pub struct PlatformConfigResource<'a> {
    /// Desired configuration.
    pub desired: DeclarativeConfig,
    lifecycle: &'a ConfigLifecycle<'a>,
}

impl<'a> PlatformConfigResource<'a> {
    /// Create a new platform config resource.
    #[must_use]
    pub const fn new(desired: DeclarativeConfig, lifecycle: &'a ConfigLifecycle<'a>) -> Self {
        Self { desired, lifecycle }
    }

    /// Read the remote configuration once and compare it with the desired one.
    ///
    /// The drift list is non-empty only for [`ResourceState::Incorrect`].
    ///
    /// # Errors
    ///
    /// Returns an error if the remote read fails for a reason other than
    /// absence or an incomplete response.
    pub fn observe(&self) -> Result<(ResourceState, Vec<AttributeDrift>)> {
        if let Err(e) = project(&self.desired) {
            let reason = e.to_string();
            return Ok((ResourceState::Invalid { reason }, Vec::new()));
        }

        let observed = match self.lifecycle.read(&self.desired.project_id) {
            Ok(Some(observed)) => observed,
            Ok(None) => return Ok((ResourceState::Missing, Vec::new())),
            Err(e) if e.kind() == ErrorKind::IncompleteRemoteState => {
                let reason = e.to_string();
                return Ok((ResourceState::Invalid { reason }, Vec::new()));
            }
            Err(e) => return Err(e.into()),
        };

        let drift = diff(&self.desired, &observed);
        if drift.is_empty() {
            return Ok((ResourceState::Correct, drift));
        }
        let current = drift
            .iter()
            .map(|d| format!("{}: {}", d.name, d.observed))
            .collect::<Vec<_>>()
            .join(", ");
        Ok((ResourceState::Incorrect { current }, drift))
    }
}

impl Resource for PlatformConfigResource<'_> {
    fn description(&self) -> String {
        format!("identity platform config for {}", self.desired.project_id)
    }

    fn current_state(&self) -> Result<ResourceState> {
        self.observe().map(|(state, _)| state)
    }
}
