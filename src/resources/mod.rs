//! Check-only resources that compare desired configuration with the remote
//! service.
pub mod platform_config;

pub use platform_config::{AttributeDrift, PlatformConfigResource, diff};

use anyhow::Result;

/// State of a managed resource relative to its desired configuration.
///
/// # Examples
///
/// ```
/// use identity_platform_config::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "subtype: \"FIREBASE_AUTH\"".into() };
/// let skip = ResourceState::Invalid { reason: "email: expected exactly one element, found 0".into() };
///
/// assert_ne!(missing, correct);
/// assert_eq!(correct, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// The remote configuration does not exist.
    Missing,
    /// The remote configuration matches the desired state.
    Correct,
    /// The remote configuration exists but differs from the desired state.
    Incorrect {
        /// The differing remote values.
        current: String,
    },
    /// The desired state cannot be applied as written, or the remote state
    /// cannot be interpreted.
    Invalid {
        /// Reason why the resource cannot be compared.
        reason: String,
    },
}

/// Interface for resources that can determine their own state.
///
/// # Examples
///
/// ```ignore
/// let state = resource.current_state()?;
/// if resource.needs_change()? {
///     lifecycle.update(&desired)?;
/// }
/// ```
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined, e.g. the remote
    /// call failed or was cancelled.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the current state cannot be determined (propagates
    /// errors from `current_state()`).
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}
