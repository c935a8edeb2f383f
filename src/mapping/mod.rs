//! Translation between the declarative and remote configuration models.
//!
//! - **[`project`]**: declarative → remote, for writes
//! - **[`hydrate`]**: remote → declarative, for observations, plus recording
//!   the observation into a state record
//!
//! Both directions are pure; neither touches the network or the record's
//! identity.
pub mod hydrate;
pub mod project;

pub use hydrate::{HydrationReport, hydrate, record_observed};
pub use project::{project, reset_config};
