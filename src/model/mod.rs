//! The two shapes of an Identity Platform configuration.
//!
//! - **[`declarative`]**: the desired or observed configuration as the
//!   orchestrator holds it, with each singleton group optional
//! - **[`remote`]**: the configuration object as the remote service serves it
pub mod declarative;
pub mod remote;

pub use declarative::{
    DEFAULT_SUBTYPE, DeclarativeConfig, EmailPolicy, NotificationPolicy, PhoneNumberPolicy,
    SendEmailPolicy,
};
pub use remote::{Email, NotificationConfig, PhoneNumber, RemoteConfig, SendEmail, SignInConfig};
