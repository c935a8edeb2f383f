//! Declarative → remote projection.
use crate::error::MappingError;
use crate::model::declarative::DeclarativeConfig;
use crate::model::remote::{
    Email, NotificationConfig, PhoneNumber, RemoteConfig, SendEmail, SignInConfig,
};

/// Build the remote object for a full write of `config`.
///
/// Every singleton group must be configured; the remote write replaces all
/// of them, so an unconfigured group cannot be expressed.  `name` is never
/// projected.  The domain list is always present, empty or not, so that
/// clearing it is distinguishable from leaving it out.
///
/// # Errors
///
/// Returns [`MappingError::InvalidShape`] naming the first unconfigured
/// group.
pub fn project(config: &DeclarativeConfig) -> Result<RemoteConfig, MappingError> {
    let email = required(config.email.as_ref(), "email")?;
    let phone_number = required(config.phone_number.as_ref(), "phone_number")?;
    let notification = required(config.notification.as_ref(), "notification")?;
    let send_email = required(notification.send_email.as_ref(), "notification.send_email")?;

    Ok(RemoteConfig {
        name: String::new(),
        sign_in: Some(SignInConfig {
            email: Some(Email {
                enabled: email.enabled,
                password_required: email.password_required,
            }),
            phone_number: Some(PhoneNumber {
                enabled: phone_number.enabled,
            }),
        }),
        notification: Some(NotificationConfig {
            send_email: Some(SendEmail {
                callback_uri: send_email.callback_uri.clone(),
            }),
        }),
        subtype: config.effective_subtype().to_string(),
        authorized_domains: Some(config.authorized_domains.clone()),
    })
}

/// Build the minimal object written by a reset: sign-in and domains cleared,
/// `subtype` kept.
#[must_use]
pub fn reset_config(subtype: &str) -> RemoteConfig {
    RemoteConfig {
        subtype: subtype.to_string(),
        ..RemoteConfig::default()
    }
}

fn required<'a, T>(group: Option<&'a T>, name: &str) -> Result<&'a T, MappingError> {
    group.ok_or_else(|| MappingError::InvalidShape {
        group: name.to_string(),
        expected: "exactly one",
        found: 0,
    })
}
