//! Remote → declarative hydration and recording of observed state.
use serde_json::Value;

use crate::error::{FieldError, MappingError};
use crate::model::declarative::{
    DeclarativeConfig, EmailPolicy, NotificationPolicy, PhoneNumberPolicy, SendEmailPolicy,
};
use crate::model::remote::RemoteConfig;
use crate::state::StateRecord;

/// Build the observed declarative model from a remote object.
///
/// Every nested group must be present.  An absent domain list hydrates to an
/// empty one.  `project_id` comes from the caller since the remote object
/// does not carry it as a field.
///
/// # Errors
///
/// Returns [`MappingError::IncompleteRemoteState`] naming the first missing
/// group.
pub fn hydrate(project_id: &str, remote: &RemoteConfig) -> Result<DeclarativeConfig, MappingError> {
    let sign_in = present(remote.sign_in.as_ref(), "signIn")?;
    let email = present(sign_in.email.as_ref(), "signIn.email")?;
    let phone_number = present(sign_in.phone_number.as_ref(), "signIn.phoneNumber")?;
    let notification = present(remote.notification.as_ref(), "notification")?;
    let send_email = present(notification.send_email.as_ref(), "notification.sendEmail")?;

    Ok(DeclarativeConfig {
        project_id: project_id.to_string(),
        name: Some(remote.name.clone()),
        email: Some(EmailPolicy {
            enabled: email.enabled,
            password_required: email.password_required,
        }),
        phone_number: Some(PhoneNumberPolicy {
            enabled: phone_number.enabled,
        }),
        notification: Some(NotificationPolicy {
            send_email: Some(SendEmailPolicy {
                callback_uri: send_email.callback_uri.clone(),
            }),
        }),
        subtype: Some(remote.subtype.clone()),
        authorized_domains: remote.authorized_domains.clone().unwrap_or_default(),
    })
}

fn present<'a, T>(group: Option<&'a T>, name: &'static str) -> Result<&'a T, MappingError> {
    group.ok_or(MappingError::IncompleteRemoteState { group: name })
}

/// Outcome of writing an observation into a state record field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Attributes that were written.
    pub recorded: Vec<String>,
    /// Attributes that were rejected, with reasons.
    pub failures: Vec<FieldError>,
}

impl HydrationReport {
    /// `true` when every attribute was written.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write every attribute of `observed` into `record`.
///
/// Each attribute is assigned independently; a rejected one is reported and
/// the rest are still written.  The record's identity and `project_id` are
/// left alone.
pub fn record_observed(observed: &DeclarativeConfig, record: &mut StateRecord) -> HydrationReport {
    record_attributes(observed.to_attributes(), record)
}

pub(crate) fn record_attributes(
    attributes: Vec<(&'static str, Value)>,
    record: &mut StateRecord,
) -> HydrationReport {
    let mut report = HydrationReport::default();
    for (name, value) in attributes {
        match record.set(name, value) {
            Ok(()) => report.recorded.push(name.to_string()),
            Err(failure) => report.failures.push(failure),
        }
    }
    report
}
