//! Conversion between [`StateRecord`] attributes and [`DeclarativeConfig`].
//!
//! Decoding validates the record against the schema first, so the extraction
//! below can rely on every present value having its declared kind.  Scalar
//! defaults apply only inside a present block element.
use serde_json::{Map, Value, json};

use super::StateRecord;
use super::schema::{
    AUTHORIZED_DOMAINS, EMAIL, NAME, NOTIFICATION, PHONE_NUMBER, SEND_EMAIL, SUBTYPE,
};
use crate::error::MappingError;
use crate::model::declarative::{
    DEFAULT_EMAIL_ENABLED, DEFAULT_PASSWORD_REQUIRED, DEFAULT_PHONE_ENABLED, DeclarativeConfig,
    EmailPolicy, NotificationPolicy, PhoneNumberPolicy, SendEmailPolicy,
};

impl DeclarativeConfig {
    /// Decode a state record.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] if the record does not conform to the
    /// schema or carries no `project_id`.
    pub fn from_record(record: &StateRecord) -> Result<Self, MappingError> {
        record.validate()?;
        let project_id = record
            .project_id()
            .ok_or(MappingError::MissingProjectId)?
            .to_string();

        let email = first_block(record.get(EMAIL)).map(|block| EmailPolicy {
            enabled: bool_or(block, "enabled", DEFAULT_EMAIL_ENABLED),
            password_required: bool_or(block, "password_required", DEFAULT_PASSWORD_REQUIRED),
        });
        let phone_number = first_block(record.get(PHONE_NUMBER)).map(|block| PhoneNumberPolicy {
            enabled: bool_or(block, "enabled", DEFAULT_PHONE_ENABLED),
        });
        let notification = first_block(record.get(NOTIFICATION)).map(|block| NotificationPolicy {
            send_email: first_block(block.get(SEND_EMAIL)).map(|send| SendEmailPolicy {
                callback_uri: send
                    .get("callback_uri")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
        });

        Ok(Self {
            project_id,
            name: string_attr(record, NAME),
            email,
            phone_number,
            notification,
            subtype: string_attr(record, SUBTYPE),
            authorized_domains: record
                .get(AUTHORIZED_DOMAINS)
                .and_then(Value::as_array)
                .map(|domains| {
                    domains
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Encode every attribute except `project_id` in record layout.
    ///
    /// Unconfigured groups encode as `null` so that writing them clears any
    /// previous value.  `subtype` is always written with its default applied.
    #[must_use]
    pub fn to_attributes(&self) -> Vec<(&'static str, Value)> {
        vec![
            (NAME, self.name.as_ref().map_or(Value::Null, |n| json!(n))),
            (
                EMAIL,
                self.email.map_or(Value::Null, |e| {
                    json!([{"enabled": e.enabled, "password_required": e.password_required}])
                }),
            ),
            (
                PHONE_NUMBER,
                self.phone_number
                    .map_or(Value::Null, |p| json!([{"enabled": p.enabled}])),
            ),
            (
                NOTIFICATION,
                self.notification.as_ref().map_or(Value::Null, |n| {
                    let send_email = n
                        .send_email
                        .as_ref()
                        .map_or(Value::Null, |s| json!([{"callback_uri": s.callback_uri}]));
                    json!([{"send_email": send_email}])
                }),
            ),
            (SUBTYPE, json!(self.effective_subtype())),
            (AUTHORIZED_DOMAINS, json!(self.authorized_domains)),
        ]
    }
}

fn first_block(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_object)
}

fn bool_or(block: &Map<String, Value>, key: &str, default: bool) -> bool {
    block.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn string_attr(record: &StateRecord, name: &str) -> Option<String> {
    record.get(name).and_then(Value::as_str).map(str::to_string)
}
