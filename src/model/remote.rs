//! Remote configuration model, mirroring the service's JSON resource.
//!
//! Nested groups are optional so that a response missing one can be told
//! apart from a group holding default values.  Booleans default to `false`
//! because the service omits false values from its responses.
use serde::{Deserialize, Serialize};

/// Email sign-in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    /// Whether email sign-in is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Whether a password is required.
    #[serde(default)]
    pub password_required: bool,
}

/// Phone-number sign-in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    /// Whether phone-number sign-in is enabled.
    #[serde(default)]
    pub enabled: bool,
}

/// Sign-in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInConfig {
    /// Email sign-in group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    /// Phone-number sign-in group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumber>,
}

impl SignInConfig {
    /// Sign-in settings with every method present and switched off, as the
    /// service reports them after a reset.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            email: Some(Email::default()),
            phone_number: Some(PhoneNumber::default()),
        }
    }
}

/// Outbound email settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmail {
    /// Action URL embedded in notification emails.
    #[serde(default)]
    pub callback_uri: String,
}

/// Notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    /// Email delivery group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_email: Option<SendEmail>,
}

/// The per-project configuration object owned by the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    /// Server-assigned resource name, e.g. `projects/demo/config`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Sign-in settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_in: Option<SignInConfig>,
    /// Notification settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationConfig>,
    /// Platform classification.
    #[serde(default)]
    pub subtype: String,
    /// Domains allowed for OAuth redirects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_domains: Option<Vec<String>>,
}

impl RemoteConfig {
    /// Top-level fields an update with this object replaces.
    ///
    /// `signIn` and `authorizedDomains` are always replaced, so leaving them
    /// out of the body clears them.  `notification` is only replaced when
    /// present.
    #[must_use]
    pub fn update_mask(&self) -> String {
        let mut fields = vec!["signIn", "subtype", "authorizedDomains"];
        if self.notification.is_some() {
            fields.push("notification");
        }
        fields.join(",")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_response() {
        let body = r#"{
            "name": "projects/demo/config",
            "signIn": {
                "email": {"enabled": true},
                "phoneNumber": {"enabled": true, "testPhoneNumbers": {}},
                "hashConfig": {"algorithm": "SCRYPT"}
            },
            "notification": {"sendEmail": {"callbackUri": "https://demo/cb", "method": "DEFAULT"}},
            "subtype": "IDENTITY_PLATFORM",
            "authorizedDomains": ["localhost", "demo.firebaseapp.com"]
        }"#;
        let config: RemoteConfig = serde_json::from_str(body).unwrap();
        assert_eq!(config.name, "projects/demo/config");
        let sign_in = config.sign_in.unwrap();
        assert_eq!(
            sign_in.email,
            Some(Email {
                enabled: true,
                password_required: false
            })
        );
        assert_eq!(sign_in.phone_number, Some(PhoneNumber { enabled: true }));
        assert_eq!(
            config.notification.unwrap().send_email.unwrap().callback_uri,
            "https://demo/cb"
        );
        assert_eq!(
            config.authorized_domains.unwrap(),
            vec!["localhost", "demo.firebaseapp.com"]
        );
    }

    #[test]
    fn missing_groups_deserialize_as_none() {
        let config: RemoteConfig =
            serde_json::from_str(r#"{"name": "projects/demo/config", "signIn": {}}"#).unwrap();
        let sign_in = config.sign_in.unwrap();
        assert!(sign_in.email.is_none());
        assert!(sign_in.phone_number.is_none());
        assert!(config.notification.is_none());
        assert!(config.authorized_domains.is_none());
    }

    #[test]
    fn reset_body_omits_cleared_groups() {
        let reset = RemoteConfig {
            subtype: "IDENTITY_PLATFORM".to_string(),
            ..RemoteConfig::default()
        };
        let body = serde_json::to_string(&reset).unwrap();
        insta::assert_snapshot!(body, @r#"{"subtype":"IDENTITY_PLATFORM"}"#);
    }

    #[test]
    fn empty_domain_list_is_serialized() {
        let config = RemoteConfig {
            authorized_domains: Some(Vec::new()),
            ..RemoteConfig::default()
        };
        let body = serde_json::to_string(&config).unwrap();
        assert!(body.contains(r#""authorizedDomains":[]"#), "got: {body}");
    }

    #[test]
    fn update_mask_includes_notification_only_when_present() {
        let minimal = RemoteConfig::default();
        assert_eq!(minimal.update_mask(), "signIn,subtype,authorizedDomains");

        let full = RemoteConfig {
            notification: Some(NotificationConfig::default()),
            ..RemoteConfig::default()
        };
        assert_eq!(
            full.update_mask(),
            "signIn,subtype,authorizedDomains,notification"
        );
    }
}
