//! Declarative configuration model.
//!
//! Each singleton group is an `Option`: `None` means "not configured" and is
//! kept distinct from a group configured with default values.  The state
//! record stores the same groups as zero-or-one element lists; see
//! [`crate::state::codec`] for the conversion.

/// Subtype assumed when the caller does not set one.
pub const DEFAULT_SUBTYPE: &str = "IDENTITY_PLATFORM";

/// Default for `email.enabled` inside a configured email group.
pub const DEFAULT_EMAIL_ENABLED: bool = true;

/// Default for `email.password_required` inside a configured email group.
pub const DEFAULT_PASSWORD_REQUIRED: bool = true;

/// Default for `phone_number.enabled` inside a configured phone group.
pub const DEFAULT_PHONE_ENABLED: bool = true;

/// Email sign-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailPolicy {
    /// Whether email sign-in is enabled.
    pub enabled: bool,
    /// Whether a password is required (as opposed to email-link sign-in).
    pub password_required: bool,
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_EMAIL_ENABLED,
            password_required: DEFAULT_PASSWORD_REQUIRED,
        }
    }
}

/// Phone-number sign-in policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneNumberPolicy {
    /// Whether phone-number sign-in is enabled.
    pub enabled: bool,
}

impl Default for PhoneNumberPolicy {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_PHONE_ENABLED,
        }
    }
}

/// Outbound email settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendEmailPolicy {
    /// Action URL embedded in notification emails.
    pub callback_uri: String,
}

/// Notification policy; `send_email` is itself a singleton group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPolicy {
    /// Email delivery settings.
    pub send_email: Option<SendEmailPolicy>,
}

/// Desired or observed Identity Platform configuration for one project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarativeConfig {
    /// Remote scope the configuration belongs to.  Supplied by the caller.
    pub project_id: String,
    /// Remote-assigned identifier; only ever populated from an observation.
    pub name: Option<String>,
    /// Email sign-in group.
    pub email: Option<EmailPolicy>,
    /// Phone-number sign-in group.
    pub phone_number: Option<PhoneNumberPolicy>,
    /// Notification group.
    pub notification: Option<NotificationPolicy>,
    /// Platform classification; `None` means [`DEFAULT_SUBTYPE`].
    pub subtype: Option<String>,
    /// Domains allowed for OAuth redirects, in caller order.
    pub authorized_domains: Vec<String>,
}

impl DeclarativeConfig {
    /// Start an unconfigured model for `project_id`.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Self::default()
        }
    }

    /// The subtype that will be written, applying the default.
    #[must_use]
    pub fn effective_subtype(&self) -> &str {
        self.subtype.as_deref().unwrap_or(DEFAULT_SUBTYPE)
    }

    /// Copy of `self` with the identity removed, for comparing a desired
    /// model against an observed one.
    #[must_use]
    pub fn without_name(&self) -> Self {
        Self {
            name: None,
            ..self.clone()
        }
    }
}
