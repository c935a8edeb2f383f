//! Static attribute schema for configuration state records.
//!
//! The schema describes the shape the orchestrator stores: scalars, lists of
//! scalars, and singleton groups (lists holding at most one block).  It is
//! used both to validate incoming desired state and to guard every field
//! written back during hydration.
use serde_json::{Map, Value};

use crate::error::MappingError;

/// Attribute name of the caller-supplied scope.
pub const PROJECT_ID: &str = "project_id";
/// Attribute name of the remote-assigned identifier.
pub const NAME: &str = "name";
/// Attribute name of the email sign-in group.
pub const EMAIL: &str = "email";
/// Attribute name of the phone-number sign-in group.
pub const PHONE_NUMBER: &str = "phone_number";
/// Attribute name of the notification group.
pub const NOTIFICATION: &str = "notification";
/// Attribute name of the nested send-email group.
pub const SEND_EMAIL: &str = "send_email";
/// Attribute name of the subtype classification.
pub const SUBTYPE: &str = "subtype";
/// Attribute name of the authorized domain list.
pub const AUTHORIZED_DOMAINS: &str = "authorized_domains";

/// Value kind of a schema attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A string scalar.
    String,
    /// A boolean scalar.
    Bool,
    /// An ordered list whose elements all have the given kind.
    List(&'static Kind),
    /// A list holding zero or one block with the given attributes.
    Singleton(&'static [Attribute]),
}

impl Kind {
    /// Short name used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::List(_) => "list",
            Self::Singleton(_) => "list of blocks",
        }
    }

    /// Validate `value` against this kind.  `path` names the value in errors.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::InvalidElementType`] for a kind mismatch,
    /// [`MappingError::InvalidShape`] for a singleton list longer than one,
    /// and [`MappingError::UnknownAttribute`] for undeclared block keys.
    pub fn check(&self, path: &str, value: &Value) -> Result<(), MappingError> {
        let mismatch = || MappingError::InvalidElementType {
            path: path.to_string(),
            expected: self.describe(),
            found: value_kind(value),
        };

        match self {
            Self::String if value.is_string() => Ok(()),
            Self::Bool if value.is_boolean() => Ok(()),
            Self::String | Self::Bool => Err(mismatch()),
            Self::List(element) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                for (i, item) in items.iter().enumerate() {
                    element.check(&format!("{path}[{i}]"), item)?;
                }
                Ok(())
            }
            Self::Singleton(attributes) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                if items.len() > 1 {
                    return Err(MappingError::InvalidShape {
                        group: path.to_string(),
                        expected: "at most one",
                        found: items.len(),
                    });
                }
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}[{i}]");
                    let block = item
                        .as_object()
                        .ok_or_else(|| MappingError::InvalidElementType {
                            path: item_path.clone(),
                            expected: "block",
                            found: value_kind(item),
                        })?;
                    check_block(attributes, &item_path, block)?;
                }
                Ok(())
            }
        }
    }
}

/// Whether an attribute is written by the caller or only by observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Caller-writable.
    Optional,
    /// Populated only from the remote service.
    Computed,
}

/// A named, typed attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as stored in the record.
    pub name: &'static str,
    /// Value kind.
    pub kind: Kind,
    /// Who writes the attribute.
    pub mode: Mode,
}

impl Attribute {
    /// A caller-writable attribute.
    #[must_use]
    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            mode: Mode::Optional,
        }
    }

    /// An attribute populated only by observation.
    #[must_use]
    pub const fn computed(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            mode: Mode::Computed,
        }
    }
}

/// The set of top-level attributes a record may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Declared attributes.
    pub attributes: &'static [Attribute],
}

impl Schema {
    /// Look up a top-level attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Validate a full attribute map.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] found, in attribute-name order.
    pub fn check(&self, attributes: &Map<String, Value>) -> Result<(), MappingError> {
        check_block(self.attributes, "", attributes)
    }

    /// Reject caller-supplied values for computed attributes.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::ComputedAttribute`] for the first computed
    /// attribute holding a non-null value.
    pub fn check_writable(&self, attributes: &Map<String, Value>) -> Result<(), MappingError> {
        let computed = self
            .attributes
            .iter()
            .filter(|a| a.mode == Mode::Computed)
            .find(|a| attributes.get(a.name).is_some_and(|v| !v.is_null()));
        match computed {
            Some(attribute) => Err(MappingError::ComputedAttribute {
                path: attribute.name.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn check_block(
    declared: &[Attribute],
    prefix: &str,
    block: &Map<String, Value>,
) -> Result<(), MappingError> {
    for (key, value) in block {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let attribute = declared
            .iter()
            .find(|a| a.name == key)
            .ok_or_else(|| MappingError::UnknownAttribute { path: path.clone() })?;
        if !value.is_null() {
            attribute.kind.check(&path, value)?;
        }
    }
    Ok(())
}

/// Name the JSON kind of `value` for error messages.
#[must_use]
pub const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "block",
    }
}

const EMAIL_BLOCK: &[Attribute] = &[
    Attribute::optional("enabled", Kind::Bool),
    Attribute::optional("password_required", Kind::Bool),
];

const PHONE_NUMBER_BLOCK: &[Attribute] = &[Attribute::optional("enabled", Kind::Bool)];

const SEND_EMAIL_BLOCK: &[Attribute] = &[Attribute::optional("callback_uri", Kind::String)];

const NOTIFICATION_BLOCK: &[Attribute] = &[Attribute::optional(
    SEND_EMAIL,
    Kind::Singleton(SEND_EMAIL_BLOCK),
)];

/// Schema of an Identity Platform configuration record.
pub static CONFIG_SCHEMA: Schema = Schema {
    attributes: &[
        Attribute::optional(PROJECT_ID, Kind::String),
        Attribute::computed(NAME, Kind::String),
        Attribute::optional(EMAIL, Kind::Singleton(EMAIL_BLOCK)),
        Attribute::optional(PHONE_NUMBER, Kind::Singleton(PHONE_NUMBER_BLOCK)),
        Attribute::optional(NOTIFICATION, Kind::Singleton(NOTIFICATION_BLOCK)),
        Attribute::optional(SUBTYPE, Kind::String),
        Attribute::optional(AUTHORIZED_DOMAINS, Kind::List(&Kind::String)),
    ],
};
