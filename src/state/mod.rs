//! The state record the orchestrator persists between runs.
//!
//! A [`StateRecord`] holds the resource identity (the remote `name`) and an
//! attribute map laid out per [`schema::CONFIG_SCHEMA`].  Every write through
//! [`StateRecord::set`] is checked against the schema so a record can never
//! hold a value of the wrong kind.
pub mod codec;
pub mod schema;

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, FieldError, MappingError};
use schema::CONFIG_SCHEMA;

/// Identity plus attributes of one managed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl StateRecord {
    /// An empty record with no identity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A record holding `attributes` and no identity.  The attributes are
    /// not validated here; decoding does that.
    #[must_use]
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// Recorded identity, if the resource has been written.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Record the identity returned by a successful write.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the identity after a confirmed absence or a reset.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Raw attribute map.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Look up an attribute; `null` reads as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// The caller-supplied scope, if set to a non-empty string.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.get(schema::PROJECT_ID)
            .and_then(Value::as_str)
            .filter(|p| !p.is_empty())
    }

    /// Assign one top-level attribute.  `null` removes it.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] if the schema does not declare `name` or the
    /// value does not match the declared kind.  The record is unchanged.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        let attribute = CONFIG_SCHEMA.attribute(name).ok_or_else(|| FieldError {
            field: name.to_string(),
            reason: "unsupported attribute".to_string(),
        })?;

        if value.is_null() {
            self.attributes.remove(name);
            return Ok(());
        }

        attribute
            .kind
            .check(name, &value)
            .map_err(|e| FieldError {
                field: name.to_string(),
                reason: field_reason(name, e),
            })?;
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Validate the whole record against the schema.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] found.
    pub fn validate(&self) -> Result<(), MappingError> {
        CONFIG_SCHEMA.check(&self.attributes)
    }

    /// Load a record from a JSON state file.  A missing file means the
    /// orchestrator has never written one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::InvalidSyntax {
                file: path.display().to_string(),
                message: e.to_string(),
            })
    }

    /// Write the record as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut content =
            serde_json::to_string_pretty(self).map_err(|e| io_err(io::Error::other(e)))?;
        content.push('\n');
        fs::write(path, content).map_err(io_err)
    }
}

/// Describe a rejected value without repeating the field name when the
/// failure is on the field itself.
fn field_reason(name: &str, err: MappingError) -> String {
    match err {
        MappingError::InvalidElementType {
            path,
            expected,
            found,
        } if path == name => format!("expected {expected}, found {found}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_record_has_no_identity() {
        let record = StateRecord::new();
        assert_eq!(record.id(), None);
        assert!(record.attributes().is_empty());
    }

    #[test]
    fn identity_can_be_set_and_cleared() {
        let mut record = StateRecord::new();
        record.set_id("projects/demo/config");
        assert_eq!(record.id(), Some("projects/demo/config"));
        record.clear_id();
        assert_eq!(record.id(), None);
    }

    #[test]
    fn set_accepts_schema_conforming_value() {
        let mut record = StateRecord::new();
        record
            .set("authorized_domains", json!(["a.com", "b.com"]))
            .unwrap();
        assert_eq!(
            record.get("authorized_domains"),
            Some(&json!(["a.com", "b.com"]))
        );
    }

    #[test]
    fn set_rejects_unknown_attribute() {
        let mut record = StateRecord::new();
        let err = record.set("scope", json!("x")).unwrap_err();
        assert_eq!(err.to_string(), "scope: unsupported attribute");
        assert!(record.get("scope").is_none());
    }

    #[test]
    fn set_rejects_wrong_kind_and_leaves_record_unchanged() {
        let mut record = StateRecord::new();
        record.set("subtype", json!("IDENTITY_PLATFORM")).unwrap();
        let err = record.set("subtype", json!(true)).unwrap_err();
        assert_eq!(err.to_string(), "subtype: expected string, found bool");
        assert_eq!(record.get("subtype"), Some(&json!("IDENTITY_PLATFORM")));
    }

    #[test]
    fn set_reports_nested_path() {
        let mut record = StateRecord::new();
        let err = record.set("email", json!([{"enabled": 1}])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "email: email[0].enabled: expected bool, found number"
        );
    }

    #[test]
    fn null_removes_attribute() {
        let mut record = StateRecord::new();
        record.set("name", json!("projects/demo/config")).unwrap();
        record.set("name", Value::Null).unwrap();
        assert!(record.get("name").is_none());
        assert!(!record.attributes().contains_key("name"));
    }

    #[test]
    fn project_id_ignores_empty_string() {
        let mut attributes = Map::new();
        attributes.insert("project_id".to_string(), json!(""));
        let record = StateRecord::from_attributes(attributes);
        assert_eq!(record.project_id(), None);
    }

    #[test]
    fn load_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StateRecord::load(&dir.path().join("state.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_then_load_preserves_identity_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut record = StateRecord::new();
        record.set("project_id", json!("demo")).unwrap();
        record.set_id("projects/demo/config");
        record.save(&path).unwrap();

        let loaded = StateRecord::load(&path).unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn saved_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut record = StateRecord::new();
        record.set("project_id", json!("demo")).unwrap();
        record.set_id("projects/demo/config");
        record.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        insta::assert_snapshot!(content, @r#"
        {
          "id": "projects/demo/config",
          "attributes": {
            "project_id": "demo"
          }
        }
        "#);
    }

    #[test]
    fn load_invalid_json_is_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        let err = StateRecord::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSyntax { .. }));
    }
}
