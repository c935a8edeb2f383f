//! Desired-state files.
//!
//! A desired-state file is TOML using the record attribute names, with each
//! singleton group written as an array of tables:
//!
//! ```toml
//! project_id = "demo"
//! authorized_domains = ["localhost"]
//!
//! [[email]]
//! enabled = true
//! password_required = false
//!
//! [[phone_number]]
//! enabled = false
//!
//! [[notification]]
//! [[notification.send_email]]
//! callback_uri = "https://demo.example/cb"
//! ```
use serde_json::Value;
use std::path::Path;

use super::toml_loader::load_required;
use crate::error::ConfigError;
use crate::state::StateRecord;
use crate::state::schema::CONFIG_SCHEMA;

/// Load a desired-state file into a record with no identity.
///
/// Computed attributes such as `name` are rejected here.  The remaining
/// attributes are checked against the schema when the record is decoded.
///
/// # Errors
///
/// Returns an error if the file is missing, is not valid TOML, or sets a
/// computed attribute.
pub fn load(path: &Path) -> Result<StateRecord, ConfigError> {
    let table: toml::Table = load_required(path)?;
    let file = path.display().to_string();

    let attributes = match serde_json::to_value(table) {
        Ok(Value::Object(attributes)) => attributes,
        Ok(_) => {
            return Err(ConfigError::InvalidSyntax {
                file,
                message: "expected a table at the top level".to_string(),
            });
        }
        Err(e) => {
            return Err(ConfigError::InvalidSyntax {
                file,
                message: e.to_string(),
            });
        }
    };

    CONFIG_SCHEMA
        .check_writable(&attributes)
        .map_err(|source| ConfigError::InvalidDesiredState { file, source })?;
    Ok(StateRecord::from_attributes(attributes))
}
