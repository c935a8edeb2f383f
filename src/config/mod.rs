//! File-backed configuration: provider settings and desired-state files.
pub mod desired;
pub mod settings;
pub mod toml_loader;

pub use settings::{ProviderSettings, default_settings_path};
