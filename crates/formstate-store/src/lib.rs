//! formstate store - file-backed settings for the persistence engine
//!
//! Provides:
//! - An INI codec mapping settings groups to `[section]` blocks
//! - `IniSettings`, a `SettingsStore` persisted with atomic writes
//! - `SettingsConfig`, TOML configuration naming the file and exclusions

pub mod config;
pub mod errors;
pub mod ini;

// Re-export key types
pub use config::SettingsConfig;
pub use errors::Result;
pub use ini::IniSettings;
