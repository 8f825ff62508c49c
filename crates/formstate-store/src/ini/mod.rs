//! INI-file settings storage

pub mod atomic;
pub mod codec;
pub mod file_store;

pub use codec::{parse, write};
pub use file_store::IniSettings;
