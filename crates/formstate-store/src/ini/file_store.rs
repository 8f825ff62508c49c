//! INI-file settings store
//!
//! Holds the whole file in a [`MemorySettings`] and writes it back with
//! [`atomic_write`] on [`IniSettings::sync`] or on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use formstate_core::core_types::schema::{OP_OPEN, OP_SYNC};
use formstate_core::{log_op_end, log_op_error, log_op_start};
use formstate_core::{MemorySettings, SettingsStore, Value};

use super::atomic::atomic_write;
use super::codec;
use crate::errors::{io_error, Result};

/// Settings persisted to an INI file
#[derive(Debug)]
pub struct IniSettings {
    path: Option<PathBuf>,
    inner: MemorySettings,
    dirty: bool,
    create_dirs: bool,
}

impl IniSettings {
    /// Open the store backed by `path`
    ///
    /// A missing file opens as an empty store; the file is created on the
    /// first sync that has something to write.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file exists but cannot be read, or a
    /// `Serialization` error naming the file and line if it does not parse.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        log_op_start!(OP_OPEN, path = %path.display());
        let start = Instant::now();

        let inner = match read_settings(&path) {
            Ok(inner) => inner,
            Err(err) => {
                log_op_error!(
                    OP_OPEN,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                return Err(err);
            }
        };

        log_op_end!(
            OP_OPEN,
            duration_ms = start.elapsed().as_millis() as u64,
            entries = inner.len()
        );
        Ok(Self {
            path: Some(path),
            inner,
            dirty: false,
            create_dirs: true,
        })
    }

    /// A store with no backing file; `sync()` is a no-op
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: MemorySettings::new(),
            dirty: false,
            create_dirs: true,
        }
    }

    /// Whether `sync()` may create the file's parent directory (default: yes)
    pub fn create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether there are changes not yet written to the file
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn settings(&self) -> &MemorySettings {
        &self.inner
    }

    /// Write pending changes to the file
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file cannot be written. The store stays
    /// dirty so a later sync can retry.
    pub fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let Some(path) = self.path.as_deref() else {
            self.dirty = false;
            return Ok(());
        };

        log_op_start!(OP_SYNC, path = %path.display());
        let start = Instant::now();

        let text = codec::write(&self.inner);
        if let Err(err) = atomic_write(path, text.as_bytes(), self.create_dirs) {
            log_op_error!(
                OP_SYNC,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            return Err(err);
        }
        self.dirty = false;

        log_op_end!(
            OP_SYNC,
            duration_ms = start.elapsed().as_millis() as u64,
            entries = self.inner.len()
        );
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<MemorySettings> {
    match fs::read_to_string(path) {
        Ok(text) => codec::parse(&text).map_err(|e| e.with_node(path.display().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(MemorySettings::new()),
        Err(e) => Err(io_error("read_settings", path, e)),
    }
}

impl SettingsStore for IniSettings {
    fn begin_group(&mut self, name: &str) {
        self.inner.begin_group(name);
    }

    fn end_group(&mut self) {
        self.inner.end_group();
    }

    fn group(&self) -> String {
        self.inner.group()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.inner.set_value(key, value);
        self.dirty = true;
    }

    fn value(&self, key: &str) -> Option<Value> {
        self.inner.value(key)
    }

    fn remove(&mut self, key: &str) {
        self.inner.remove(key);
        self.dirty = true;
    }

    fn child_groups(&self) -> Vec<String> {
        self.inner.child_groups()
    }

    fn child_keys(&self) -> Vec<String> {
        self.inner.child_keys()
    }
}

impl Drop for IniSettings {
    fn drop(&mut self) {
        if let Err(err) = self.sync() {
            tracing::warn!(error = %err, "failed to write settings on drop");
        }
    }
}
