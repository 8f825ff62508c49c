//! Hierarchical settings store
//!
//! The engine talks to persistent storage only through [`SettingsStore`]:
//! a key-value map with a current group scope, LIFO group entry/exit and
//! enumeration of the child groups and keys visible from that scope.
//! [`MemorySettings`] is the in-memory reference implementation; file-backed
//! stores wrap it.

use std::collections::{BTreeMap, BTreeSet};

use crate::value::Value;

/// Separator between the segments of a full key path
pub const GROUP_SEPARATOR: char = '/';

/// A hierarchical key-value store with scoped groups
///
/// Keys and groups are separate namespaces: a key `Tabs` and a group `Tabs`
/// can live side by side in the same scope. A group exists only while some
/// key exists beneath it; entering a group never creates it.
pub trait SettingsStore {
    /// Enter the child group `name` of the current scope
    ///
    /// A `name` containing [`GROUP_SEPARATOR`] enters one nested group per
    /// segment as a single scope level.
    fn begin_group(&mut self, name: &str);

    /// Leave the group most recently entered
    fn end_group(&mut self);

    /// Full path of the current scope, `""` at the top level
    fn group(&self) -> String;

    fn set_value(&mut self, key: &str, value: Value);

    /// Value stored under `key` in the current scope
    fn value(&self, key: &str) -> Option<Value>;

    fn contains(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    /// Remove `key` and any group of the same name with everything beneath it
    fn remove(&mut self, key: &str);

    /// Names of the groups directly under the current scope, sorted
    fn child_groups(&self) -> Vec<String>;

    /// Names of the keys directly under the current scope, sorted
    fn child_keys(&self) -> Vec<String>;
}

/// In-memory settings store over a flat map of full key paths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySettings {
    entries: BTreeMap<String, Value>,
    scope: Vec<String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries keyed by full path, independent of the current scope
    pub fn entries(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    /// Insert by full path, bypassing the current scope
    pub fn insert_path(&mut self, path: &str, value: Value) {
        self.entries.insert(normalize(path), value);
    }

    /// Look up by full path, bypassing the current scope
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        self.entries.get(&normalize(path))
    }

    /// Number of groups currently entered
    pub fn depth(&self) -> usize {
        self.scope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove every entry in the current scope
    pub fn clear(&mut self) {
        let prefix = self.prefix();
        if prefix.is_empty() {
            self.entries.clear();
        } else {
            self.entries.retain(|k, _| !k.starts_with(&prefix));
        }
    }

    fn prefix(&self) -> String {
        let group = self.group();
        if group.is_empty() {
            group
        } else {
            format!("{}{}", group, GROUP_SEPARATOR)
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix(), normalize(key))
    }

    /// Remainders of every full key inside the current scope
    fn scoped_rests(&self) -> impl Iterator<Item = &str> {
        let prefix = self.prefix();
        self.entries
            .keys()
            .filter_map(move |k| k.strip_prefix(prefix.as_str()))
    }
}

fn normalize(path: &str) -> String {
    path.split(GROUP_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl SettingsStore for MemorySettings {
    fn begin_group(&mut self, name: &str) {
        self.scope.push(normalize(name));
    }

    fn end_group(&mut self) {
        if self.scope.pop().is_none() {
            tracing::warn!(op = "end_group", "end_group called without matching begin_group");
        }
    }

    fn group(&self) -> String {
        self.scope
            .iter()
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }

    fn set_value(&mut self, key: &str, value: Value) {
        let full = self.full_key(key);
        self.entries.insert(full, value);
    }

    fn value(&self, key: &str) -> Option<Value> {
        self.entries.get(&self.full_key(key)).cloned()
    }

    fn remove(&mut self, key: &str) {
        let full = self.full_key(key);
        let nested = format!("{}{}", full, GROUP_SEPARATOR);
        self.entries
            .retain(|k, _| *k != full && !k.starts_with(&nested));
    }

    fn child_groups(&self) -> Vec<String> {
        self.scoped_rests()
            .filter_map(|rest| rest.split_once(GROUP_SEPARATOR).map(|(head, _)| head))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn child_keys(&self) -> Vec<String> {
        self.scoped_rests()
            .filter(|rest| !rest.contains(GROUP_SEPARATOR))
            .map(str::to_string)
            .collect()
    }
}
