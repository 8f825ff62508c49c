//! Persistence engine
//!
//! Walks each declared root, opening one settings group per container node,
//! and moves every persistable control value through the registry.
//!
//! Save layout for a root `Form` holding a line edit `Name` and a frame
//! `Options` with a check box `Enabled`:
//!
//! ```text
//! Form/Name            = "Alice"
//! Form/Options/Enabled = true
//! ```
//!
//! A value always lives under the group path of its parent, keyed by its own
//! name. Hybrid nodes (tab widgets, checkable group boxes) store their own
//! value as a key in the parent group and their children in a group of the
//! same name.

use std::collections::{BTreeSet, HashSet};
use std::time::Instant;

use formstate_core_types::schema::{OP_LOAD, OP_SAVE};
use serde::Serialize;

use crate::errors::{FormStateError, Result};
use crate::registry::{capability, Category};
use crate::settings::{SettingsStore, GROUP_SEPARATOR};
use crate::tree::ControlTree;
use crate::value::Value;
use crate::{log_op_end, log_op_start};

/// Counts of what one `save()` or `load()` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalReport {
    /// Groups entered
    pub groups: usize,
    /// Scalar values written to the store (save) or applied to controls (load)
    pub transferred: usize,
    /// Widgets whose kind holds nothing to persist
    pub ignored: usize,
    /// Children skipped because their name is excluded
    pub excluded: usize,
    /// Subtrees skipped on load because their group was never saved
    pub skipped_groups: usize,
}

/// Saves and restores a set of control trees through a settings store
///
/// Roots are node handles into a tree the caller owns; the tree is borrowed
/// only for the duration of `save()` or `load()`.
#[derive(Debug)]
pub struct StatePersister<S, N> {
    store: S,
    roots: Vec<N>,
    excluded: BTreeSet<String>,
}

impl<S, N> StatePersister<S, N>
where
    S: SettingsStore,
    N: Copy + std::fmt::Debug,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            roots: Vec::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Start with the given names already excluded
    pub fn with_exclusions<I>(store: S, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut persister = Self::new(store);
        persister.excluded.extend(names.into_iter().map(Into::into));
        persister
    }

    /// Register a top-level node to walk
    ///
    /// Roots are not deduplicated.
    pub fn add_root(&mut self, node: N) {
        self.roots.push(node);
    }

    /// Exclude `node` and its whole subtree from save and load
    ///
    /// Exclusion is by name: every node sharing the name is excluded too.
    pub fn exclude<T>(&mut self, tree: &T, node: N)
    where
        T: ControlTree<Node = N> + ?Sized,
    {
        self.exclude_name(tree.name(node));
    }

    pub fn exclude_name(&mut self, name: impl Into<String>) {
        self.excluded.insert(name.into());
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    pub fn roots(&self) -> &[N] {
        &self.roots
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Write the value of every persistable control under the roots
    ///
    /// Roots without children open no group. Controls are not modified.
    pub fn save<T>(&mut self, tree: &T) -> TraversalReport
    where
        T: ControlTree<Node = N> + ?Sized,
    {
        log_op_start!(OP_SAVE, roots = self.roots.len());
        let start = Instant::now();

        let mut walk = Walk::new(&mut self.store, &self.excluded);
        for &root in &self.roots {
            if walk.admits_root(tree, root) {
                walk.save_properties(tree, root);
            }
        }
        let report = walk.report;

        log_op_end!(
            OP_SAVE,
            duration_ms = start.elapsed().as_millis() as u64,
            groups = report.groups,
            transferred = report.transferred,
            excluded = report.excluded
        );
        report
    }

    /// Restore every persistable control under the roots from the store
    ///
    /// A subtree whose group is absent from the store is skipped and its
    /// controls keep their current state. The store is not modified.
    pub fn load<T>(&mut self, tree: &mut T) -> TraversalReport
    where
        T: ControlTree<Node = N> + ?Sized,
    {
        log_op_start!(OP_LOAD, roots = self.roots.len());
        let start = Instant::now();

        let mut walk = Walk::new(&mut self.store, &self.excluded);
        for &root in &self.roots {
            if walk.admits_root(tree, root) {
                walk.load_properties(tree, root);
            }
        }
        let report = walk.report;

        log_op_end!(
            OP_LOAD,
            duration_ms = start.elapsed().as_millis() as u64,
            groups = report.groups,
            transferred = report.transferred,
            skipped_groups = report.skipped_groups
        );
        report
    }

    /// Fail if two persisted siblings anywhere under the roots share a name
    ///
    /// `save()` and `load()` tolerate collisions (the later sibling wins on
    /// save, all of them read the same key on load); callers that want to
    /// fail fast run this first.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateSiblingName` for the first collision found.
    pub fn check_unique_names<T>(&self, tree: &T) -> Result<()>
    where
        T: ControlTree<Node = N> + ?Sized,
    {
        for &root in &self.roots {
            if !self.is_excluded(tree.name(root)) {
                self.check_subtree(tree, root)?;
            }
        }
        Ok(())
    }

    fn check_subtree<T>(&self, tree: &T, node: N) -> Result<()>
    where
        T: ControlTree<Node = N> + ?Sized,
    {
        let children: Vec<N> = tree
            .children(node)
            .into_iter()
            .filter(|&c| tree.is_widget(c) && !self.is_excluded(tree.name(c)))
            .collect();

        if let Some(name) = first_duplicate(tree, &children) {
            return Err(FormStateError::DuplicateSiblingName {
                parent: tree.name(node).to_string(),
                name: name.to_string(),
            });
        }
        for child in children {
            if capability(tree.kind(child)).container {
                self.check_subtree(tree, child)?;
            }
        }
        Ok(())
    }
}

fn first_duplicate<'t, T>(tree: &'t T, nodes: &[T::Node]) -> Option<&'t str>
where
    T: ControlTree + ?Sized,
{
    let mut seen = HashSet::new();
    nodes
        .iter()
        .map(|&n| tree.name(n))
        .find(|name| !seen.insert(*name))
}

/// State of one traversal: the store borrowed for the walk, the exclusion
/// set and the running report.
struct Walk<'a, S> {
    store: &'a mut S,
    excluded: &'a BTreeSet<String>,
    report: TraversalReport,
}

impl<'a, S: SettingsStore> Walk<'a, S> {
    fn new(store: &'a mut S, excluded: &'a BTreeSet<String>) -> Self {
        Self {
            store,
            excluded,
            report: TraversalReport::default(),
        }
    }

    fn admits_root<T>(&mut self, tree: &T, root: T::Node) -> bool
    where
        T: ControlTree + ?Sized,
    {
        if self.excluded.contains(tree.name(root)) {
            self.report.excluded += 1;
            return false;
        }
        true
    }

    /// Widget children of `node` that survive the exclusion filter
    fn admitted_children<T>(&mut self, tree: &T, node: T::Node) -> Vec<T::Node>
    where
        T: ControlTree + ?Sized,
    {
        let mut admitted = Vec::new();
        for child in tree.children(node) {
            if !tree.is_widget(child) {
                continue;
            }
            if self.excluded.contains(tree.name(child)) {
                tracing::debug!(node = tree.name(child), "excluded");
                self.report.excluded += 1;
                continue;
            }
            admitted.push(child);
        }

        if let Some(name) = first_duplicate(tree, &admitted) {
            tracing::warn!(
                group = %self.store.group(),
                node = name,
                "sibling controls share a name; their values collide"
            );
        }
        admitted
    }

    fn save_properties<T>(&mut self, tree: &T, node: T::Node)
    where
        T: ControlTree + ?Sized,
    {
        let children = tree.children(node);
        if children.is_empty() {
            return;
        }

        self.store.begin_group(tree.name(node));
        self.report.groups += 1;
        for child in self.admitted_children(tree, node) {
            self.save_property(tree, child);
        }
        self.store.end_group();
    }

    fn save_property<T>(&mut self, tree: &T, node: T::Node)
    where
        T: ControlTree + ?Sized,
    {
        let kind = tree.kind(node);
        let cap = capability(kind);
        if cap.category() == Category::Ignored {
            tracing::trace!(node = tree.name(node), kind = kind.as_str(), "nothing to persist");
            self.report.ignored += 1;
            return;
        }

        if let Some(value) = cap.accessor.and_then(|a| a.read(tree, node)) {
            self.store.set_value(tree.name(node), value);
            self.report.transferred += 1;
        }
        if cap.container {
            self.save_properties(tree, node);
        }
    }

    fn load_properties<T>(&mut self, tree: &mut T, node: T::Node)
    where
        T: ControlTree + ?Sized,
    {
        let children = tree.children(node);
        if children.is_empty() {
            return;
        }

        let name = tree.name(node);
        let Some(depth) = self.enter_saved_group(name) else {
            tracing::debug!(
                group = %self.store.group(),
                node = name,
                "no saved group; keeping current state"
            );
            self.report.skipped_groups += 1;
            return;
        };

        self.report.groups += 1;
        for child in self.admitted_children(tree, node) {
            self.load_property(tree, child);
        }
        self.leave_groups(depth);
    }

    /// Enter the group saved for `name` one path segment at a time
    ///
    /// A name containing the separator was saved as nested groups, so every
    /// segment must be present. Returns the number of groups entered, or
    /// `None` with the scope unchanged if some segment was never saved.
    fn enter_saved_group(&mut self, name: &str) -> Option<usize> {
        let mut depth = 0;
        for segment in name.split(GROUP_SEPARATOR).filter(|s| !s.is_empty()) {
            if !self.store.child_groups().iter().any(|g| g == segment) {
                self.leave_groups(depth);
                return None;
            }
            self.store.begin_group(segment);
            depth += 1;
        }
        Some(depth)
    }

    fn leave_groups(&mut self, depth: usize) {
        for _ in 0..depth {
            self.store.end_group();
        }
    }

    fn load_property<T>(&mut self, tree: &mut T, node: T::Node)
    where
        T: ControlTree + ?Sized,
    {
        let kind = tree.kind(node);
        let cap = capability(kind);
        if cap.category() == Category::Ignored {
            self.report.ignored += 1;
            return;
        }

        if let Some(accessor) = cap.accessor {
            // An absent key reads as the empty value and converts to the
            // accessor's zero.
            let value = self
                .store
                .value(tree.name(node))
                .unwrap_or_else(|| Value::Text(String::new()));
            if accessor.write(tree, node, &value) {
                self.report.transferred += 1;
            }
        }
        if cap.container {
            self.load_properties(tree, node);
        }
    }
}
