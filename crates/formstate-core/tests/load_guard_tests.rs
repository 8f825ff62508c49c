#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{dialog, simple_form};
use formstate_core::{ControlTree, MemorySettings, StatePersister, Value, Widget, WidgetTree};

#[test]
fn test_first_load_leaves_controls_untouched() {
    let mut d = dialog();
    let before = d.tree.clone();
    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(d.root);

    let report = persister.load(&mut d.tree);

    assert_eq!(report.transferred, 0);
    assert_eq!(report.groups, 0);
    assert_eq!(report.skipped_groups, 1);
    assert_eq!(d.tree.widget(d.title), before.widget(d.title));
    assert_eq!(d.tree.widget(d.ratio), before.widget(d.ratio));
    assert_eq!(d.tree.widget(d.tabs), before.widget(d.tabs));
}

#[test]
fn test_load_does_not_fabricate_groups() {
    let mut f = simple_form();
    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(f.form);

    persister.load(&mut f.tree);

    assert!(persister.store().is_empty());
}

#[test]
fn test_unsaved_root_skipped_when_another_root_was_saved() {
    let d = dialog();
    let mut other = d.tree.clone();
    let other_root = other.add_root("Other", Widget::Frame).unwrap();
    let field = other
        .add_child(other_root, "Field", Widget::line_edit("keep me"))
        .unwrap();

    let mut store = MemorySettings::new();
    store.insert_path("Preferences/Title", Value::from("Saved"));

    let mut persister = StatePersister::new(store);
    persister.add_root(d.root);
    persister.add_root(other_root);
    let report = persister.load(&mut other);

    assert_eq!(other.text(field).as_deref(), Some("keep me"));
    assert_eq!(other.text(d.title).as_deref(), Some("Saved"));
    assert!(report.skipped_groups >= 1);
}

#[test]
fn test_missing_nested_group_keeps_subtree_state() {
    let mut d = dialog();
    let mut store = MemorySettings::new();
    store.insert_path("Preferences/Title", Value::from("Saved"));
    store.insert_path("Preferences/Tabs", Value::Int(0));

    let mut persister = StatePersister::new(store);
    persister.add_root(d.root);
    persister.load(&mut d.tree);

    // own value of the hybrid comes from the parent group
    assert_eq!(d.tree.current_index(d.tabs), Some(0));
    // its children had no group and keep their state
    assert_eq!(d.tree.text(d.user).as_deref(), Some("bob"));
    assert_eq!(d.tree.int_value(d.retries), Some(5));
}

#[test]
fn test_save_creates_groups_load_would_skip() {
    let mut f = simple_form();
    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(f.form);

    let first = persister.load(&mut f.tree);
    let saved = persister.save(&f.tree);
    let second = persister.load(&mut f.tree);

    assert_eq!(first.skipped_groups, 1);
    assert_eq!(saved.groups, 2);
    assert_eq!(second.skipped_groups, 0);
    assert_eq!(second.groups, 2);
}

#[test]
fn test_container_name_with_separator_round_trips() {
    let mut tree = WidgetTree::new();
    let form = tree.add_root("Form", Widget::Frame).unwrap();
    let io = tree.add_child(form, "In/Out", Widget::Frame).unwrap();
    let field = tree.add_child(io, "Field", Widget::line_edit("saved")).unwrap();

    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(form);
    persister.save(&tree);
    assert_eq!(
        persister.store().get_path("Form/In/Out/Field"),
        Some(&Value::from("saved"))
    );

    tree.set_text(field, "reset");
    let report = persister.load(&mut tree);

    assert_eq!(tree.text(field).as_deref(), Some("saved"));
    assert_eq!(report.skipped_groups, 0);
    assert_eq!(report.groups, 2);
    assert_eq!(report.transferred, 1);
    assert_eq!(persister.store().depth(), 0);
}

#[test]
fn test_partially_saved_separator_path_is_skipped() {
    let mut tree = WidgetTree::new();
    let form = tree.add_root("Form", Widget::Frame).unwrap();
    let io = tree.add_child(form, "In/Out", Widget::Frame).unwrap();
    let field = tree.add_child(io, "Field", Widget::line_edit("current")).unwrap();

    let mut store = MemorySettings::new();
    store.insert_path("Form/In/Elsewhere/Field", Value::from("other"));

    let mut persister = StatePersister::new(store);
    persister.add_root(form);
    let report = persister.load(&mut tree);

    assert_eq!(tree.text(field).as_deref(), Some("current"));
    assert_eq!(report.skipped_groups, 1);
    assert_eq!(persister.store().depth(), 0);
}
