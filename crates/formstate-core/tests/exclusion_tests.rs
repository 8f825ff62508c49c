#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{dialog, simple_form};
use formstate_core::{
    ControlTree, MemorySettings, SettingsStore, StatePersister, Value, Widget, WidgetTree,
};

#[test]
fn test_excluded_leaf_is_not_saved() {
    let f = simple_form();
    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(f.form);
    persister.exclude(&f.tree, f.name);

    let report = persister.save(&f.tree);

    assert!(persister.store().get_path("Form/Name").is_none());
    assert_eq!(
        persister.store().get_path("Form/Options/Enabled"),
        Some(&Value::Bool(true))
    );
    assert_eq!(report.excluded, 1);
}

#[test]
fn test_excluded_container_drops_whole_subtree_on_save() {
    let d = dialog();
    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(d.root);
    persister.exclude(&d.tree, d.tabs);

    persister.save(&d.tree);

    let store = persister.store_mut();
    assert!(store.get_path("Preferences/Tabs").is_none());
    store.begin_group("Preferences");
    assert!(!store.child_groups().contains(&"Tabs".to_string()));
    store.end_group();
    assert!(store
        .entries()
        .keys()
        .all(|k| !k.starts_with("Preferences/Tabs")));
}

#[test]
fn test_excluded_container_untouched_on_load() {
    let mut f = simple_form();
    let mut store = MemorySettings::new();
    store.insert_path("Form/Name", Value::from("Bob"));
    store.insert_path("Form/Options/Enabled", Value::Bool(false));

    let mut persister = StatePersister::new(store);
    persister.add_root(f.form);
    persister.exclude(&f.tree, f.options);
    persister.load(&mut f.tree);

    assert_eq!(f.tree.text(f.name).as_deref(), Some("Bob"));
    assert_eq!(f.tree.is_checked(f.enabled), Some(true));
}

#[test]
fn test_exclusion_is_by_name_across_the_tree() {
    let mut tree = WidgetTree::new();
    let form = tree.add_root("Form", Widget::Frame).unwrap();
    let top = tree.add_child(form, "Secret", Widget::line_edit("a")).unwrap();
    let panel = tree.add_child(form, "Panel", Widget::Frame).unwrap();
    tree.add_child(panel, "Secret", Widget::line_edit("b")).unwrap();
    tree.add_child(panel, "Public", Widget::line_edit("c")).unwrap();

    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(form);
    persister.exclude(&tree, top);
    persister.save(&tree);

    let store = persister.store();
    assert!(store.get_path("Form/Secret").is_none());
    assert!(store.get_path("Form/Panel/Secret").is_none());
    assert_eq!(store.get_path("Form/Panel/Public"), Some(&Value::from("c")));
}

#[test]
fn test_exclusions_from_names() {
    let f = simple_form();
    let mut persister = StatePersister::with_exclusions(MemorySettings::new(), ["Options"]);
    persister.add_root(f.form);
    assert!(persister.is_excluded("Options"));
    assert!(!persister.is_excluded("Name"));

    persister.save(&f.tree);
    assert_eq!(persister.store().len(), 1);
}

#[test]
fn test_exclusion_is_permanent() {
    let mut f = simple_form();
    let mut persister = StatePersister::new(MemorySettings::new());
    persister.add_root(f.form);
    persister.exclude_name("Name");

    persister.save(&f.tree);
    f.tree.set_text(f.name, "changed");
    persister.save(&f.tree);
    persister.load(&mut f.tree);

    assert!(persister.store().get_path("Form/Name").is_none());
    assert_eq!(f.tree.text(f.name).as_deref(), Some("changed"));
}
