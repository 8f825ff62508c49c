//! formstate core - persist and restore the state of control trees
//!
//! This crate provides:
//! - A scalar [`Value`] with total, lenient conversions
//! - The [`SettingsStore`] seam and the in-memory [`MemorySettings`]
//! - The [`ControlTree`] seam and the arena-backed [`WidgetTree`]
//! - The control kind registry mapping kinds to capabilities
//! - The [`StatePersister`] engine with `save()` / `load()`
//! - Error and logging facilities shared with the store backends
//!
//! # Example
//!
//! ```
//! use formstate_core::{MemorySettings, StatePersister, Widget, WidgetTree, ControlTree};
//!
//! let mut tree = WidgetTree::new();
//! let form = tree.add_root("Form", Widget::Frame).unwrap();
//! let name = tree.add_child(form, "Name", Widget::line_edit("Alice")).unwrap();
//!
//! let mut persister = StatePersister::new(MemorySettings::new());
//! persister.add_root(form);
//! persister.save(&tree);
//!
//! tree.set_text(name, "");
//! persister.load(&mut tree);
//! assert_eq!(tree.text(name).as_deref(), Some("Alice"));
//! ```

pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod registry;
pub mod settings;
pub mod tree;
pub mod value;

pub use formstate_core_types as core_types;

// Re-export commonly used types
pub use engine::{StatePersister, TraversalReport};
pub use errors::{ExError, ExErrorKind, FormStateError, Result};
pub use registry::{capability, Accessor, Capability, Category, ControlKind};
pub use settings::{MemorySettings, SettingsStore};
pub use tree::{ControlTree, NodeId, Widget, WidgetTree};
pub use value::Value;
