//! Control trees
//!
//! [`ControlTree`] is the toolkit seam: node identity, structure and the
//! per-kind scalar accessors the registry needs. Nodes are opaque `Copy`
//! handles; the tree owns them and the engine only borrows the tree.
//!
//! [`WidgetTree`] is an arena-backed implementation with plain widget state,
//! used by tests and by callers that mirror a native toolkit's tree.

use std::ops::RangeInclusive;

use crate::errors::{FormStateError, Result};
use crate::registry::ControlKind;

/// Access to a tree of controls owned by a GUI toolkit
///
/// Scalar getters return `None` and setters return `false` when the node
/// does not expose that accessor.
pub trait ControlTree {
    type Node: Copy + std::fmt::Debug;

    /// Identifier of the node (object name)
    fn name(&self, node: Self::Node) -> &str;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children in native order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// Whether the node is a control-bearing widget at all
    fn is_widget(&self, node: Self::Node) -> bool;

    fn kind(&self, node: Self::Node) -> ControlKind;

    fn is_checkable(&self, node: Self::Node) -> bool;

    fn text(&self, node: Self::Node) -> Option<String>;
    fn set_text(&mut self, node: Self::Node, text: &str) -> bool;

    fn is_checked(&self, node: Self::Node) -> Option<bool>;
    fn set_checked(&mut self, node: Self::Node, checked: bool) -> bool;

    fn double_value(&self, node: Self::Node) -> Option<f64>;
    fn set_double_value(&mut self, node: Self::Node, value: f64) -> bool;

    fn int_value(&self, node: Self::Node) -> Option<i64>;
    fn set_int_value(&mut self, node: Self::Node, value: i64) -> bool;

    fn current_index(&self, node: Self::Node) -> Option<i64>;
    fn set_current_index(&mut self, node: Self::Node, index: i64) -> bool;
}

/// Handle to a node in a [`WidgetTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of a widget node
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    LineEdit {
        text: String,
    },
    PushButton {
        checkable: bool,
        checked: bool,
    },
    DoubleSpinBox {
        value: f64,
        range: RangeInclusive<f64>,
    },
    SpinBox {
        value: i64,
        range: RangeInclusive<i64>,
    },
    CheckBox {
        checked: bool,
    },
    RadioButton {
        checked: bool,
    },
    ComboBox {
        items: usize,
        current: i64,
    },
    FontComboBox {
        items: usize,
        current: i64,
    },
    Slider {
        value: i64,
        range: RangeInclusive<i64>,
    },
    Frame,
    StackedWidget {
        pages: usize,
        current: i64,
    },
    TabWidget {
        pages: usize,
        current: i64,
    },
    ToolBox {
        pages: usize,
        current: i64,
    },
    ScrollArea,
    GroupBox {
        checkable: bool,
        checked: bool,
    },
    Label {
        text: String,
    },
    /// A widget of a kind the registry does not know
    Custom {
        class_name: String,
    },
}

impl Widget {
    pub fn line_edit(text: impl Into<String>) -> Self {
        Widget::LineEdit { text: text.into() }
    }

    pub fn push_button() -> Self {
        Widget::PushButton {
            checkable: false,
            checked: false,
        }
    }

    pub fn toggle_button(checked: bool) -> Self {
        Widget::PushButton {
            checkable: true,
            checked,
        }
    }

    /// An inverted range is reordered; a NaN bound leaves that side open.
    pub fn double_spin_box(value: f64, range: RangeInclusive<f64>) -> Self {
        let range = ordered_f64(range);
        let value = clamp_f64(value, &range);
        Widget::DoubleSpinBox { value, range }
    }

    /// An inverted range is reordered.
    pub fn spin_box(value: i64, range: RangeInclusive<i64>) -> Self {
        let range = ordered(range);
        let value = clamp_int(value, &range);
        Widget::SpinBox { value, range }
    }

    pub fn check_box(checked: bool) -> Self {
        Widget::CheckBox { checked }
    }

    pub fn radio_button(checked: bool) -> Self {
        Widget::RadioButton { checked }
    }

    pub fn combo_box(items: usize, current: i64) -> Self {
        Widget::ComboBox {
            items,
            current: checked_index(current, items).unwrap_or(-1),
        }
    }

    pub fn font_combo_box(items: usize, current: i64) -> Self {
        Widget::FontComboBox {
            items,
            current: checked_index(current, items).unwrap_or(-1),
        }
    }

    pub fn slider(value: i64, range: RangeInclusive<i64>) -> Self {
        let range = ordered(range);
        let value = clamp_int(value, &range);
        Widget::Slider { value, range }
    }

    pub fn stacked(pages: usize, current: i64) -> Self {
        Widget::StackedWidget {
            pages,
            current: checked_index(current, pages).unwrap_or(-1),
        }
    }

    pub fn tabs(pages: usize, current: i64) -> Self {
        Widget::TabWidget {
            pages,
            current: checked_index(current, pages).unwrap_or(-1),
        }
    }

    pub fn tool_box(pages: usize, current: i64) -> Self {
        Widget::ToolBox {
            pages,
            current: checked_index(current, pages).unwrap_or(-1),
        }
    }

    pub fn group_box() -> Self {
        Widget::GroupBox {
            checkable: false,
            checked: false,
        }
    }

    pub fn checkable_group_box(checked: bool) -> Self {
        Widget::GroupBox {
            checkable: true,
            checked,
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Widget::Label { text: text.into() }
    }

    pub fn custom(class_name: impl Into<String>) -> Self {
        Widget::Custom {
            class_name: class_name.into(),
        }
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            Widget::LineEdit { .. } => ControlKind::LineEdit,
            Widget::PushButton { .. } => ControlKind::PushButton,
            Widget::DoubleSpinBox { .. } => ControlKind::DoubleSpinBox,
            Widget::SpinBox { .. } => ControlKind::SpinBox,
            Widget::CheckBox { .. } => ControlKind::CheckBox,
            Widget::RadioButton { .. } => ControlKind::RadioButton,
            Widget::ComboBox { .. } => ControlKind::ComboBox,
            Widget::FontComboBox { .. } => ControlKind::FontComboBox,
            Widget::Slider { .. } => ControlKind::Slider,
            Widget::Frame => ControlKind::Frame,
            Widget::StackedWidget { .. } => ControlKind::StackedWidget,
            Widget::TabWidget { .. } => ControlKind::TabWidget,
            Widget::ToolBox { .. } => ControlKind::ToolBox,
            Widget::ScrollArea => ControlKind::ScrollArea,
            Widget::GroupBox { .. } => ControlKind::GroupBox,
            Widget::Label { .. } => ControlKind::Label,
            Widget::Custom { .. } => ControlKind::Other,
        }
    }

    /// Make a push button or group box (non-)checkable
    ///
    /// Clearing checkability also clears the checked state.
    pub fn set_checkable(&mut self, on: bool) -> bool {
        match self {
            Widget::PushButton { checkable, checked } | Widget::GroupBox { checkable, checked } => {
                *checkable = on;
                if !on {
                    *checked = false;
                }
                true
            }
            _ => false,
        }
    }
}

fn ordered(range: RangeInclusive<i64>) -> RangeInclusive<i64> {
    let (start, end) = range.into_inner();
    if start <= end {
        start..=end
    } else {
        end..=start
    }
}

fn ordered_f64(range: RangeInclusive<f64>) -> RangeInclusive<f64> {
    let (start, end) = range.into_inner();
    let start = if start.is_nan() { f64::NEG_INFINITY } else { start };
    let end = if end.is_nan() { f64::INFINITY } else { end };
    if start <= end {
        start..=end
    } else {
        end..=start
    }
}

// Ranges stay reachable through `widget_mut`, so these never assume order.
fn clamp_int(value: i64, range: &RangeInclusive<i64>) -> i64 {
    value.max(*range.start()).min(*range.end())
}

fn clamp_f64(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.max(*range.start()).min(*range.end())
}

/// `index` if it is a valid selection for `count` items, where -1 means none
fn checked_index(index: i64, count: usize) -> Option<i64> {
    let in_range = usize::try_from(index).map_or(false, |i| i < count);
    (index == -1 || in_range).then_some(index)
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// `None` for plain objects (layouts, timers, actions)
    widget: Option<Widget>,
}

/// Arena-backed control tree
#[derive(Debug, Clone, Default)]
pub struct WidgetTree {
    nodes: Vec<Node>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level widget
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` if `name` is empty.
    pub fn add_root(&mut self, name: &str, widget: Widget) -> Result<NodeId> {
        self.push(name, None, Some(widget))
    }

    /// Add a widget under `parent`
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` if `name` is empty, `NodeNotFound` if `parent` is
    /// not in this tree.
    pub fn add_child(&mut self, parent: NodeId, name: &str, widget: Widget) -> Result<NodeId> {
        self.push(name, Some(parent), Some(widget))
    }

    /// Add a non-widget object under `parent`
    ///
    /// # Errors
    ///
    /// Same as [`WidgetTree::add_child`].
    pub fn add_object(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.push(name, Some(parent), None)
    }

    fn push(&mut self, name: &str, parent: Option<NodeId>, widget: Option<Widget>) -> Result<NodeId> {
        if name.is_empty() {
            return Err(FormStateError::EmptyName);
        }
        if let Some(p) = parent {
            self.get(p)?;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            widget,
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        Ok(id)
    }

    fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or_else(|| FormStateError::NodeNotFound {
            node: id.to_string(),
        })
    }

    /// Widget state of `id`, `None` for plain objects and unknown handles
    pub fn widget(&self, id: NodeId) -> Option<&Widget> {
        self.nodes.get(id.0).and_then(|n| n.widget.as_ref())
    }

    pub fn widget_mut(&mut self, id: NodeId) -> Option<&mut Widget> {
        self.nodes.get_mut(id.0).and_then(|n| n.widget.as_mut())
    }

    /// First node named `name` in insertion order
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Resolve a `/`-separated path of names starting at a top-level node
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;
        let mut current = self
            .nodes
            .iter()
            .position(|n| n.parent.is_none() && n.name == first)
            .map(NodeId)?;
        for segment in segments {
            current = self.nodes[current.0]
                .children
                .iter()
                .copied()
                .find(|c| self.nodes[c.0].name == segment)?;
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ControlTree for WidgetTree {
    type Node = NodeId;

    fn name(&self, node: NodeId) -> &str {
        self.nodes.get(node.0).map_or("", |n| n.name.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn is_widget(&self, node: NodeId) -> bool {
        self.widget(node).is_some()
    }

    fn kind(&self, node: NodeId) -> ControlKind {
        self.widget(node).map_or(ControlKind::Other, Widget::kind)
    }

    fn is_checkable(&self, node: NodeId) -> bool {
        match self.widget(node) {
            Some(Widget::PushButton { checkable, .. }) | Some(Widget::GroupBox { checkable, .. }) => {
                *checkable
            }
            Some(Widget::CheckBox { .. }) | Some(Widget::RadioButton { .. }) => true,
            _ => false,
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        match self.widget(node)? {
            Widget::LineEdit { text } | Widget::Label { text } => Some(text.clone()),
            _ => None,
        }
    }

    fn set_text(&mut self, node: NodeId, new_text: &str) -> bool {
        match self.widget_mut(node) {
            Some(Widget::LineEdit { text }) | Some(Widget::Label { text }) => {
                *text = new_text.to_string();
                true
            }
            _ => false,
        }
    }

    fn is_checked(&self, node: NodeId) -> Option<bool> {
        match self.widget(node)? {
            Widget::PushButton { checked, .. }
            | Widget::GroupBox { checked, .. }
            | Widget::CheckBox { checked }
            | Widget::RadioButton { checked } => Some(*checked),
            _ => None,
        }
    }

    fn set_checked(&mut self, node: NodeId, on: bool) -> bool {
        match self.widget_mut(node) {
            Some(Widget::PushButton { checkable, checked })
            | Some(Widget::GroupBox { checkable, checked }) => {
                if *checkable {
                    *checked = on;
                }
                *checkable
            }
            Some(Widget::CheckBox { checked }) | Some(Widget::RadioButton { checked }) => {
                *checked = on;
                true
            }
            _ => false,
        }
    }

    fn double_value(&self, node: NodeId) -> Option<f64> {
        match self.widget(node)? {
            Widget::DoubleSpinBox { value, .. } => Some(*value),
            _ => None,
        }
    }

    fn set_double_value(&mut self, node: NodeId, new_value: f64) -> bool {
        match self.widget_mut(node) {
            Some(Widget::DoubleSpinBox { value, range }) => {
                if !new_value.is_nan() {
                    *value = clamp_f64(new_value, range);
                }
                true
            }
            _ => false,
        }
    }

    fn int_value(&self, node: NodeId) -> Option<i64> {
        match self.widget(node)? {
            Widget::SpinBox { value, .. } | Widget::Slider { value, .. } => Some(*value),
            _ => None,
        }
    }

    fn set_int_value(&mut self, node: NodeId, new_value: i64) -> bool {
        match self.widget_mut(node) {
            Some(Widget::SpinBox { value, range }) | Some(Widget::Slider { value, range }) => {
                *value = clamp_int(new_value, range);
                true
            }
            _ => false,
        }
    }

    fn current_index(&self, node: NodeId) -> Option<i64> {
        match self.widget(node)? {
            Widget::ComboBox { current, .. }
            | Widget::FontComboBox { current, .. }
            | Widget::StackedWidget { current, .. }
            | Widget::TabWidget { current, .. }
            | Widget::ToolBox { current, .. } => Some(*current),
            _ => None,
        }
    }

    fn set_current_index(&mut self, node: NodeId, index: i64) -> bool {
        match self.widget_mut(node) {
            Some(Widget::ComboBox { items, current })
            | Some(Widget::FontComboBox { items, current })
            | Some(Widget::StackedWidget { pages: items, current })
            | Some(Widget::TabWidget { pages: items, current })
            | Some(Widget::ToolBox { pages: items, current }) => {
                if let Some(valid) = checked_index(index, *items) {
                    *current = valid;
                }
                true
            }
            _ => false,
        }
    }
}
