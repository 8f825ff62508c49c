//! Control kind registry
//!
//! Maps every control kind to a [`Capability`]: whether the control holds a
//! persistable scalar (and which accessor moves it), and whether it is a
//! container the engine must recurse into. [`capability`] is the only place
//! that branches on kinds; the engine works purely in terms of capabilities.

use crate::tree::ControlTree;
use crate::value::Value;

/// Runtime kind of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Single-line text field
    LineEdit,
    /// Push button; persisted only while checkable
    PushButton,
    DoubleSpinBox,
    SpinBox,
    CheckBox,
    RadioButton,
    ComboBox,
    FontComboBox,
    Slider,
    /// Plain container panel
    Frame,
    /// Pages with one visible at a time
    StackedWidget,
    TabWidget,
    /// Collapsible sections with one expanded at a time
    ToolBox,
    ScrollArea,
    /// Titled container; persisted checked state only while checkable
    GroupBox,
    /// Decorative text
    Label,
    /// Anything the registry does not know
    Other,
}

impl ControlKind {
    pub const ALL: [ControlKind; 17] = [
        ControlKind::LineEdit,
        ControlKind::PushButton,
        ControlKind::DoubleSpinBox,
        ControlKind::SpinBox,
        ControlKind::CheckBox,
        ControlKind::RadioButton,
        ControlKind::ComboBox,
        ControlKind::FontComboBox,
        ControlKind::Slider,
        ControlKind::Frame,
        ControlKind::StackedWidget,
        ControlKind::TabWidget,
        ControlKind::ToolBox,
        ControlKind::ScrollArea,
        ControlKind::GroupBox,
        ControlKind::Label,
        ControlKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::LineEdit => "line_edit",
            ControlKind::PushButton => "push_button",
            ControlKind::DoubleSpinBox => "double_spin_box",
            ControlKind::SpinBox => "spin_box",
            ControlKind::CheckBox => "check_box",
            ControlKind::RadioButton => "radio_button",
            ControlKind::ComboBox => "combo_box",
            ControlKind::FontComboBox => "font_combo_box",
            ControlKind::Slider => "slider",
            ControlKind::Frame => "frame",
            ControlKind::StackedWidget => "stacked_widget",
            ControlKind::TabWidget => "tab_widget",
            ControlKind::ToolBox => "tool_box",
            ControlKind::ScrollArea => "scroll_area",
            ControlKind::GroupBox => "group_box",
            ControlKind::Label => "label",
            ControlKind::Other => "other",
        }
    }
}

/// How a control's scalar is read and written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// Current text
    Text,
    /// Checked state
    Checked,
    /// Checked state, but only while the control is checkable
    CheckedIfCheckable,
    /// Floating-point value
    Double,
    /// Integer value
    Integer,
    /// Selected item, page or section index
    CurrentIndex,
}

impl Accessor {
    /// Read the control's scalar
    ///
    /// `None` means the control contributes nothing right now (not checkable,
    /// or the toolkit does not expose the accessor for this node).
    pub fn read<T>(self, tree: &T, node: T::Node) -> Option<Value>
    where
        T: ControlTree + ?Sized,
    {
        match self {
            Accessor::Text => tree.text(node).map(Value::Text),
            Accessor::Checked => tree.is_checked(node).map(Value::Bool),
            Accessor::CheckedIfCheckable => {
                if tree.is_checkable(node) {
                    tree.is_checked(node).map(Value::Bool)
                } else {
                    None
                }
            }
            Accessor::Double => tree.double_value(node).map(Value::Double),
            Accessor::Integer => tree.int_value(node).map(Value::Int),
            Accessor::CurrentIndex => tree.current_index(node).map(Value::Int),
        }
    }

    /// Write `value` into the control, converting it to the accessor's type
    ///
    /// Returns whether the control accepted a value.
    pub fn write<T>(self, tree: &mut T, node: T::Node, value: &Value) -> bool
    where
        T: ControlTree + ?Sized,
    {
        match self {
            Accessor::Text => tree.set_text(node, &value.to_text()),
            Accessor::Checked => tree.set_checked(node, value.to_bool()),
            Accessor::CheckedIfCheckable => {
                tree.is_checkable(node) && tree.set_checked(node, value.to_bool())
            }
            Accessor::Double => tree.set_double_value(node, value.to_double()),
            Accessor::Integer => tree.set_int_value(node, value.to_int()),
            Accessor::CurrentIndex => tree.set_current_index(node, value.to_int()),
        }
    }
}

/// Behavioural category of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Neither read nor written
    Ignored,
    /// One scalar transfer
    Leaf,
    /// Recursion only
    Container,
    /// Scalar transfer and recursion
    Hybrid,
}

/// What the engine may do with a control of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub accessor: Option<Accessor>,
    pub container: bool,
}

impl Capability {
    const IGNORED: Capability = Capability {
        accessor: None,
        container: false,
    };

    const fn leaf(accessor: Accessor) -> Self {
        Self {
            accessor: Some(accessor),
            container: false,
        }
    }

    const fn container() -> Self {
        Self {
            accessor: None,
            container: true,
        }
    }

    const fn hybrid(accessor: Accessor) -> Self {
        Self {
            accessor: Some(accessor),
            container: true,
        }
    }

    pub fn category(&self) -> Category {
        match (self.accessor.is_some(), self.container) {
            (false, false) => Category::Ignored,
            (true, false) => Category::Leaf,
            (false, true) => Category::Container,
            (true, true) => Category::Hybrid,
        }
    }
}

/// Look up the capability of `kind`
pub const fn capability(kind: ControlKind) -> Capability {
    match kind {
        ControlKind::LineEdit => Capability::leaf(Accessor::Text),
        ControlKind::PushButton => Capability::leaf(Accessor::CheckedIfCheckable),
        ControlKind::DoubleSpinBox => Capability::leaf(Accessor::Double),
        ControlKind::SpinBox | ControlKind::Slider => Capability::leaf(Accessor::Integer),
        ControlKind::CheckBox | ControlKind::RadioButton => Capability::leaf(Accessor::Checked),
        ControlKind::ComboBox | ControlKind::FontComboBox => {
            Capability::leaf(Accessor::CurrentIndex)
        }
        ControlKind::Frame | ControlKind::ScrollArea => Capability::container(),
        ControlKind::StackedWidget | ControlKind::TabWidget | ControlKind::ToolBox => {
            Capability::hybrid(Accessor::CurrentIndex)
        }
        ControlKind::GroupBox => Capability::hybrid(Accessor::CheckedIfCheckable),
        ControlKind::Label | ControlKind::Other => Capability::IGNORED,
    }
}
