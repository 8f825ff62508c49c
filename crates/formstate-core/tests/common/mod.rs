use formstate_core::{NodeId, Widget, WidgetTree};

/// The two-level form used throughout: `Form/Name` and `Form/Options/Enabled`
#[allow(dead_code)]
pub struct SimpleForm {
    pub tree: WidgetTree,
    pub form: NodeId,
    pub name: NodeId,
    pub options: NodeId,
    pub enabled: NodeId,
}

#[allow(dead_code)]
pub fn simple_form() -> SimpleForm {
    let mut tree = WidgetTree::new();
    let form = tree.add_root("Form", Widget::Frame).unwrap();
    let name = tree.add_child(form, "Name", Widget::line_edit("Alice")).unwrap();
    let options = tree.add_child(form, "Options", Widget::Frame).unwrap();
    let enabled = tree
        .add_child(options, "Enabled", Widget::check_box(true))
        .unwrap();
    SimpleForm {
        tree,
        form,
        name,
        options,
        enabled,
    }
}

/// A preferences dialog touching every registered kind
#[allow(dead_code)]
pub struct Dialog {
    pub tree: WidgetTree,
    pub root: NodeId,
    pub title: NodeId,
    pub bold: NodeId,
    pub apply: NodeId,
    pub ratio: NodeId,
    pub count: NodeId,
    pub agree: NodeId,
    pub small: NodeId,
    pub large: NodeId,
    pub mode: NodeId,
    pub font: NodeId,
    pub volume: NodeId,
    pub heading: NodeId,
    pub layout: NodeId,
    pub custom: NodeId,
    pub tabs: NodeId,
    pub general: NodeId,
    pub user: NodeId,
    pub advanced: NodeId,
    pub retries: NodeId,
    pub proxy: NodeId,
    pub host: NodeId,
    pub scroll: NodeId,
    pub notes: NodeId,
    pub stack: NodeId,
    pub page: NodeId,
    pub depth: NodeId,
    pub sections: NodeId,
    pub section: NodeId,
    pub verbose: NodeId,
}

#[allow(dead_code)]
pub fn dialog() -> Dialog {
    let mut t = WidgetTree::new();
    let root = t.add_root("Preferences", Widget::Frame).unwrap();
    let title = t.add_child(root, "Title", Widget::line_edit("Untitled")).unwrap();
    let bold = t.add_child(root, "Bold", Widget::toggle_button(true)).unwrap();
    let apply = t.add_child(root, "Apply", Widget::push_button()).unwrap();
    let ratio = t
        .add_child(root, "Ratio", Widget::double_spin_box(0.25, 0.0..=1.0))
        .unwrap();
    let count = t
        .add_child(root, "Count", Widget::spin_box(3, 0..=100))
        .unwrap();
    let agree = t.add_child(root, "Agree", Widget::check_box(true)).unwrap();
    let small = t.add_child(root, "Small", Widget::radio_button(false)).unwrap();
    let large = t.add_child(root, "Large", Widget::radio_button(true)).unwrap();
    let mode = t.add_child(root, "Mode", Widget::combo_box(4, 2)).unwrap();
    let font = t.add_child(root, "Font", Widget::font_combo_box(10, 7)).unwrap();
    let volume = t
        .add_child(root, "Volume", Widget::slider(40, 0..=100))
        .unwrap();
    let heading = t.add_child(root, "Heading", Widget::label("Settings")).unwrap();
    let layout = t.add_object(root, "layout").unwrap();
    let custom = t
        .add_child(root, "Chart", Widget::custom("ChartView"))
        .unwrap();

    let tabs = t.add_child(root, "Tabs", Widget::tabs(2, 1)).unwrap();
    let general = t.add_child(tabs, "General", Widget::Frame).unwrap();
    let user = t.add_child(general, "User", Widget::line_edit("bob")).unwrap();
    let advanced = t.add_child(tabs, "Advanced", Widget::Frame).unwrap();
    let retries = t
        .add_child(advanced, "Retries", Widget::spin_box(5, 0..=10))
        .unwrap();

    let proxy = t
        .add_child(root, "Proxy", Widget::checkable_group_box(true))
        .unwrap();
    let host = t
        .add_child(proxy, "Host", Widget::line_edit("proxy.local"))
        .unwrap();

    let scroll = t.add_child(root, "Scroll", Widget::ScrollArea).unwrap();
    let notes = t.add_child(scroll, "Notes", Widget::line_edit("remember")).unwrap();

    let stack = t.add_child(root, "Stack", Widget::stacked(3, 2)).unwrap();
    let page = t.add_child(stack, "Page", Widget::Frame).unwrap();
    let depth = t
        .add_child(page, "Depth", Widget::slider(-4, -10..=10))
        .unwrap();

    let sections = t.add_child(root, "Sections", Widget::tool_box(2, 1)).unwrap();
    let section = t.add_child(sections, "Logging", Widget::Frame).unwrap();
    let verbose = t
        .add_child(section, "Verbose", Widget::check_box(true))
        .unwrap();

    Dialog {
        tree: t,
        root,
        title,
        bold,
        apply,
        ratio,
        count,
        agree,
        small,
        large,
        mode,
        font,
        volume,
        heading,
        layout,
        custom,
        tabs,
        general,
        user,
        advanced,
        retries,
        proxy,
        host,
        scroll,
        notes,
        stack,
        page,
        depth,
        sections,
        section,
        verbose,
    }
}

/// Move every control of the dialog away from its initial state
#[allow(dead_code)]
pub fn scramble(d: &mut Dialog) {
    use formstate_core::ControlTree;
    let t = &mut d.tree;
    t.set_text(d.title, "changed");
    t.set_checked(d.bold, false);
    t.set_double_value(d.ratio, 0.9);
    t.set_int_value(d.count, 77);
    t.set_checked(d.agree, false);
    t.set_checked(d.small, true);
    t.set_checked(d.large, false);
    t.set_current_index(d.mode, 0);
    t.set_current_index(d.font, 1);
    t.set_int_value(d.volume, 99);
    t.set_current_index(d.tabs, 0);
    t.set_text(d.user, "");
    t.set_int_value(d.retries, 0);
    t.set_checked(d.proxy, false);
    t.set_text(d.host, "");
    t.set_text(d.notes, "forgotten");
    t.set_current_index(d.stack, 0);
    t.set_int_value(d.depth, 9);
    t.set_current_index(d.sections, 0);
    t.set_checked(d.verbose, false);
}
