use formstate_core::{NodeId, Widget, WidgetTree};

/// A connection form with one control of each scalar type
#[allow(dead_code)]
pub struct ConnectionForm {
    pub tree: WidgetTree,
    pub root: NodeId,
    pub host: NodeId,
    pub password: NodeId,
    pub timeout: NodeId,
    pub port: NodeId,
    pub secure: NodeId,
    pub protocol: NodeId,
    pub tabs: NodeId,
    pub advanced: NodeId,
    pub comment: NodeId,
}

#[allow(dead_code)]
pub fn connection_form() -> ConnectionForm {
    let mut t = WidgetTree::new();
    let root = t.add_root("Connection", Widget::Frame).unwrap();
    let host = t
        .add_child(root, "Host", Widget::line_edit("db.example.org"))
        .unwrap();
    let password = t
        .add_child(root, "Password", Widget::line_edit("hunter2"))
        .unwrap();
    let timeout = t
        .add_child(root, "Timeout", Widget::double_spin_box(2.5, 0.0..=60.0))
        .unwrap();
    let port = t
        .add_child(root, "Port", Widget::spin_box(5432, 1..=65535))
        .unwrap();
    let secure = t.add_child(root, "Secure", Widget::check_box(true)).unwrap();
    let protocol = t
        .add_child(root, "Protocol", Widget::combo_box(3, 2))
        .unwrap();
    let tabs = t.add_child(root, "Tabs", Widget::tabs(2, 1)).unwrap();
    t.add_child(tabs, "Basic", Widget::Frame).unwrap();
    let advanced = t.add_child(tabs, "Advanced", Widget::Frame).unwrap();
    let comment = t
        .add_child(advanced, "Comment", Widget::line_edit("  spaced; #odd \"text\"\n"))
        .unwrap();

    ConnectionForm {
        tree: t,
        root,
        host,
        password,
        timeout,
        port,
        secure,
        protocol,
        tabs,
        advanced,
        comment,
    }
}

/// Reset every scalar control to its zero state
#[allow(dead_code)]
pub fn reset(f: &mut ConnectionForm) {
    use formstate_core::ControlTree;
    let t = &mut f.tree;
    t.set_text(f.host, "");
    t.set_text(f.password, "");
    t.set_double_value(f.timeout, 0.0);
    t.set_int_value(f.port, 1);
    t.set_checked(f.secure, false);
    t.set_current_index(f.protocol, 0);
    t.set_current_index(f.tabs, 0);
    t.set_text(f.comment, "");
}
