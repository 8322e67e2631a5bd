//! Pure projection from `ViewState` to a UI tree.
//!
//! # Design
//! The tree is plain data: elements with a tag and class list, text, and
//! buttons that carry the `Action` they trigger. Hosts either print it
//! through `Display` (HTML-like markup) or walk it themselves.

use std::fmt;

use crate::state::ViewState;
use crate::types::UserId;

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Add,
    Update(UserId),
    Delete(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Fragment(Vec<Node>),
    Element {
        tag: &'static str,
        class: &'static str,
        key: Option<UserId>,
        children: Vec<Node>,
    },
    Text(String),
    Button {
        class: &'static str,
        label: &'static str,
        action: Action,
    },
}

impl Node {
    fn element(tag: &'static str, class: &'static str, children: Vec<Node>) -> Self {
        Node::Element {
            tag,
            class,
            key: None,
            children,
        }
    }

    /// Every action reachable from this node, in document order.
    pub fn actions(&self) -> Vec<Action> {
        let mut out = Vec::new();
        self.walk(&mut |node: &Node| {
            if let Node::Button { action, .. } = node {
                out.push(*action);
            }
        });
        out
    }

    /// Visible text with button labels, concatenated in document order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node: &Node| match node {
            Node::Text(text) => out.push_str(text),
            Node::Button { label, .. } => out.push_str(label),
            _ => {}
        });
        out
    }

    /// Elements carrying `tag`, in document order.
    pub fn find_all(&self, tag: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect(tag, &mut out);
        out
    }

    fn collect<'a>(&'a self, wanted: &str, out: &mut Vec<&'a Node>) {
        match self {
            Node::Fragment(children) => {
                for child in children {
                    child.collect(wanted, out);
                }
            }
            Node::Element { tag, children, .. } => {
                if *tag == wanted {
                    out.push(self);
                }
                for child in children {
                    child.collect(wanted, out);
                }
            }
            Node::Text(_) | Node::Button { .. } => {}
        }
    }

    fn walk(&self, f: &mut impl FnMut(&Node)) {
        f(self);
        match self {
            Node::Fragment(children) | Node::Element { children, .. } => {
                for child in children {
                    child.walk(&mut *f);
                }
            }
            Node::Text(_) | Node::Button { .. } => {}
        }
    }
}

/// Render the user list for `state`. Same state, same tree.
pub fn render(state: &ViewState) -> Node {
    let mut root = Vec::new();
    if !state.error().is_empty() {
        root.push(Node::element(
            "p",
            "text-danger",
            vec![Node::Text(state.error().to_string())],
        ));
    }
    if state.loading() {
        root.push(Node::element("div", "spinner-border", Vec::new()));
    }
    root.push(Node::Button {
        class: "btn btn-primary mb-3",
        label: "Add",
        action: Action::Add,
    });

    let rows = state
        .users()
        .iter()
        .map(|user| Node::Element {
            tag: "li",
            class: "list-group-item d-flex justify-content-between",
            key: Some(user.id),
            children: vec![
                Node::Text(user.name.clone()),
                Node::element(
                    "div",
                    "",
                    vec![
                        Node::Button {
                            class: "btn btn-outline-secondary",
                            label: "Update",
                            action: Action::Update(user.id),
                        },
                        Node::Text(" ".to_string()),
                        Node::Button {
                            class: "btn btn-outline-danger",
                            label: "Delete",
                            action: Action::Delete(user.id),
                        },
                    ],
                ),
            ],
        })
        .collect();
    root.push(Node::element("ul", "list-group", rows));

    Node::Fragment(root)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Fragment(children) => children.iter().try_for_each(|c| write!(f, "{c}")),
            Node::Element {
                tag,
                class,
                key,
                children,
            } => {
                write!(f, "<{tag}")?;
                if !class.is_empty() {
                    write!(f, " class=\"{class}\"")?;
                }
                if let Some(key) = key {
                    write!(f, " data-key=\"{key}\"")?;
                }
                f.write_str(">")?;
                children.iter().try_for_each(|c| write!(f, "{c}"))?;
                write!(f, "</{tag}>")
            }
            Node::Text(text) => f.write_str(&escape(text)),
            Node::Button { class, label, .. } => {
                write!(f, "<button class=\"{class}\">{label}</button>")
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
