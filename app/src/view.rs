//! Terminal presentation of the rendered tree, and the commands that press
//! its buttons.

use std::str::FromStr;

use user_list_core::{Action, Node, UserId};

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Press(Action),
    Render,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let id = |arg: Option<&str>| -> Result<UserId, String> {
            let arg = arg.ok_or_else(|| format!("usage: {verb} <id>"))?;
            arg.parse().map_err(|_| format!("not a user id: {arg}"))
        };
        let command = match verb.as_str() {
            "add" | "a" => Command::Press(Action::Add),
            "update" | "u" => Command::Press(Action::Update(id(words.next())?)),
            "delete" | "d" => Command::Press(Action::Delete(id(words.next())?)),
            "render" | "r" | "" => Command::Render,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other} (add, update <id>, delete <id>, render, quit)")),
        };
        Ok(command)
    }
}

/// Lay the tree out as terminal lines: error, spinner, the Add button, then
/// one row per user prefixed with its id.
pub fn present(node: &Node) -> String {
    let mut lines = Vec::new();
    block(node, &mut lines);
    lines.join("\n")
}

fn block(node: &Node, lines: &mut Vec<String>) {
    match node {
        Node::Fragment(children) => {
            for child in children {
                block(child, lines);
            }
        }
        Node::Element { tag: "ul", children, .. } if children.is_empty() => {
            lines.push("  (no users)".to_string());
        }
        Node::Element { tag: "ul", children, .. } => {
            for child in children {
                block(child, lines);
            }
        }
        Node::Element { tag: "p", .. } => lines.push(format!("error: {}", node.text())),
        Node::Element { class: "spinner-border", .. } => lines.push("loading...".to_string()),
        Node::Element { key: Some(id), .. } => lines.push(format!("{id:>6}  {}", inline(node))),
        other => lines.push(inline(other)),
    }
}

fn inline(node: &Node) -> String {
    match node {
        Node::Text(text) => text.clone(),
        Node::Button { label, .. } => format!("[{label}]"),
        Node::Fragment(children) | Node::Element { children, .. } => {
            children
                .iter()
                .map(inline)
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join("  ")
        }
    }
}
