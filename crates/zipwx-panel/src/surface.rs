//! Retained UI tree the renderer draws into.
//!
//! A [`Surface`] is the rendering substrate: keyed nodes in a few fixed
//! slots. [`TreeSurface`] keeps them in memory and can print itself.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::panel::Action;

/// Fixed regions of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Input field, add button and refresh control
    Toolbar,
    /// Validation alerts under the input
    Alerts,
    /// Cards or the empty-state placeholder
    Container,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub key: Option<String>,
    pub tag: &'static str,
    pub class: String,
    pub text: Option<String>,
    pub attrs: BTreeMap<String, String>,
    pub action: Option<Action>,
    pub disabled: bool,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    /// Depth-first search for a node by key, this node included.
    pub fn find(&self, key: &str) -> Option<&Node> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(key))
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        let mut line = String::new();
        if let Some(text) = &self.text {
            line.push_str(text);
        }
        if self.action.is_some() {
            if let Some(key) = &self.key {
                if !line.is_empty() {
                    line.push(' ');
                }
                let _ = write!(line, "[{}{}]", key, if self.disabled { ", disabled" } else { "" });
            }
        }
        if !line.is_empty() {
            let _ = writeln!(out, "{}{}", "  ".repeat(depth), line);
        }
        let child_depth = if line.is_empty() { depth } else { depth + 1 };
        for child in &self.children {
            child.write_text(out, child_depth);
        }
    }
}

/// The opaque tree renderer. Top-level nodes in each slot are identified by key.
pub trait Surface {
    fn nodes(&self, slot: Slot) -> &[Node];

    /// Append `node`, or replace in place a top-level node with the same key.
    fn upsert(&mut self, slot: Slot, node: Node);

    /// Remove the top-level node with `key`; returns whether one was removed.
    fn remove(&mut self, slot: Slot, key: &str) -> bool;

    fn clear(&mut self, slot: Slot);

    fn contains(&self, slot: Slot, key: &str) -> bool {
        self.nodes(slot)
            .iter()
            .any(|n| n.key.as_deref() == Some(key))
    }

    fn count_class(&self, slot: Slot, class: &str) -> usize {
        self.nodes(slot).iter().filter(|n| n.has_class(class)).count()
    }

    /// The action a click on `key` triggers, if the node exists and is enabled.
    fn click(&self, key: &str) -> Option<Action> {
        [Slot::Toolbar, Slot::Alerts, Slot::Container]
            .iter()
            .flat_map(|slot| self.nodes(*slot))
            .find_map(|n| n.find(key))
            .filter(|n| !n.disabled)
            .and_then(|n| n.action.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TreeSurface {
    toolbar: Vec<Node>,
    alerts: Vec<Node>,
    container: Vec<Node>,
}

impl TreeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Vec<Node> {
        match slot {
            Slot::Toolbar => &mut self.toolbar,
            Slot::Alerts => &mut self.alerts,
            Slot::Container => &mut self.container,
        }
    }

    /// Plain-text rendering: one line per node with text, clickable nodes
    /// suffixed with `[key]`.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for slot in [Slot::Toolbar, Slot::Alerts, Slot::Container] {
            for node in self.nodes(slot) {
                node.write_text(&mut out, 0);
            }
            if slot == Slot::Container || !self.nodes(slot).is_empty() {
                out.push('\n');
            }
        }
        out
    }
}

impl Surface for TreeSurface {
    fn nodes(&self, slot: Slot) -> &[Node] {
        match slot {
            Slot::Toolbar => &self.toolbar,
            Slot::Alerts => &self.alerts,
            Slot::Container => &self.container,
        }
    }

    fn upsert(&mut self, slot: Slot, node: Node) {
        let nodes = self.slot_mut(slot);
        let existing = node
            .key
            .as_deref()
            .and_then(|key| nodes.iter().position(|n| n.key.as_deref() == Some(key)));
        match existing {
            Some(index) => nodes[index] = node,
            None => nodes.push(node),
        }
    }

    fn remove(&mut self, slot: Slot, key: &str) -> bool {
        let nodes = self.slot_mut(slot);
        let before = nodes.len();
        nodes.retain(|n| n.key.as_deref() != Some(key));
        before != nodes.len()
    }

    fn clear(&mut self, slot: Slot) {
        self.slot_mut(slot).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zipwx_weather::ZipCode;

    #[test]
    fn upsert_replaces_in_place() {
        let mut surface = TreeSurface::new();
        surface.upsert(Slot::Container, Node::new("div").key("a").text("1"));
        surface.upsert(Slot::Container, Node::new("div").key("b").text("2"));
        surface.upsert(Slot::Container, Node::new("div").key("a").text("3"));

        let texts: Vec<_> = surface
            .nodes(Slot::Container)
            .iter()
            .map(|n| n.text.clone().unwrap_or_default())
            .collect();
        assert_eq!(texts, vec!["3", "2"]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut surface = TreeSurface::new();
        surface.upsert(Slot::Toolbar, Node::new("button").key("refresh"));
        assert!(surface.remove(Slot::Toolbar, "refresh"));
        assert!(!surface.remove(Slot::Toolbar, "refresh"));
    }

    #[test]
    fn click_finds_nested_actions() {
        let zip = ZipCode::parse("10115").unwrap();
        let mut surface = TreeSurface::new();
        surface.upsert(
            Slot::Container,
            Node::new("div").key("item-10115").child(
                Node::new("div").class("title").child(
                    Node::new("a")
                        .key("remove-10115")
                        .on_click(Action::Remove(zip.clone())),
                ),
            ),
        );
        surface.upsert(
            Slot::Toolbar,
            Node::new("button").key("add").on_click(Action::Add).disabled(true),
        );

        assert_eq!(surface.click("remove-10115"), Some(Action::Remove(zip)));
        assert_eq!(surface.click("add"), None);
        assert_eq!(surface.click("missing"), None);
    }

    #[test]
    fn class_matching_is_word_based() {
        let node = Node::new("div").class("item item-10115");
        assert!(node.has_class("item"));
        assert!(!node.has_class("item-1"));
    }

    #[test]
    fn text_rendering_marks_clickables() {
        let mut surface = TreeSurface::new();
        surface.upsert(
            Slot::Toolbar,
            Node::new("button").key("refresh").text("Refresh").on_click(Action::Refresh),
        );
        surface.upsert(Slot::Container, Node::new("div").text("Nothing here"));

        let text = surface.render_text();
        assert!(text.contains("Refresh [refresh]"));
        assert!(text.contains("Nothing here"));
    }
}
