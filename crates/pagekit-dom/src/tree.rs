#![forbid(unsafe_code)]

//! The element tree: nodes, classes, attributes, containment queries.
//!
//! # Design Notes
//!
//! - Nodes are slab-allocated; a [`NodeId`] is an index into the slab and is
//!   never reused within a document's lifetime, so a stale id held across a
//!   removal can never alias a new element.
//! - Removal detaches the whole subtree. Detached nodes stop appearing in
//!   queries and all operations on them become no-ops, mirroring how a script
//!   holding a reference to a removed element simply stops having an effect.
//! - Query iteration order is creation order, which keeps tests deterministic.

use ahash::{AHashMap, AHashSet};

/// Opaque handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Raw index, for diagnostics only.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    classes: AHashSet<String>,
    attrs: AHashMap<String, String>,
    /// Control value (inputs, textareas, selects). Empty for other elements.
    value: String,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: AHashSet::new(),
            attrs: AHashMap::new(),
            value: String::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An owned element tree.
///
/// Construction always yields a root element (tag `html`) that carries the
/// document-level `dir` and `lang` attributes and cannot be removed.
#[derive(Debug)]
pub struct Document {
    /// Slab of nodes; `None` marks a removed slot. Slots are never reused.
    nodes: Vec<Option<Node>>,
    root: NodeId,
}

impl Document {
    /// Create an empty document with an `html` root.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.create_element("html");
        doc
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocate a new detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(Node::new(tag)));
        id
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Detaches `child` from its current parent first. No-op if either node is
    /// removed, if `child` is the root, or if the attachment would create a
    /// cycle (`child` containing `parent`).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == self.root || !self.exists(parent) || !self.exists(child) {
            return;
        }
        if self.contains(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Remove an element and its entire subtree. The root cannot be removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.exists(node) {
            return;
        }
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes[id.0 as usize].take() {
                stack.extend(n.children);
            }
        }
    }

    /// Whether `node` is still live (created and not removed).
    #[must_use]
    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes
            .get(node.0 as usize)
            .is_some_and(Option::is_some)
    }

    // --- Classes ---

    /// Add a class. No-op on removed nodes.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.insert(class.to_string());
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.remove(class);
        }
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(n) = self.node_mut(node) else {
            return false;
        };
        if n.classes.remove(class) {
            false
        } else {
            n.classes.insert(class.to_string());
            true
        }
    }

    /// Whether the node carries the class. `false` for removed nodes.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    // --- Attributes ---

    /// Set an attribute value.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Read an attribute value.
    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|n| n.attrs.get(name).map(String::as_str))
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attrs.remove(name);
        }
    }

    // --- Value and text ---

    /// Set the control value.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.value = value.to_string();
        }
    }

    /// Read the control value. Empty string for removed nodes.
    #[must_use]
    pub fn value(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.value.as_str())
    }

    /// Set the text content.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = text.to_string();
        }
    }

    /// Read the text content. Empty string for removed nodes.
    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.text.as_str())
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.tag.as_str())
    }

    // --- Structure queries ---

    /// The node's parent, if attached.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// The node's children, in insertion order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `node` is `ancestor` or a descendant of it.
    ///
    /// Matches the containment semantics of `Element.contains`: an element
    /// contains itself.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.exists(ancestor) || !self.exists(node) {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Nearest self-or-ancestor satisfying `pred`.
    #[must_use]
    pub fn closest(&self, node: NodeId, pred: impl Fn(&Self, NodeId) -> bool) -> Option<NodeId> {
        let mut cursor = if self.exists(node) { Some(node) } else { None };
        while let Some(id) = cursor {
            if pred(self, id) {
                return Some(id);
            }
            cursor = self.parent(id);
        }
        None
    }

    /// Nearest self-or-ancestor carrying the class.
    #[must_use]
    pub fn closest_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.closest(node, |doc, id| doc.has_class(id, class))
    }

    /// All live nodes carrying the class, in creation order.
    #[must_use]
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        self.live_nodes(|n| n.classes.contains(class))
    }

    /// All live nodes carrying the attribute, in creation order.
    #[must_use]
    pub fn nodes_with_attr(&self, name: &str) -> Vec<NodeId> {
        self.live_nodes(|n| n.attrs.contains_key(name))
    }

    /// First child of `parent` satisfying `pred`.
    #[must_use]
    pub fn find_child(
        &self,
        parent: NodeId,
        pred: impl Fn(&Self, NodeId) -> bool,
    ) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| pred(self, c))
    }

    // --- Internal ---

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
    }

    fn live_nodes(&self, pred: impl Fn(&Node) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.as_ref()
                    .filter(|n| pred(*n))
                    .map(|_| NodeId(i as u32))
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
