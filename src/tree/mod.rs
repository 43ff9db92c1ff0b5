//! Outline tree model.
//!
//! The in-memory form of the transformer's output: an arena of nodes
//! addressed by [`NodeId`], replaced wholesale on every document update.
//! Ids are only meaningful against the tree that issued them and must not
//! be retained across a replacement.
//!
//! The tree performs no validation. Malformed line ranges are kept as-is
//! and simply never match during resolution.

mod wire;

pub use wire::{LineRange, NodeData, NodePayload};

use std::cell::RefCell;
use std::rc::Rc;

/// Index of a node within its [`OutlineTree`] arena.
///
/// Arena order is document (depth-first) order, so comparing ids compares
/// document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tree handle shared between the focus controller and the renderer.
///
/// The renderer re-reads fold state on every re-render, so both sides
/// must observe the same mutable tree. Single-threaded access only;
/// borrows are never held across a suspension point.
pub type SharedTree = Rc<RefCell<OutlineTree>>;

#[derive(Debug, Clone)]
struct NodeEntry {
    content: String,
    payload: NodePayload,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed outline tree. The root is always node 0.
#[derive(Debug, Clone)]
pub struct OutlineTree {
    nodes: Vec<NodeEntry>,
}

impl OutlineTree {
    /// Build a tree from transformer output.
    pub fn from_data(root: NodeData) -> Self {
        let mut nodes = Vec::new();
        push_node(&mut nodes, root, None);
        Self { nodes }
    }

    /// Build a tree wrapped in the shared handle the renderer boundary
    /// expects.
    pub fn shared(root: NodeData) -> SharedTree {
        Rc::new(RefCell::new(Self::from_data(root)))
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in document (depth-first) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|idx| NodeId(u32::try_from(idx).unwrap_or(u32::MAX)))
    }

    pub fn content(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].content
    }

    pub fn payload(&self, id: NodeId) -> &NodePayload {
        &self.nodes[id.index()].payload
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// The node's source line range, if its payload carries a parseable
    /// one.
    pub fn line_range(&self, id: NodeId) -> Option<LineRange> {
        self.payload(id).lines.as_deref().and_then(LineRange::parse)
    }

    pub fn is_folded(&self, id: NodeId) -> bool {
        self.payload(id).fold.unwrap_or(0) != 0
    }

    /// Clear a node's fold flag.
    ///
    /// The only mutation the tree supports outside wholesale replacement.
    pub fn expand(&mut self, id: NodeId) {
        self.nodes[id.index()].payload.fold = Some(0);
    }
}

fn push_node(nodes: &mut Vec<NodeEntry>, data: NodeData, parent: Option<NodeId>) -> NodeId {
    let id = NodeId(u32::try_from(nodes.len()).unwrap_or(u32::MAX));
    nodes.push(NodeEntry {
        content: data.content,
        payload: data.payload,
        parent,
        children: Vec::new(),
    });
    let mut children = Vec::with_capacity(data.children.len());
    for child in data.children {
        children.push(push_node(nodes, child, Some(id)));
    }
    nodes[id.index()].children = children;
    id
}
