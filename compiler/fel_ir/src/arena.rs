//! Node arena and tree builders.
//!
//! Nodes live in a flat `Vec` and refer to their children by [`NodeId`].
//! Passes rewrite nodes in place; a node is never moved once allocated.

use crate::{BinaryOp, Emitter, Node, NodeId, NodeKind, UnaryOp, Value};

/// Flat storage for one expression tree.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and return its id.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "an expression tree never approaches u32::MAX nodes"
    )]
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get a node. Panics on an id from another arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Get a node, or `None` for a dangling id.
    #[inline]
    pub fn try_get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Swap the emission strategy of a node, returning the previous one.
    pub fn set_emitter(&mut self, id: NodeId, emitter: Emitter) -> Emitter {
        std::mem::replace(&mut self.get_mut(id).emitter, emitter)
    }

    /// Turn `id` into a constant node holding `value`, detaching its
    /// children. The node renders as a hoisted constant.
    pub fn replace_with_constant(&mut self, id: NodeId, value: Value) {
        let node = self.get_mut(id);
        node.children.clear();
        node.emitter = Emitter::hoisted(value.clone());
        node.kind = NodeKind::Const(value);
    }

    // Builders

    pub fn constant(&mut self, value: impl Into<Value>) -> NodeId {
        let value = value.into();
        let label = match &value {
            Value::Str(s) => format!("{s:?}"),
            other => other.to_string(),
        };
        self.alloc(Node::new(label, NodeKind::Const(value)))
    }

    pub fn var(&mut self, name: impl Into<String>) -> NodeId {
        self.alloc(Node::new(name, NodeKind::Var))
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        self.alloc(Node::new(op.symbol(), NodeKind::Binary(op)).with_children([left, right]))
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.alloc(Node::new(op.symbol(), NodeKind::Unary(op)).with_children([operand]))
    }
}

/// An expression tree together with its current root.
#[derive(Clone, Debug)]
pub struct Ast {
    pub arena: NodeArena,
    pub root: NodeId,
}

impl Ast {
    pub fn new(arena: NodeArena, root: NodeId) -> Self {
        Ast { arena, root }
    }

    /// Build a tree with a closure that returns the root.
    pub fn build(f: impl FnOnce(&mut NodeArena) -> NodeId) -> Self {
        let mut arena = NodeArena::new();
        let root = f(&mut arena);
        Ast { arena, root }
    }

    /// Current root node.
    pub fn root_node(&self) -> &Node {
        self.arena.get(self.root)
    }
}
