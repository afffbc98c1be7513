//! AST nodes and their emission strategies.

use std::fmt;

use smallvec::SmallVec;

use crate::{BinaryOp, StaticType, UnaryOp, Value};

/// Index into a [`NodeArena`](crate::NodeArena).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node".
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// What a node computes.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Literal or precomputed constant. Has no children.
    Const(Value),
    /// Variable read; the variable name is the node label. Has no children.
    Var,
    /// Two children: left, right.
    Binary(BinaryOp),
    /// One child.
    Unary(UnaryOp),
}

impl NodeKind {
    /// Number of children a well-formed node of this kind has.
    pub fn arity(&self) -> usize {
        match self {
            NodeKind::Const(_) | NodeKind::Var => 0,
            NodeKind::Unary(_) => 1,
            NodeKind::Binary(_) => 2,
        }
    }
}

/// How a node renders into generated source.
///
/// Optimizer passes work by swapping this tag; the node's children are
/// never touched by a swap.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Emitter {
    /// Render the node from its kind and children.
    #[default]
    Default,
    /// Render as a reference to a hoisted constant field holding `value`.
    Hoisted { value: Value, ty: StaticType },
    /// Render through the session's local-read cache; `inner` renders the
    /// first read.
    CachedLocal { inner: Box<Emitter> },
}

impl Emitter {
    pub fn hoisted(value: Value) -> Self {
        let ty = value.static_type();
        Emitter::Hoisted { value, ty }
    }

    pub fn cached(inner: Emitter) -> Self {
        Emitter::CachedLocal {
            inner: Box::new(inner),
        }
    }

    pub fn is_cached_local(&self) -> bool {
        matches!(self, Emitter::CachedLocal { .. })
    }
}

/// A node in the expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Source text of the node; the variable name for `Var` nodes.
    pub label: String,
    pub kind: NodeKind,
    pub children: SmallVec<[NodeId; 2]>,
    pub emitter: Emitter,
}

impl Node {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Node {
            label: label.into(),
            kind,
            children: SmallVec::new(),
            emitter: Emitter::Default,
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeId>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    #[inline]
    pub fn is_const(&self) -> bool {
        matches!(self.kind, NodeKind::Const(_))
    }

    #[inline]
    pub fn is_var(&self) -> bool {
        matches!(self.kind, NodeKind::Var)
    }
}
