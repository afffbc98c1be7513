//! Tree-walking evaluation.
//!
//! Used by the optimizer to precompute constant subtrees, and usable on its
//! own as the interpreted path when an expression is not worth compiling.

use crate::stack::ensure_sufficient_stack;
use crate::{Ast, Context, EvalError, NodeArena, NodeId, NodeKind, Value};

impl NodeArena {
    /// Evaluate the subtree rooted at `id` against `ctx`.
    pub fn eval(&self, id: NodeId, ctx: &dyn Context) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.eval_inner(id, ctx))
    }

    fn eval_inner(&self, id: NodeId, ctx: &dyn Context) -> Result<Value, EvalError> {
        let node = self.try_get(id).ok_or(EvalError::MissingNode { node: id })?;
        let expected = node.kind.arity();
        if node.children.len() != expected {
            return Err(EvalError::Arity {
                node: id,
                label: node.label.clone(),
                expected,
                found: node.children.len(),
            });
        }

        match &node.kind {
            NodeKind::Const(value) => Ok(value.clone()),
            NodeKind::Var => ctx.get(&node.label).ok_or_else(|| EvalError::Unbound {
                name: node.label.clone(),
            }),
            NodeKind::Binary(op) => {
                let left = self.eval(node.children[0], ctx)?;
                let right = self.eval(node.children[1], ctx)?;
                op.apply(&left, &right)
            }
            NodeKind::Unary(op) => {
                let operand = self.eval(node.children[0], ctx)?;
                op.apply(&operand)
            }
        }
    }
}

impl Ast {
    /// Evaluate the whole tree against `ctx`.
    pub fn eval(&self, ctx: &dyn Context) -> Result<Value, EvalError> {
        self.arena.eval(self.root, ctx)
    }
}
