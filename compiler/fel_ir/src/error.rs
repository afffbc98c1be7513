//! Evaluation errors.

use thiserror::Error;

use crate::{NodeId, StaticType};

/// Error raised while interpreting a node against a context.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("variable `{name}` is not bound in the context")]
    Unbound { name: String },

    #[error("node {node} does not exist in the arena")]
    MissingNode { node: NodeId },

    #[error("node {node} (`{label}`) expects {expected} children, found {found}")]
    Arity {
        node: NodeId,
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("operator `{op}` cannot be applied to {operands}")]
    TypeMismatch { op: &'static str, operands: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in `{op}`")]
    Overflow { op: &'static str },
}

impl EvalError {
    pub(crate) fn mismatch(op: &'static str, types: &[StaticType]) -> Self {
        let operands = types
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ");
        EvalError::TypeMismatch { op, operands }
    }
}
