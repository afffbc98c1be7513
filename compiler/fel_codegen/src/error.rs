//! Source generation errors.

use std::fmt;

use fel_ir::{EvalError, NodeId};
use thiserror::Error;

/// Which generation stage produced an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Optimizer pipeline.
    Optimize,
    /// Rendering the optimized tree to expression text.
    Render,
    /// Filling the unit template.
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Optimize => "optimize",
            Stage::Render => "render",
            Stage::Assemble => "assemble",
        })
    }
}

/// Error returned by the generation entry point.
///
/// A failed generation never yields a partial unit.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CodegenError {
    /// A node the stage could not optimize or render.
    #[error("{stage} failed at node {node} (`{fragment}`): {message}")]
    MalformedTree {
        stage: Stage,
        node: NodeId,
        fragment: String,
        message: String,
    },

    /// The unit skeleton could not be loaded or parsed.
    #[error("unit template unavailable: {message}")]
    ResourceInit { message: String },

    /// Internal state observed inconsistent; indicates a locking bug.
    #[error("internal invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl CodegenError {
    pub fn malformed(
        stage: Stage,
        node: NodeId,
        fragment: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CodegenError::MalformedTree {
            stage,
            node,
            fragment: fragment.into(),
            message: message.into(),
        }
    }

    /// Wrap an evaluation failure at `node`.
    pub fn from_eval(stage: Stage, node: NodeId, fragment: &str, err: &EvalError) -> Self {
        Self::malformed(stage, node, fragment, err.to_string())
    }

    pub fn resource(message: impl Into<String>) -> Self {
        CodegenError::ResourceInit {
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        CodegenError::InvariantViolation {
            message: message.into(),
        }
    }

    /// Stage that failed, for tree errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CodegenError::MalformedTree { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
