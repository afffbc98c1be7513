//! Whole-expression collapse.
//!
//! Folding only rewrites operator nodes. When the root itself is a
//! constant (a folded tree, or a bare literal) it is evaluated once more and
//! rebound to a hoisted reference of that value, typed by the value's
//! runtime type.

use fel_ir::{Context, Emitter, NodeArena, NodeId};

use super::{Pass, PassResult};
use crate::{CodegenError, Stage};

pub struct WholeExpressionCollapsePass;

impl Pass for WholeExpressionCollapsePass {
    fn name(&self) -> &'static str {
        "whole_expression_collapse"
    }

    fn run(
        &self,
        ctx: &dyn Context,
        arena: &mut NodeArena,
        root: NodeId,
    ) -> Result<PassResult, CodegenError> {
        let node = arena.try_get(root).ok_or_else(|| {
            CodegenError::malformed(Stage::Optimize, root, "", "root does not exist")
        })?;
        if !node.is_const() {
            return Ok(PassResult::unchanged(root));
        }

        let value = arena
            .eval(root, ctx)
            .map_err(|err| CodegenError::from_eval(Stage::Optimize, root, &node.label, &err))?;
        tracing::debug!(%value, "collapsed constant expression");
        arena.set_emitter(root, Emitter::hoisted(value));
        Ok(PassResult::changed(root, 1))
    }
}
