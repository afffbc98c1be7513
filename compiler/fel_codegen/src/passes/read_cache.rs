//! Variable read caching.
//!
//! Every reachable variable node is rebound to read through the session's
//! local-read cache, wrapping whatever emitter it had. The first render of
//! a variable declares a local; later ones reuse it. Running the pass twice
//! changes nothing.

use fel_ir::stack::ensure_sufficient_stack;
use fel_ir::{Context, Emitter, NodeArena, NodeId, NodeKind};

use super::{Pass, PassResult};
use crate::{CodegenError, Stage};

pub struct ReadCachingPass;

impl Pass for ReadCachingPass {
    fn name(&self) -> &'static str {
        "read_caching"
    }

    fn run(
        &self,
        _ctx: &dyn Context,
        arena: &mut NodeArena,
        root: NodeId,
    ) -> Result<PassResult, CodegenError> {
        let count = rebind(arena, root)?;
        tracing::debug!(rebound = count, "read caching");
        Ok(PassResult::changed(root, count))
    }
}

fn rebind(arena: &mut NodeArena, id: NodeId) -> Result<usize, CodegenError> {
    ensure_sufficient_stack(|| {
        let node = arena.try_get(id).ok_or_else(|| {
            CodegenError::malformed(Stage::Optimize, id, "", "node does not exist")
        })?;
        if node.children.len() != node.kind.arity() {
            return Err(CodegenError::malformed(
                Stage::Optimize,
                id,
                &node.label,
                format!(
                    "expected {} children, found {}",
                    node.kind.arity(),
                    node.children.len()
                ),
            ));
        }

        if matches!(node.kind, NodeKind::Var) {
            if node.emitter.is_cached_local() {
                return Ok(0);
            }
            let inner = arena.set_emitter(id, Emitter::Default);
            arena.set_emitter(id, Emitter::cached(inner));
            return Ok(1);
        }

        let children = node.children.clone();
        let mut count = 0;
        for child in children {
            count += rebind(arena, child)?;
        }
        Ok(count)
    })
}
