//! Optimizer passes.
//!
//! A pass receives the evaluation context and the tree, rewrites emitter
//! tags (never child lists, except where folding detaches a constant
//! subtree), and returns the possibly-different root. Later passes see the
//! output of earlier ones.
//!
//! - `const_fold.rs`: hoist fully constant subtrees
//! - `collapse.rs`: rebind a constant root to its precomputed value
//! - `read_cache.rs`: read each variable through the local-read cache
//! - `manager.rs`: ordering, enable/disable and timing

mod collapse;
mod const_fold;
mod manager;
mod read_cache;

pub use collapse::WholeExpressionCollapsePass;
pub use const_fold::ConstantFoldingPass;
pub use manager::PassManager;
pub use read_cache::ReadCachingPass;

use fel_ir::{Context, NodeArena, NodeId};

use crate::CodegenError;

/// Outcome of one pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PassResult {
    /// Root after the pass.
    pub root: NodeId,
    /// Number of nodes the pass rewrote.
    pub items_transformed: usize,
}

impl PassResult {
    pub fn unchanged(root: NodeId) -> Self {
        PassResult {
            root,
            items_transformed: 0,
        }
    }

    pub fn changed(root: NodeId, items_transformed: usize) -> Self {
        PassResult {
            root,
            items_transformed,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.items_transformed > 0
    }
}

/// A tree rewrite run by the [`PassManager`].
///
/// Passes are shared by every session of a generator, so they hold no
/// per-session state.
pub trait Pass: Send + Sync {
    /// Stable name, used to disable the pass and in logs.
    fn name(&self) -> &'static str;

    /// Rewrite the tree under `root`.
    ///
    /// Must not fail on a well-typed tree; a node the pass cannot improve is
    /// left as it is.
    fn run(
        &self,
        ctx: &dyn Context,
        arena: &mut NodeArena,
        root: NodeId,
    ) -> Result<PassResult, CodegenError>;
}

impl<T: Pass + ?Sized> Pass for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn run(
        &self,
        ctx: &dyn Context,
        arena: &mut NodeArena,
        root: NodeId,
    ) -> Result<PassResult, CodegenError> {
        (**self).run(ctx, arena, root)
    }
}
