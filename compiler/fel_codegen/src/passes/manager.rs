//! Pass registration, ordering and execution.

use std::time::Instant;

use fel_ir::{Ast, Context};
use rustc_hash::FxHashSet;

use super::{ConstantFoldingPass, Pass, ReadCachingPass, WholeExpressionCollapsePass};
use crate::CodegenError;

/// Runs passes in registration order.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
    disabled: FxHashSet<String>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folding, then collapse, then read caching.
    pub fn default_pipeline() -> Self {
        let mut pm = PassManager::new();
        pm.add(ConstantFoldingPass);
        pm.add(WholeExpressionCollapsePass);
        pm.add(ReadCachingPass);
        pm
    }

    /// Append a pass after those already registered.
    pub fn add<P: Pass + 'static>(&mut self, pass: P) {
        self.passes.push(Box::new(pass));
    }

    pub fn disable(&mut self, name: &str) {
        self.disabled.insert(name.to_string());
    }

    pub fn enable(&mut self, name: &str) {
        self.disabled.remove(name);
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name)
    }

    /// Run every enabled pass, updating `ast.root` after each.
    pub fn run(&self, ctx: &dyn Context, ast: &mut Ast) -> Result<(), CodegenError> {
        for pass in &self.passes {
            let name = pass.name();
            if !self.is_enabled(name) {
                tracing::trace!(pass = name, "skipping disabled pass");
                continue;
            }

            let start = Instant::now();
            let result = pass.run(ctx, &mut ast.arena, ast.root)?;
            ast.root = result.root;
            tracing::debug!(
                pass = name,
                elapsed = ?start.elapsed(),
                items = result.items_transformed,
                "pass finished"
            );
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Debug for PassManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassManager")
            .field("passes", &self.pass_names())
            .field("disabled", &self.disabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::PassResult;
    use fel_ir::{BinaryOp, Emitter, MapContext, NodeArena, NodeId, Value};

    /// Replaces the root with a fresh constant node.
    struct ReplaceRoot;

    impl Pass for ReplaceRoot {
        fn name(&self) -> &'static str {
            "replace_root"
        }

        fn run(
            &self,
            _ctx: &dyn Context,
            arena: &mut NodeArena,
            _root: NodeId,
        ) -> Result<PassResult, CodegenError> {
            Ok(PassResult::changed(arena.constant(42_i64), 1))
        }
    }

    fn folded_tree() -> Ast {
        Ast::build(|a| {
            let two = a.constant(2_i64);
            let three = a.constant(3_i64);
            a.binary(BinaryOp::Mul, two, three)
        })
    }

    #[test]
    fn test_default_pipeline_order() {
        let pm = PassManager::default_pipeline();
        assert_eq!(
            pm.pass_names(),
            ["constant_folding", "whole_expression_collapse", "read_caching"]
        );
    }

    #[test]
    fn test_disable_and_enable() {
        let mut pm = PassManager::default_pipeline();
        assert!(pm.is_enabled("constant_folding"));
        pm.disable("constant_folding");
        assert!(!pm.is_enabled("constant_folding"));
        pm.enable("constant_folding");
        assert!(pm.is_enabled("constant_folding"));
    }

    #[test]
    fn test_disabled_pass_is_skipped() {
        let mut pm = PassManager::default_pipeline();
        pm.disable("constant_folding");
        pm.disable("whole_expression_collapse");
        let mut ast = folded_tree();
        assert!(pm.run(&MapContext::new(), &mut ast).is_ok());
        assert_eq!(ast.root_node().emitter, Emitter::Default);
        assert_eq!(ast.root_node().children.len(), 2);
    }

    #[test]
    fn test_later_passes_see_new_root() {
        let mut pm = PassManager::new();
        pm.add(ReplaceRoot);
        pm.add(WholeExpressionCollapsePass);
        let mut ast = folded_tree();
        let old_root = ast.root;
        assert!(pm.run(&MapContext::new(), &mut ast).is_ok());
        assert_ne!(ast.root, old_root);
        assert_eq!(ast.root_node().emitter, Emitter::hoisted(Value::Int(42)));
    }

    #[test]
    fn test_empty_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }
}
