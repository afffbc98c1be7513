//! Constant folding.
//!
//! Bottom-up: an operator node whose operands are all constants after
//! folding is evaluated once and turned into a hoisted constant. Its
//! children are detached, so only the outermost constant of a folded
//! region is ever rendered. Literal leaves keep their default emitter.
//!
//! A subtree whose evaluation fails (`1 % 0`, overflow) is left for the
//! generated unit to compute.

use fel_ir::stack::ensure_sufficient_stack;
use fel_ir::{Context, NodeArena, NodeId, NodeKind};

use super::{Pass, PassResult};
use crate::{CodegenError, Stage};

pub struct ConstantFoldingPass;

impl Pass for ConstantFoldingPass {
    fn name(&self) -> &'static str {
        "constant_folding"
    }

    fn run(
        &self,
        ctx: &dyn Context,
        arena: &mut NodeArena,
        root: NodeId,
    ) -> Result<PassResult, CodegenError> {
        let mut folder = ConstFolder {
            ctx,
            arena,
            count: 0,
        };
        folder.fold(root)?;
        let count = folder.count;
        tracing::debug!(folded = count, "constant folding");
        Ok(PassResult::changed(root, count))
    }
}

struct ConstFolder<'a> {
    ctx: &'a dyn Context,
    arena: &'a mut NodeArena,
    count: usize,
}

impl ConstFolder<'_> {
    /// Fold the subtree at `id`; true when it is now a constant.
    fn fold(&mut self, id: NodeId) -> Result<bool, CodegenError> {
        ensure_sufficient_stack(|| self.fold_inner(id))
    }

    fn fold_inner(&mut self, id: NodeId) -> Result<bool, CodegenError> {
        let node = self.arena.try_get(id).ok_or_else(|| {
            CodegenError::malformed(Stage::Optimize, id, "", "node does not exist")
        })?;
        let expected = node.kind.arity();
        if node.children.len() != expected {
            return Err(CodegenError::malformed(
                Stage::Optimize,
                id,
                &node.label,
                format!(
                    "expected {expected} children, found {}",
                    node.children.len()
                ),
            ));
        }
        match node.kind {
            NodeKind::Const(_) => return Ok(true),
            NodeKind::Var => return Ok(false),
            NodeKind::Binary(_) | NodeKind::Unary(_) => {}
        }

        // Every child is folded, even after a non-constant one.
        let children = node.children.clone();
        let mut all_const = true;
        for child in children {
            all_const &= self.fold(child)?;
        }
        if !all_const {
            return Ok(false);
        }

        match self.arena.eval(id, self.ctx) {
            Ok(value) => {
                tracing::trace!(node = %id, %value, "folded");
                self.arena.replace_with_constant(id, value);
                self.count += 1;
                Ok(true)
            }
            Err(err) => {
                tracing::trace!(node = %id, %err, "left for run time");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fel_ir::{Ast, BinaryOp, Emitter, MapContext, Node, Value};

    fn run(ast: &mut Ast) -> Result<PassResult, CodegenError> {
        ConstantFoldingPass.run(&MapContext::new(), &mut ast.arena, ast.root)
    }

    #[test]
    fn test_folds_nested_arithmetic() {
        // 2 + 3 * 4
        let mut ast = Ast::build(|a| {
            let two = a.constant(2_i64);
            let three = a.constant(3_i64);
            let four = a.constant(4_i64);
            let mul = a.binary(BinaryOp::Mul, three, four);
            a.binary(BinaryOp::Add, two, mul)
        });
        let result = run(&mut ast).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(result.items_transformed, 2);
        let root = ast.root_node();
        assert!(root.children.is_empty());
        assert_eq!(root.emitter, Emitter::hoisted(Value::Int(14)));
    }

    #[test]
    fn test_partial_fold_keeps_variables() {
        // x + 2 * 3
        let mut ast = Ast::build(|a| {
            let x = a.var("x");
            let two = a.constant(2_i64);
            let three = a.constant(3_i64);
            let mul = a.binary(BinaryOp::Mul, two, three);
            a.binary(BinaryOp::Add, x, mul)
        });
        let result = run(&mut ast).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(result.items_transformed, 1);
        let root = ast.root_node();
        assert_eq!(root.emitter, Emitter::Default);
        assert_eq!(
            ast.arena.get(root.children[1]).emitter,
            Emitter::hoisted(Value::Int(6))
        );
    }

    #[test]
    fn test_leaf_literals_are_not_hoisted() {
        let mut ast = Ast::build(|a| a.constant(5_i64));
        let result = run(&mut ast).unwrap_or_else(|e| panic!("{e}"));
        assert!(!result.is_changed());
        assert_eq!(ast.root_node().emitter, Emitter::Default);
    }

    #[test]
    fn test_failing_fold_is_left_alone() {
        let mut ast = Ast::build(|a| {
            let one = a.constant(1_i64);
            let zero = a.constant(0_i64);
            a.binary(BinaryOp::Mod, one, zero)
        });
        let result = run(&mut ast).unwrap_or_else(|e| panic!("{e}"));
        assert!(!result.is_changed());
        assert_eq!(ast.root_node().children.len(), 2);
    }

    #[test]
    fn test_wrong_arity_is_malformed() {
        let mut ast = Ast::build(|a| {
            let one = a.constant(1_i64);
            a.alloc(Node::new("+", NodeKind::Binary(BinaryOp::Add)).with_children([one]))
        });
        let err = run(&mut ast);
        assert!(matches!(
            err,
            Err(CodegenError::MalformedTree {
                stage: Stage::Optimize,
                ..
            })
        ));
    }
}
