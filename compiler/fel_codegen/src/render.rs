//! Expression rendering.
//!
//! Turns an optimized tree into the text of the unit's final expression,
//! dispatching on each node's [`Emitter`] tag. Rendering has two side
//! effects, both session-scoped: hoisted constants are pushed into the
//! [`HoistBuffer`], and first reads of variables are declared in the
//! [`LocalReadCache`].
//!
//! Each render yields its text together with its static type, so a tree is
//! typed in the same single walk that renders it.

use fel_ir::stack::ensure_sufficient_stack;
use fel_ir::{BinaryOp, Context, Emitter, Node, NodeArena, NodeId, NodeKind, StaticType, UnaryOp};

use crate::hoist::HoistBuffer;
use crate::literal::rust_literal;
use crate::locals::LocalReadCache;
use crate::{CodegenError, Stage};

/// Rendered text of a subtree and its static type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub ty: StaticType,
}

/// Rendering state for one generation session.
pub struct Renderer<'a> {
    ctx: &'a dyn Context,
    arena: &'a NodeArena,
    hoisted: &'a mut HoistBuffer,
    locals: &'a mut LocalReadCache,
}

impl<'a> Renderer<'a> {
    pub fn new(
        ctx: &'a dyn Context,
        arena: &'a NodeArena,
        hoisted: &'a mut HoistBuffer,
        locals: &'a mut LocalReadCache,
    ) -> Self {
        Renderer {
            ctx,
            arena,
            hoisted,
            locals,
        }
    }

    /// Render the subtree at `id` through its attached emitter.
    pub fn render(&mut self, id: NodeId) -> Result<Fragment, CodegenError> {
        let node = self.node(id)?;
        self.emit(id, &node.emitter)
    }

    /// Render the unit's final expression.
    ///
    /// Operators cast their operands, so a widened local only escapes
    /// uncast when the root itself is a cached read. It is narrowed back
    /// to `i64` there.
    pub fn render_root(&mut self, id: NodeId) -> Result<Fragment, CodegenError> {
        let widened = self.node(id)?.emitter.is_cached_local();
        let mut fragment = self.render(id)?;
        if widened && fragment.ty == StaticType::Int {
            fragment.text = format!("({} as i64)", fragment.text);
        }
        Ok(fragment)
    }

    /// Static type of the subtree at `id`, without rendering it.
    pub fn node_type(&self, id: NodeId) -> Result<StaticType, CodegenError> {
        let node = self.node(id)?;
        self.static_type(id, &node.emitter)
    }

    /// Static type of `id` as `emitter` would render it.
    pub fn static_type(&self, id: NodeId, emitter: &Emitter) -> Result<StaticType, CodegenError> {
        ensure_sufficient_stack(|| match emitter {
            Emitter::Default => self.default_type(id),
            Emitter::Hoisted { ty, .. } => Ok(*ty),
            Emitter::CachedLocal { inner } => self.static_type(id, inner),
        })
    }

    fn emit(&mut self, id: NodeId, emitter: &Emitter) -> Result<Fragment, CodegenError> {
        ensure_sufficient_stack(|| match emitter {
            Emitter::Default => self.emit_default(id),
            Emitter::Hoisted { value, ty } => {
                let field = self.hoisted.push(value.clone(), *ty)?;
                Ok(Fragment {
                    text: format!("Self::{field}"),
                    ty: *ty,
                })
            }
            Emitter::CachedLocal { inner } => self.emit_cached(id, inner),
        })
    }

    /// Look up a node and check its shape.
    fn node(&self, id: NodeId) -> Result<&'a Node, CodegenError> {
        let arena = self.arena;
        let node = arena.try_get(id).ok_or_else(|| {
            CodegenError::malformed(Stage::Render, id, "", "node does not exist")
        })?;
        let expected = node.kind.arity();
        if node.children.len() != expected {
            return Err(CodegenError::malformed(
                Stage::Render,
                id,
                &node.label,
                format!(
                    "expected {expected} children, found {}",
                    node.children.len()
                ),
            ));
        }
        Ok(node)
    }

    fn default_type(&self, id: NodeId) -> Result<StaticType, CodegenError> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Const(value) => Ok(value.static_type()),
            NodeKind::Var => Ok(self.var_type(&node.label)),
            NodeKind::Binary(op) => {
                let left = self.node_type(node.children[0])?;
                let right = self.node_type(node.children[1])?;
                binary_type(node, id, *op, left, right)
            }
            NodeKind::Unary(op) => {
                let operand = self.node_type(node.children[0])?;
                unary_type(node, id, *op, operand)
            }
        }
    }

    /// A variable is typed by its current binding. Unbound and null
    /// variables stay dynamic.
    fn var_type(&self, name: &str) -> StaticType {
        match self.ctx.get(name) {
            Some(value) if !value.is_null() => value.static_type(),
            _ => StaticType::Dynamic,
        }
    }

    fn emit_default(&mut self, id: NodeId) -> Result<Fragment, CodegenError> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Const(value) => Ok(Fragment {
                text: rust_literal(value),
                ty: value.static_type(),
            }),
            NodeKind::Var => {
                let ty = self.var_type(&node.label);
                Ok(Fragment {
                    text: var_read(&node.label, ty),
                    ty,
                })
            }
            NodeKind::Binary(op) => {
                let l = self.render(node.children[0])?;
                let r = self.render(node.children[1])?;
                let ty = binary_type(node, id, *op, l.ty, r.ty)?;
                Ok(Fragment {
                    text: binary_text(*op, ty, &l, &r),
                    ty,
                })
            }
            NodeKind::Unary(op) => {
                let e = self.render(node.children[0])?;
                let ty = unary_type(node, id, *op, e.ty)?;
                let text = match op {
                    UnaryOp::Neg => format!("(-({} as {}))", e.text, ty.expr_type()),
                    UnaryOp::Not => format!("(!{})", e.text),
                };
                Ok(Fragment { text, ty })
            }
        }
    }

    /// Render a variable read through the local-read cache.
    fn emit_cached(&mut self, id: NodeId, inner: &Emitter) -> Result<Fragment, CodegenError> {
        let node = self.node(id)?;
        // Locals are keyed by label, which only identifies variables.
        if !node.is_var() {
            return Err(CodegenError::malformed(
                Stage::Render,
                id,
                &node.label,
                "cached read on a non-variable node",
            ));
        }
        let text = node.label.as_str();
        if let Some(local) = self.locals.get(text) {
            return Ok(Fragment {
                text: local.to_string(),
                ty: self.static_type(id, inner)?,
            });
        }

        let read = self.emit(id, inner)?;
        let init = if read.ty.is_numeric() {
            format!("{} as f64", read.text)
        } else {
            read.text
        };
        let name = self.locals.fresh_name()?;
        let declaration = format!(
            "let {name}: {} = {init};   // {}",
            read.ty.local_type(),
            text.replace(['\r', '\n'], " ")
        );
        tracing::trace!(var = text, local = %name, "declared cached read");
        self.locals.insert(text, name.clone(), declaration)?;
        Ok(Fragment {
            text: name,
            ty: read.ty,
        })
    }
}

fn binary_type(
    node: &Node,
    id: NodeId,
    op: BinaryOp,
    left: StaticType,
    right: StaticType,
) -> Result<StaticType, CodegenError> {
    op.result_type(left, right).ok_or_else(|| {
        CodegenError::malformed(
            Stage::Render,
            id,
            &node.label,
            format!("`{op}` cannot be typed for {left} and {right}"),
        )
    })
}

fn unary_type(
    node: &Node,
    id: NodeId,
    op: UnaryOp,
    operand: StaticType,
) -> Result<StaticType, CodegenError> {
    op.result_type(operand).ok_or_else(|| {
        CodegenError::malformed(
            Stage::Render,
            id,
            &node.label,
            format!("`{op}` cannot be typed for {operand}"),
        )
    })
}

/// Text of `l op r` whose result has type `result`.
fn binary_text(op: BinaryOp, result: StaticType, l: &Fragment, r: &Fragment) -> String {
    let (l, r, operands) = (&l.text, &r.text, l.ty.promote(r.ty));
    // Casts are parenthesized: `x as f64 < y` does not parse.
    match (op, operands) {
        (BinaryOp::Add, _) if result == StaticType::Str => {
            format!("format!(\"{{}}{{}}\", {l}, {r})")
        }
        (BinaryOp::And | BinaryOp::Or, _) => format!("({l} {op} {r})"),
        // Numeric operands are cast to the promoted type, which also
        // narrows widened locals back to their static type.
        (BinaryOp::Div, _) => format!("(({l} as f64) / ({r} as f64))"),
        (_, Some(ty)) => {
            let ty = ty.expr_type();
            format!("(({l} as {ty}) {op} ({r} as {ty}))")
        }
        (_, None) => format!("({l} {op} {r})"),
    }
}

/// Text reading variable `name` of type `ty` from the unit's context.
fn var_read(name: &str, ty: StaticType) -> String {
    let getter = match ty {
        StaticType::Int => "get_int",
        StaticType::Float => "get_float",
        StaticType::Bool => "get_bool",
        StaticType::Str => "get_str",
        StaticType::Null | StaticType::Dynamic => "get_value",
    };
    format!("ctx.{getter}({name:?})")
}
