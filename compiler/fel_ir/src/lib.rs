//! Core data types for the Fel expression language.
//!
//! An expression is a tree of [`Node`]s stored in a [`NodeArena`]. Each node
//! carries an [`Emitter`] tag that tells the source generator how to render
//! it; optimizer passes rewrite those tags rather than restructuring the tree.
//!
//! ```text
//! parser ──► Ast (NodeArena + root)
//!                │
//!                ├──► NodeArena::eval        (interpreted path)
//!                └──► fel_codegen            (optimize → render → unit)
//! ```
//!
//! The `Context` and `Value` accessors defined here are also the API that
//! generated evaluation units call at run time.

mod arena;
mod context;
mod error;
mod eval;
mod node;
mod ops;
pub mod stack;
mod types;
mod value;

pub use arena::{Ast, NodeArena};
pub use context::{Context, MapContext};
pub use error::EvalError;
pub use node::{Emitter, Node, NodeId, NodeKind};
pub use ops::{BinaryOp, UnaryOp};
pub use types::StaticType;
pub use value::Value;
