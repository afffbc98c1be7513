//! Handing generated units to a compile-and-load service.
//!
//! The service itself lives outside this crate. [`compile`] generates a
//! unit and passes it on after the generator's session lock is released,
//! so a slow loader never blocks other sessions on the same generator.

use std::error::Error as StdError;

use fel_ir::{Ast, Context};
use thiserror::Error;

use crate::generator::SourceGenerator;
use crate::unit::CompilationUnit;
use crate::CodegenError;

/// Compiles a unit's source and returns something that can evaluate it.
pub trait UnitLoader {
    type Evaluator;
    type Error: StdError + Send + Sync + 'static;

    fn load(&self, unit: &CompilationUnit) -> Result<Self::Evaluator, Self::Error>;
}

/// Failure of [`compile`].
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// The loader rejected the unit. Not retried: generation is
    /// deterministic, so the same input yields the same unit.
    #[error("loading `{unit}` failed: {source}")]
    Load {
        unit: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Generate a unit for `ast` and load it with `loader`.
pub fn compile<L: UnitLoader>(
    generator: &SourceGenerator,
    loader: &L,
    ctx: &dyn Context,
    ast: &mut Ast,
) -> Result<L::Evaluator, CompileError> {
    let unit = generator.get_source(ctx, ast)?;
    loader.load(&unit).map_err(|err| {
        tracing::debug!(unit = unit.name(), %err, "loader rejected unit");
        CompileError::Load {
            unit: unit.qualified_name(),
            source: Box::new(err),
        }
    })
}
