//! Optimizing source generator for Fel expressions.
//!
//! Takes a parsed expression tree and an evaluation context and produces
//! the source of a self-contained Rust unit that evaluates the expression:
//!
//! ```text
//! Ast ──► PassManager ──► Renderer ──► UnitTemplate ──► CompilationUnit
//!         (fold, collapse,  (expression,   (fields, locals,
//!          cache reads)      fields, locals) expression)
//! ```
//!
//! Compiling and loading the unit is left to a [`UnitLoader`].
//!
//! # Naming
//!
//! Unit names and hoisted-field names come from process-wide
//! [`NameCounter`]s and never repeat. Local names come from a counter owned
//! by each [`SourceGenerator`] and never repeat within that generator.
//!
//! # Logging
//!
//! Pass timings, fold counts and unit assembly are reported through
//! `tracing`. Call [`init_tracing`] and set `RUST_LOG=fel_codegen=debug`
//! to see them.

mod config;
mod counter;
mod error;
mod generator;
mod hoist;
mod literal;
mod loader;
mod locals;
pub mod passes;
mod render;
mod template;
mod unit;

use std::sync::Once;

pub use config::{GeneratorConfig, TemplateSource, TEMPLATE_ENV};
pub use counter::{field_counter, unit_counter, NameCounter};
pub use error::{CodegenError, Stage};
pub use generator::SourceGenerator;
pub use hoist::{HoistBuffer, HoistedConst};
pub use literal::rust_literal;
pub use loader::{compile, CompileError, UnitLoader};
pub use locals::{LocalDecl, LocalReadCache};
pub use passes::{Pass, PassManager, PassResult};
pub use template::{UnitParts, UnitTemplate};
pub use unit::CompilationUnit;

/// Namespace generated units are declared under.
pub const NAMESPACE: &str = module_path!();

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber for debug output.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // Another subscriber may already be installed by the host.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
