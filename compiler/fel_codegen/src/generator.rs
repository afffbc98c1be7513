//! Generation sessions.
//!
//! One call to [`SourceGenerator::get_source`] is one session:
//!
//! ```text
//! optimize ──► render root ──► allocate unit name ──► assemble
//!    │              │                                    │
//!    │              ├─ pushes hoisted constants ─────────┤ drained once
//!    │              └─ declares cached locals ───────────┘ cleared after
//!    └─ rewrites emitter tags in place
//! ```
//!
//! Sessions on one generator are serialized by the session lock, which owns
//! the local-read cache. Sessions on different generators run in parallel
//! and only meet at the name counters.

use std::sync::Arc;

use fel_ir::{Ast, Context};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::config::GeneratorConfig;
use crate::counter::{field_counter, unit_counter, NameCounter};
use crate::hoist::HoistBuffer;
use crate::locals::LocalReadCache;
use crate::passes::{Pass, PassManager};
use crate::render::Renderer;
use crate::template::{UnitParts, UnitTemplate};
use crate::unit::CompilationUnit;
use crate::{CodegenError, Stage};

const FIELD_INDENT: &str = "    ";
const LOCAL_INDENT: &str = "        ";

/// Turns expression trees into compilation units.
#[derive(Debug)]
pub struct SourceGenerator {
    passes: PassManager,
    template: UnitTemplate,
    config: GeneratorConfig,
    unit_names: Arc<NameCounter>,
    field_names: Arc<NameCounter>,
    session: Mutex<LocalReadCache>,
}

impl SourceGenerator {
    /// Generator with the default configuration and the process-wide
    /// counters.
    pub fn new() -> Result<Self, CodegenError> {
        Self::with_config(GeneratorConfig::default())
    }

    /// Fails if the configured skeleton cannot be loaded.
    pub fn with_config(config: GeneratorConfig) -> Result<Self, CodegenError> {
        let template = config.template.load()?;
        let mut passes = PassManager::default_pipeline();
        for name in &config.disabled_passes {
            passes.disable(name);
        }
        Ok(SourceGenerator {
            passes,
            template,
            session: Mutex::new(LocalReadCache::new(config.local_prefix.clone())),
            config,
            unit_names: unit_counter(),
            field_names: field_counter(),
        })
    }

    /// Draw unit and field names from `unit_names` and `field_names`
    /// instead of the process-wide counters.
    #[must_use]
    pub fn with_counters(mut self, unit_names: Arc<NameCounter>, field_names: Arc<NameCounter>) -> Self {
        self.unit_names = unit_names;
        self.field_names = field_names;
        self
    }

    /// Run `pass` after the default pipeline.
    pub fn add_pass<P: Pass + 'static>(&mut self, pass: P) {
        self.passes.add(pass);
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.pass_names()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of cached reads held between sessions. Always zero unless a
    /// session is running.
    pub fn cached_reads(&self) -> usize {
        self.session.lock().len()
    }

    /// Optimize `ast` and generate a unit evaluating it.
    ///
    /// The tree's emitter tags (and possibly its root) are rewritten in
    /// place. On error no unit is produced; the local-read cache is cleared
    /// either way.
    pub fn get_source(
        &self,
        ctx: &dyn Context,
        ast: &mut Ast,
    ) -> Result<CompilationUnit, CodegenError> {
        let mut locals = self.session.lock();
        let result = self.generate(ctx, ast, &mut locals);
        locals.clear();
        drop(locals);

        if let Err(err) = &result {
            tracing::debug!(%err, "generation failed");
        }
        result
    }

    fn generate(
        &self,
        ctx: &dyn Context,
        ast: &mut Ast,
        locals: &mut LocalReadCache,
    ) -> Result<CompilationUnit, CodegenError> {
        self.passes.run(ctx, ast)?;

        let mut hoisted = HoistBuffer::new(
            Arc::clone(&self.field_names),
            self.config.field_prefix.clone(),
        );
        let expression = Renderer::new(ctx, &ast.arena, &mut hoisted, locals)
            .render_root(ast.root)?
            .text;
        if expression.trim().is_empty() {
            return Err(CodegenError::malformed(
                Stage::Assemble,
                ast.root,
                &ast.root_node().label,
                "rendered to an empty expression",
            ));
        }

        let name = format!("{}{}", self.config.unit_prefix, self.unit_names.next()?);
        tracing::debug!(unit = %name, "allocated unit name");

        self.assemble(name, &expression, &mut hoisted, locals)
    }

    fn assemble(
        &self,
        name: String,
        expression: &str,
        hoisted: &mut HoistBuffer,
        locals: &LocalReadCache,
    ) -> Result<CompilationUnit, CodegenError> {
        let fields = hoisted.drain();
        if !hoisted.is_empty() {
            return Err(CodegenError::invariant(format!(
                "{} hoisted constants left after assembling `{name}`",
                hoisted.len()
            )));
        }

        let mut declared = FxHashSet::default();
        let generated = fields
            .iter()
            .map(|c| c.name.as_str())
            .chain(locals.declarations().iter().map(|d| d.name.as_str()));
        for ident in generated {
            if !declared.insert(ident) {
                return Err(CodegenError::invariant(format!(
                    "`{ident}` declared twice in `{name}`"
                )));
            }
        }

        let field_block = fields
            .iter()
            .map(|c| format!("{FIELD_INDENT}{}", c.declaration()))
            .collect::<Vec<_>>()
            .join("\n");
        let local_block = locals
            .declarations()
            .iter()
            .map(|d| format!("{LOCAL_INDENT}{}", d.declaration))
            .collect::<Vec<_>>()
            .join("\n");

        let source = self.template.render(&UnitParts {
            unit_name: &name,
            fields: &field_block,
            locals: &local_block,
            expression,
        });
        tracing::debug!(
            unit = %name,
            fields = fields.len(),
            locals = locals.len(),
            "assembled unit"
        );
        Ok(CompilationUnit::new(name, source))
    }
}
