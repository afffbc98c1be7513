//! Generator configuration.

use std::path::PathBuf;

use crate::template::UnitTemplate;
use crate::CodegenError;

/// Environment variable naming an alternative unit skeleton file.
pub const TEMPLATE_ENV: &str = "FEL_UNIT_TEMPLATE";

/// Where the unit skeleton comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The skeleton compiled into this crate.
    #[default]
    Builtin,
    /// Skeleton text supplied by the caller.
    Inline(String),
    /// Skeleton read from a file when the generator is built.
    File(PathBuf),
}

impl TemplateSource {
    /// Load and parse the skeleton.
    pub fn load(&self) -> Result<UnitTemplate, CodegenError> {
        match self {
            TemplateSource::Builtin => UnitTemplate::builtin(),
            TemplateSource::Inline(text) => UnitTemplate::parse(text),
            TemplateSource::File(path) => UnitTemplate::load(path),
        }
    }
}

/// Settings for a [`SourceGenerator`](crate::SourceGenerator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Prefix of generated unit names.
    pub unit_prefix: String,
    /// Prefix of hoisted constant field names.
    pub field_prefix: String,
    /// Prefix of cached local names.
    pub local_prefix: String,
    pub template: TemplateSource,
    /// Names of default passes to skip.
    pub disabled_passes: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            unit_prefix: "Fel_".to_string(),
            field_prefix: "attr_".to_string(),
            local_prefix: "var_".to_string(),
            template: TemplateSource::Builtin,
            disabled_passes: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults, with the skeleton taken from `FEL_UNIT_TEMPLATE` when set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var_os(TEMPLATE_ENV) {
            Some(path) if !path.is_empty() => config.with_template(TemplateSource::File(path.into())),
            _ => config,
        }
    }

    #[must_use]
    pub fn with_unit_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unit_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_field_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.field_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_local_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.local_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: TemplateSource) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn without_pass(mut self, name: impl Into<String>) -> Self {
        self.disabled_passes.push(name.into());
        self
    }
}
