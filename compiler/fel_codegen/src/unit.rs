//! Generated compilation units.

use std::fmt;

use crate::NAMESPACE;

/// Complete source of one generated evaluation unit.
///
/// Immutable once returned from the generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationUnit {
    name: String,
    namespace: &'static str,
    source: String,
}

impl CompilationUnit {
    pub(crate) fn new(name: String, source: String) -> Self {
        CompilationUnit {
            name,
            namespace: NAMESPACE,
            source,
        }
    }

    /// Unit name, unique for the life of the process.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        self.namespace
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// `namespace::name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.namespace, self.name)
    }

    pub fn into_source(self) -> String {
        self.source
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
