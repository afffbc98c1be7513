//! Local-read cache.
//!
//! Maps a variable's source text to the generated local holding its value,
//! so each variable is read from the context at most once per generated
//! unit. Declarations come back in first-encountered order.
//!
//! The cache belongs to one generator instance and is emptied after every
//! session. The local-name counter is not: names keep increasing across
//! sessions of the same instance.

use rustc_hash::FxHashMap;

use crate::CodegenError;

/// A generated local variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalDecl {
    /// Variable text the local caches.
    pub text: String,
    /// Generated local name.
    pub name: String,
    /// Full declaration statement.
    pub declaration: String,
}

#[derive(Debug)]
pub struct LocalReadCache {
    index: FxHashMap<String, usize>,
    decls: Vec<LocalDecl>,
    prefix: String,
    next_local: u64,
}

impl LocalReadCache {
    pub fn new(prefix: impl Into<String>) -> Self {
        LocalReadCache {
            index: FxHashMap::default(),
            decls: Vec::new(),
            prefix: prefix.into(),
            next_local: 0,
        }
    }

    /// Generated local name for `text`, if already declared this session.
    pub fn get(&self, text: &str) -> Option<&str> {
        self.index.get(text).map(|&i| self.decls[i].name.as_str())
    }

    /// A local name never handed out before by this cache.
    pub fn fresh_name(&mut self) -> Result<String, CodegenError> {
        let n = self.next_local;
        self.next_local = n
            .checked_add(1)
            .ok_or_else(|| CodegenError::invariant("local name counter exhausted"))?;
        Ok(format!("{}{n}", self.prefix))
    }

    /// Record the declaration for `text`.
    ///
    /// A second insert for the same text, or a reused local name, means two
    /// renders raced on this cache.
    pub fn insert(
        &mut self,
        text: impl Into<String>,
        name: impl Into<String>,
        declaration: impl Into<String>,
    ) -> Result<(), CodegenError> {
        let text = text.into();
        let name = name.into();
        if self.index.contains_key(&text) {
            return Err(CodegenError::invariant(format!(
                "variable `{text}` cached twice in one session"
            )));
        }
        if self.decls.iter().any(|d| d.name == name) {
            return Err(CodegenError::invariant(format!(
                "local `{name}` declared twice in one session"
            )));
        }
        self.index.insert(text.clone(), self.decls.len());
        self.decls.push(LocalDecl {
            text,
            name,
            declaration: declaration.into(),
        });
        Ok(())
    }

    /// Declarations in first-encountered order.
    pub fn declarations(&self) -> &[LocalDecl] {
        &self.decls
    }

    /// Forget every entry. Name counter is kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.decls.clear();
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_get() {
        let mut cache = LocalReadCache::new("var_");
        let name = cache.fresh_name().unwrap_or_default();
        assert_eq!(name, "var_0");
        assert!(cache.insert("a", &name, "let var_0: f64 = 1.0;").is_ok());
        assert_eq!(cache.get("a"), Some("var_0"));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_declarations_keep_first_use_order() {
        let mut cache = LocalReadCache::new("var_");
        for text in ["z", "a", "m"] {
            let name = cache.fresh_name().unwrap_or_default();
            let decl = format!("let {name} = ctx;");
            assert!(cache.insert(text, name, decl).is_ok());
        }
        let order: Vec<_> = cache.declarations().iter().map(|d| d.text.as_str()).collect();
        assert_eq!(order, ["z", "a", "m"]);
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut cache = LocalReadCache::new("var_");
        let first = cache.fresh_name().unwrap_or_default();
        assert!(cache.insert("a", first, "").is_ok());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.fresh_name().as_deref(), Ok("var_1"));
    }

    #[test]
    fn test_double_insert_is_an_invariant_violation() {
        let mut cache = LocalReadCache::new("var_");
        assert!(cache.insert("a", "var_0", "").is_ok());
        assert!(matches!(
            cache.insert("a", "var_1", ""),
            Err(CodegenError::InvariantViolation { .. })
        ));
        assert!(matches!(
            cache.insert("b", "var_0", ""),
            Err(CodegenError::InvariantViolation { .. })
        ));
    }
}
