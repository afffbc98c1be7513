//! Evaluation context: the caller-supplied variable lookup.
//!
//! The typed `get_*` helpers are the surface generated units call, so their
//! names are part of the generated-code contract.

use rustc_hash::FxHashMap;

use crate::Value;

/// Variable lookup against which expressions evaluate.
pub trait Context: Send + Sync {
    /// Current value bound to `name`, if any.
    fn get(&self, name: &str) -> Option<Value>;

    /// Bound value or `Value::Null`.
    fn get_value(&self, name: &str) -> Value {
        self.get(name).unwrap_or(Value::Null)
    }

    fn get_int(&self, name: &str) -> i64 {
        self.get_value(name).as_i64()
    }

    fn get_float(&self, name: &str) -> f64 {
        self.get_value(name).as_f64()
    }

    fn get_bool(&self, name: &str) -> bool {
        self.get_value(name).as_bool()
    }

    fn get_str(&self, name: &str) -> String {
        match self.get_value(name) {
            Value::Str(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Hash-map backed context.
#[derive(Clone, Debug, Default)]
pub struct MapContext {
    vars: FxHashMap<String, Value>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder form of [`MapContext::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Context for MapContext {
    fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }
}
