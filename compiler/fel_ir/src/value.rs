//! Runtime values.

use std::fmt;

use crate::StaticType;

/// A Fel runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// The static type describing this value.
    pub fn static_type(&self) -> StaticType {
        match self {
            Value::Null => StaticType::Null,
            Value::Int(_) => StaticType::Int,
            Value::Float(_) => StaticType::Float,
            Value::Bool(_) => StaticType::Bool,
            Value::Str(_) => StaticType::Str,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer view. Floats truncate toward zero; anything else is `0`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "truncation is the documented float-to-int conversion"
    )]
    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Float(f) => *f as i64,
            _ => 0,
        }
    }

    /// Float view. Non-numeric values read as `0.0`.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integers read as floats wherever a float is requested"
    )]
    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(f) => *f,
            _ => 0.0,
        }
    }

    /// Boolean view. Only `Bool(true)` is true.
    pub fn as_bool(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// String view, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}
