//! Static type descriptors.
//!
//! A `StaticType` is what the source generator knows about a node before the
//! generated unit runs. It decides how a value is declared in generated code
//! and which conversions surround it.

use std::fmt;

/// Static type of a node or value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StaticType {
    /// Absent value. Also the marker type of a precomputed `null` result.
    Null,
    Int,
    Float,
    Bool,
    Str,
    /// Type unknown until the generated unit runs (unbound or null variable).
    Dynamic,
}

impl StaticType {
    /// `true` for `Int` and `Float`.
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, StaticType::Int | StaticType::Float)
    }

    /// Result type of arithmetic between two numeric types.
    ///
    /// Returns `None` if either side is not numeric.
    pub fn promote(self, other: StaticType) -> Option<StaticType> {
        match (self, other) {
            (StaticType::Int, StaticType::Int) => Some(StaticType::Int),
            (a, b) if a.is_numeric() && b.is_numeric() => Some(StaticType::Float),
            _ => None,
        }
    }

    /// Rust type used for a hoisted constant field of this type.
    pub fn field_type(self) -> &'static str {
        match self {
            StaticType::Null => "()",
            StaticType::Int => "i64",
            StaticType::Float => "f64",
            StaticType::Bool => "bool",
            StaticType::Str => "&'static str",
            StaticType::Dynamic => "Value",
        }
    }

    /// Rust type used for a cached local variable of this type.
    ///
    /// Every numeric type is widened to `f64`, so locals read from a context
    /// share one declaration type whatever numeric subtype they hold. This
    /// drops precision for integers beyond 2^53.
    pub fn local_type(self) -> &'static str {
        match self {
            StaticType::Int | StaticType::Float => "f64",
            StaticType::Null => "()",
            StaticType::Bool => "bool",
            StaticType::Str => "String",
            StaticType::Dynamic => "Value",
        }
    }

    /// Rust type of an expression of this type as rendered inline.
    pub fn expr_type(self) -> &'static str {
        match self {
            StaticType::Str => "String",
            other => other.field_type(),
        }
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StaticType::Null => "null",
            StaticType::Int => "int",
            StaticType::Float => "float",
            StaticType::Bool => "bool",
            StaticType::Str => "str",
            StaticType::Dynamic => "dynamic",
        };
        f.write_str(name)
    }
}
