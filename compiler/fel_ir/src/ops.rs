//! Operators and their constant semantics.
//!
//! `apply` is the single source of truth for operator behavior on values;
//! `result_type` is its static mirror. Keep the two in step: a type the
//! static side accepts must evaluate without a `TypeMismatch`.

use std::cmp::Ordering;
use std::fmt;

use crate::{EvalError, StaticType, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Ordering comparison (`<`, `<=`, `>`, `>=`).
    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq
        )
    }

    /// Equality comparison (`==`, `!=`).
    pub fn is_equality(self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::NotEq)
    }

    /// Static result type for operands of the given types.
    ///
    /// Returns `None` when the combination cannot be typed ahead of time.
    pub fn result_type(self, left: StaticType, right: StaticType) -> Option<StaticType> {
        match self {
            BinaryOp::Add if left == StaticType::Str || right == StaticType::Str => {
                let typed = |t: StaticType| !matches!(t, StaticType::Dynamic | StaticType::Null);
                if !typed(left) || !typed(right) {
                    None
                } else {
                    Some(StaticType::Str)
                }
            }
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Mod => {
                left.promote(right)
            }
            BinaryOp::Div => left.promote(right).map(|_| StaticType::Float),
            BinaryOp::Eq | BinaryOp::NotEq => {
                let comparable = left.promote(right).is_some()
                    || (left == right
                        && matches!(left, StaticType::Bool | StaticType::Str | StaticType::Null));
                comparable.then_some(StaticType::Bool)
            }
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                left.promote(right).map(|_| StaticType::Bool)
            }
            BinaryOp::And | BinaryOp::Or => {
                (left == StaticType::Bool && right == StaticType::Bool)
                    .then_some(StaticType::Bool)
            }
        }
    }

    /// Evaluate the operator on two constant values.
    pub fn apply(self, left: &Value, right: &Value) -> Result<Value, EvalError> {
        let op = self.symbol();
        match (self, left, right) {
            // String concatenation accepts any non-null partner.
            (BinaryOp::Add, Value::Str(_), r) if !r.is_null() => {
                Ok(Value::Str(format!("{left}{right}")))
            }
            (BinaryOp::Add, l, Value::Str(_)) if !l.is_null() => {
                Ok(Value::Str(format!("{left}{right}")))
            }

            // Integer arithmetic with overflow detection.
            (BinaryOp::Add, Value::Int(a), Value::Int(b)) => {
                a.checked_add(*b).map(Value::Int).ok_or(EvalError::Overflow { op })
            }
            (BinaryOp::Sub, Value::Int(a), Value::Int(b)) => {
                a.checked_sub(*b).map(Value::Int).ok_or(EvalError::Overflow { op })
            }
            (BinaryOp::Mul, Value::Int(a), Value::Int(b)) => {
                a.checked_mul(*b).map(Value::Int).ok_or(EvalError::Overflow { op })
            }
            (BinaryOp::Mod, Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero),
            (BinaryOp::Mod, Value::Int(a), Value::Int(b)) => {
                a.checked_rem(*b).map(Value::Int).ok_or(EvalError::Overflow { op })
            }

            // Mixed or float arithmetic.
            (BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod, l, r)
                if is_number(l) && is_number(r) =>
            {
                let (a, b) = (l.as_f64(), r.as_f64());
                match self {
                    BinaryOp::Add => Ok(Value::Float(a + b)),
                    BinaryOp::Sub => Ok(Value::Float(a - b)),
                    BinaryOp::Mul => Ok(Value::Float(a * b)),
                    _ if b == 0.0 => Err(EvalError::DivisionByZero),
                    BinaryOp::Div => Ok(Value::Float(a / b)),
                    _ => Ok(Value::Float(a % b)),
                }
            }

            // Comparisons.
            (BinaryOp::Eq | BinaryOp::NotEq, l, r) => {
                let equal = match (l, r) {
                    (Value::Int(a), Value::Int(b)) => a == b,
                    (l, r) if is_number(l) && is_number(r) => {
                        l.as_f64().partial_cmp(&r.as_f64()).is_some_and(Ordering::is_eq)
                    }
                    (Value::Bool(a), Value::Bool(b)) => a == b,
                    (Value::Str(a), Value::Str(b)) => a == b,
                    (Value::Null, Value::Null) => true,
                    _ => {
                        return Err(EvalError::mismatch(
                            op,
                            &[l.static_type(), r.static_type()],
                        ))
                    }
                };
                Ok(Value::Bool(equal == (self == BinaryOp::Eq)))
            }
            (BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq, l, r)
                if is_number(l) && is_number(r) =>
            {
                let ordering = match (l, r) {
                    (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
                    _ => l.as_f64().partial_cmp(&r.as_f64()),
                };
                let holds = ordering.is_some_and(|ord| match self {
                    BinaryOp::Lt => ord.is_lt(),
                    BinaryOp::LtEq => ord.is_le(),
                    BinaryOp::Gt => ord.is_gt(),
                    _ => ord.is_ge(),
                });
                Ok(Value::Bool(holds))
            }

            // Boolean logic.
            (BinaryOp::And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            (BinaryOp::Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),

            _ => Err(EvalError::mismatch(
                op,
                &[left.static_type(), right.static_type()],
            )),
        }
    }
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }

    /// Static result type for an operand of the given type.
    pub fn result_type(self, operand: StaticType) -> Option<StaticType> {
        match (self, operand) {
            (UnaryOp::Neg, t) if t.is_numeric() => Some(t),
            (UnaryOp::Not, StaticType::Bool) => Some(StaticType::Bool),
            _ => None,
        }
    }

    /// Evaluate the operator on a constant value.
    pub fn apply(self, operand: &Value) -> Result<Value, EvalError> {
        match (self, operand) {
            (UnaryOp::Neg, Value::Int(n)) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or(EvalError::Overflow { op: "-" }),
            (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            _ => Err(EvalError::mismatch(self.symbol(), &[operand.static_type()])),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

fn is_number(value: &Value) -> bool {
    matches!(value, Value::Int(_) | Value::Float(_))
}
