//! Rust literal syntax for constant values.

use fel_ir::Value;

/// Render `value` as a Rust literal expression.
pub fn rust_literal(value: &Value) -> String {
    match value {
        Value::Null => "()".to_string(),
        Value::Int(n) => format!("{n}_i64"),
        Value::Float(x) => {
            if x.is_nan() {
                "f64::NAN".to_string()
            } else if x.is_infinite() {
                if x.is_sign_positive() { "f64::INFINITY" } else { "f64::NEG_INFINITY" }.to_string()
            } else {
                // Debug keeps a trailing `.0` and full precision
                format!("{x:?}_f64")
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Str(s) => format!("{s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_literals_are_suffixed() {
        assert_eq!(rust_literal(&Value::Int(14)), "14_i64");
        assert_eq!(rust_literal(&Value::Int(-3)), "-3_i64");
        assert_eq!(rust_literal(&Value::Float(14.0)), "14.0_f64");
        assert_eq!(rust_literal(&Value::Float(0.1)), "0.1_f64");
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(rust_literal(&Value::Float(f64::NAN)), "f64::NAN");
        assert_eq!(rust_literal(&Value::Float(f64::INFINITY)), "f64::INFINITY");
        assert_eq!(
            rust_literal(&Value::Float(f64::NEG_INFINITY)),
            "f64::NEG_INFINITY"
        );
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(rust_literal(&Value::from("a\"b\n")), r#""a\"b\n""#);
        assert_eq!(rust_literal(&Value::from("${expression}")), "\"${expression}\"");
    }

    #[test]
    fn test_null_and_bool() {
        assert_eq!(rust_literal(&Value::Null), "()");
        assert_eq!(rust_literal(&Value::Bool(false)), "false");
    }
}
