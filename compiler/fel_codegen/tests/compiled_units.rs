//! Golden tests for generated units.
//!
//! Each file in `tests/units/` is the exact unit the generator emits for one
//! expression. The files are compiled into this test binary as modules, so a
//! change that makes generated source ill-typed fails the build. Every test
//! regenerates its unit and compares it with the file, then runs the
//! compiled `eval` against the interpreter.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

mod common;

#[path = "units/answer.rs"]
mod answer;
#[path = "units/count.rs"]
mod count;
#[path = "units/greeting.rs"]
mod greeting;
#[path = "units/ratio.rs"]
mod ratio;
#[path = "units/sum.rs"]
mod sum;

use common::isolated_generator;
use fel_ir::{Ast, BinaryOp, MapContext, Value};
use pretty_assertions::assert_eq;

/// Drop blank lines and trailing whitespace. Empty field and local blocks
/// leave blank lines that carry no meaning.
fn normalize(source: &str) -> String {
    source
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate `build` under `ctx` and compare it with `golden`. Returns the
/// interpreter's value for the same tree.
fn check_golden(ctx: &MapContext, build: fn() -> Ast, golden: &str) -> Value {
    let unit = isolated_generator()
        .get_source(ctx, &mut build())
        .unwrap();
    assert_eq!(normalize(unit.source()), normalize(golden));
    build().eval(ctx).unwrap()
}

#[test]
fn variable_plus_folded_product() {
    // a + 2 * 3
    fn build() -> Ast {
        Ast::build(|t| {
            let a = t.var("a");
            let two = t.constant(2_i64);
            let three = t.constant(3_i64);
            let mul = t.binary(BinaryOp::Mul, two, three);
            t.binary(BinaryOp::Add, a, mul)
        })
    }
    let ctx = MapContext::new().with("a", 4_i64);
    let expected = check_golden(&ctx, build, include_str!("units/sum.rs"));
    assert_eq!(sum::Fel_0::new(&ctx).eval(), expected);
    assert_eq!(expected, Value::Int(10));
}

#[test]
fn mixed_comparison() {
    // x * 2.5 >= a / 4
    fn build() -> Ast {
        Ast::build(|t| {
            let x = t.var("x");
            let scale = t.constant(2.5);
            let lhs = t.binary(BinaryOp::Mul, x, scale);
            let a = t.var("a");
            let four = t.constant(4_i64);
            let rhs = t.binary(BinaryOp::Div, a, four);
            t.binary(BinaryOp::GtEq, lhs, rhs)
        })
    }
    let ctx = MapContext::new().with("x", 1.5).with("a", 6_i64);
    let expected = check_golden(&ctx, build, include_str!("units/ratio.rs"));
    assert_eq!(ratio::Fel_0::new(&ctx).eval(), expected);

    // The unit reads the context at run time, not generation time.
    let later = MapContext::new().with("x", 0.5).with("a", 6_i64);
    assert_eq!(ratio::Fel_0::new(&later).eval(), build().eval(&later).unwrap());
}

#[test]
fn string_concatenation() {
    // name + "!"
    fn build() -> Ast {
        Ast::build(|t| {
            let name = t.var("name");
            let bang = t.constant("!");
            t.binary(BinaryOp::Add, name, bang)
        })
    }
    let ctx = MapContext::new().with("name", "fel");
    let expected = check_golden(&ctx, build, include_str!("units/greeting.rs"));
    assert_eq!(greeting::Fel_0::new(&ctx).eval(), expected);
    assert_eq!(expected, Value::from("fel!"));
}

#[test]
fn constant_expression() {
    // (1 + 2) * 14
    fn build() -> Ast {
        Ast::build(|t| {
            let one = t.constant(1_i64);
            let two = t.constant(2_i64);
            let sum = t.binary(BinaryOp::Add, one, two);
            let fourteen = t.constant(14_i64);
            t.binary(BinaryOp::Mul, sum, fourteen)
        })
    }
    let ctx = MapContext::new();
    let expected = check_golden(&ctx, build, include_str!("units/answer.rs"));
    assert_eq!(answer::Fel_0::new(&ctx).eval(), expected);
}

#[test]
fn bare_integer_variable() {
    fn build() -> Ast {
        Ast::build(|t| t.var("a"))
    }
    let ctx = MapContext::new().with("a", 3_i64);
    let expected = check_golden(&ctx, build, include_str!("units/count.rs"));
    assert_eq!(count::Fel_0::new(&ctx).eval(), expected);
    assert_eq!(expected, Value::Int(3));
}
