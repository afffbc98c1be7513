//! Helpers shared by the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use fel_codegen::{GeneratorConfig, NameCounter, SourceGenerator};
use fel_ir::{Ast, BinaryOp};

/// Generator with the builtin skeleton and private name counters.
pub fn isolated_generator() -> SourceGenerator {
    SourceGenerator::with_config(GeneratorConfig::default())
        .expect("builtin template")
        .with_counters(Arc::new(NameCounter::new()), Arc::new(NameCounter::new()))
}

/// `2 + 3 * 4`
pub fn two_plus_three_times_four() -> Ast {
    Ast::build(|t| {
        let two = t.constant(2_i64);
        let three = t.constant(3_i64);
        let four = t.constant(4_i64);
        let mul = t.binary(BinaryOp::Mul, three, four);
        t.binary(BinaryOp::Add, two, mul)
    })
}

/// `name + name + name`
pub fn triple_sum(name: &str) -> Ast {
    Ast::build(|t| {
        let first = t.var(name);
        let second = t.var(name);
        let third = t.var(name);
        let lhs = t.binary(BinaryOp::Add, first, second);
        t.binary(BinaryOp::Add, lhs, third)
    })
}

/// Identifier declared after `marker` on each line, up to its `:`.
pub fn declared<'a>(source: &'a str, marker: &str) -> Vec<&'a str> {
    source
        .lines()
        .filter_map(|line| {
            let start = line.find(marker)? + marker.len();
            let rest = &line[start..];
            let end = rest.find(':')?;
            Some(rest[..end].trim())
        })
        .collect()
}

/// Hoisted field names declared in `source`.
pub fn field_names(source: &str) -> Vec<&str> {
    declared(source, "const ")
}

/// Cached local names declared in `source`.
pub fn local_names(source: &str) -> Vec<&str> {
    declared(source, "let ")
        .into_iter()
        .filter(|name| name.starts_with("var_"))
        .collect()
}

/// The unit's final expression: the argument of `Value::from`.
pub fn expression(source: &str) -> &str {
    let start = source.find("Value::from(").map_or(0, |i| i + "Value::from(".len());
    let end = source.rfind(")\n    }").unwrap_or(source.len());
    &source[start..end]
}

/// Rename every `prefix` + digits identifier to `prefix` + its order of
/// first appearance, for each of `prefixes`.
pub fn normalize_names(source: &str, prefixes: &[&str]) -> String {
    let mut out = source.to_string();
    for prefix in prefixes {
        out = renumber(&out, prefix);
    }
    out
}

fn renumber(source: &str, prefix: &str) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(at) = rest.find(prefix) {
        let after = &rest[at + prefix.len()..];
        let digits = after.chars().take_while(char::is_ascii_digit).count();
        out.push_str(&rest[..at]);
        if digits == 0 {
            out.push_str(prefix);
        } else {
            let number = &after[..digits];
            let index = match seen.iter().position(|n| n == number) {
                Some(i) => i,
                None => {
                    seen.push(number.to_string());
                    seen.len() - 1
                }
            };
            out.push_str(&format!("{prefix}#{index}"));
        }
        rest = &after[digits..];
    }
    out.push_str(rest);
    out
}
