// Generated by fel_codegen. Do not edit.
#![allow(
    non_camel_case_types,
    non_upper_case_globals,
    unused_parens,
    unused_variables,
    clippy::all,
    clippy::pedantic
)]

use fel_ir::{Context, Value};

pub struct Fel_0<'ctx> {
    ctx: &'ctx dyn Context,
}

impl<'ctx> Fel_0<'ctx> {
    pub fn new(ctx: &'ctx dyn Context) -> Self {
        Self { ctx }
    }

    pub fn eval(&self) -> Value {
        let ctx = self.ctx;
        let var_0: f64 = ctx.get_float("x") as f64;   // x
        let var_1: f64 = ctx.get_int("a") as f64;   // a
        Value::from(((((var_0 as f64) * (2.5_f64 as f64)) as f64) >= (((var_1 as f64) / (4_i64 as f64)) as f64)))
    }
}
