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
    const attr_0: i64 = 6_i64;

    pub fn new(ctx: &'ctx dyn Context) -> Self {
        Self { ctx }
    }

    pub fn eval(&self) -> Value {
        let ctx = self.ctx;
        let var_0: f64 = ctx.get_int("a") as f64;   // a
        Value::from(((var_0 as i64) + (Self::attr_0 as i64)))
    }
}
