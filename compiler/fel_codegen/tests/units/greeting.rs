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
        let var_0: String = ctx.get_str("name");   // name
        Value::from(format!("{}{}", var_0, "!"))
    }
}
