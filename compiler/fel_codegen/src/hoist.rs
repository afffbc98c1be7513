//! Hoisting buffer: constants materialized as fields of the generated unit.
//!
//! Rendering pushes every hoisted constant here in discovery order; assembly
//! drains the buffer once, oldest first, into the field block. The buffer is
//! owned by a single generation session. Only the field-name counter is
//! shared process-wide.

use std::collections::VecDeque;
use std::sync::Arc;

use fel_ir::{StaticType, Value};

use crate::counter::NameCounter;
use crate::literal::rust_literal;
use crate::CodegenError;

/// One constant waiting to become a field.
#[derive(Clone, Debug, PartialEq)]
pub struct HoistedConst {
    pub name: String,
    pub value: Value,
    pub ty: StaticType,
}

impl HoistedConst {
    /// Field declaration text, e.g. `const attr_0: i64 = 14_i64;`.
    pub fn declaration(&self) -> String {
        format!(
            "const {}: {} = {};",
            self.name,
            self.ty.field_type(),
            rust_literal(&self.value)
        )
    }
}

/// FIFO of hoisted constants for one generation session.
#[derive(Debug)]
pub struct HoistBuffer {
    entries: VecDeque<HoistedConst>,
    names: Arc<NameCounter>,
    prefix: String,
}

impl HoistBuffer {
    pub fn new(names: Arc<NameCounter>, prefix: impl Into<String>) -> Self {
        HoistBuffer {
            entries: VecDeque::new(),
            names,
            prefix: prefix.into(),
        }
    }

    /// Queue `value` and return the field name it will be declared under.
    pub fn push(&mut self, value: Value, ty: StaticType) -> Result<String, CodegenError> {
        let name = format!("{}{}", self.prefix, self.names.next()?);
        tracing::trace!(field = %name, %ty, "hoisted constant");
        self.entries.push_back(HoistedConst {
            name: name.clone(),
            value,
            ty,
        });
        Ok(name)
    }

    /// Remove the oldest entry; `None` once empty.
    pub fn pop(&mut self) -> Option<HoistedConst> {
        self.entries.pop_front()
    }

    /// Remove every entry, oldest first.
    pub fn drain(&mut self) -> Vec<HoistedConst> {
        self.entries.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
