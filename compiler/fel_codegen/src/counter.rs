//! Name counter services.
//!
//! Unit names and hoisted-field names must stay unique for the life of the
//! process, across every generator instance and thread. Each is drawn from
//! its own `NameCounter`; the lock is held only for the read-increment.
//!
//! Generators receive counters as `Arc`s so tests can inject private
//! instances and inspect or reset them.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::CodegenError;

/// Monotonic counter behind an exclusive lock.
#[derive(Debug, Default)]
pub struct NameCounter {
    next: Mutex<u64>,
}

impl NameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next value.
    pub fn next(&self) -> Result<u64, CodegenError> {
        let mut next = self.next.lock();
        let value = *next;
        *next = value
            .checked_add(1)
            .ok_or_else(|| CodegenError::invariant("name counter exhausted"))?;
        Ok(value)
    }

    /// Value the next call to [`NameCounter::next`] will return.
    pub fn peek(&self) -> u64 {
        *self.next.lock()
    }

    /// Restart from zero. Only meaningful for counters no live generator
    /// shares with other callers.
    pub fn reset(&self) {
        *self.next.lock() = 0;
    }
}

static UNIT_COUNTER: OnceLock<Arc<NameCounter>> = OnceLock::new();
static FIELD_COUNTER: OnceLock<Arc<NameCounter>> = OnceLock::new();

/// Process-wide counter for compilation-unit names.
pub fn unit_counter() -> Arc<NameCounter> {
    Arc::clone(UNIT_COUNTER.get_or_init(Default::default))
}

/// Process-wide counter for hoisted-field names.
pub fn field_counter() -> Arc<NameCounter> {
    Arc::clone(FIELD_COUNTER.get_or_init(Default::default))
}
