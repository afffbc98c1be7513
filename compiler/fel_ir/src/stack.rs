//! Stack growth for recursive tree walks.
//!
//! Expression trees come from user input and can nest arbitrarily deep.
//! Every recursive walk over a tree (evaluation, folding, caching,
//! rendering) goes through [`ensure_sufficient_stack`].

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Grow when less than 64KB remains.
    const RED_ZONE: usize = 64 * 1024;

    /// Grow by 1MB segments.
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
