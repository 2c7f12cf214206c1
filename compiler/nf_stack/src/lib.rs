//! Stack growth for recursive building and evaluation.
//!
//! Nested blocks, nested lambdas and deep script recursion all recurse on
//! the native stack: the builder recurses once per `{ }` level, the
//! interpreter once per block, call and sub-expression. Wrapping those
//! entry points in [`ensure_sufficient_stack`] grows the stack on demand
//! instead of overflowing.
//!
//! - **Native targets**: `stacker::maybe_grow` with a 128KB red zone and
//!   2MB segments.
//! - **WASM targets**: plain call.

/// Grow when less than this remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if the remaining space is below the red
/// zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
