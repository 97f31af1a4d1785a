//! Synchronized state abstraction for platform-agnostic shared access.
//!
//! The encoder entity is mutated from the poll tick and from application
//! code calling `set_value`, so it has to be shared between tasks. This
//! module provides the `SharedState` trait that abstracts over the
//! synchronization mechanism: Embassy's critical-section mutex on embedded
//! targets, a plain `RefCell` for single-threaded host tests.

/// Platform-agnostic synchronized state access.
///
/// # Example
///
/// ```ignore
/// fn tick<S: SharedState<RotaryEncoder<A, B, St>>>(shared: &S) {
///     shared.with_mut(|encoder| encoder.poll());
/// }
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

// ============================================================================
// Embassy Implementation
// ============================================================================

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Embassy-based synchronized state using a critical-section mutex.
///
/// The critical section ensures atomic access even when tasks on different
/// priority levels touch the same entity.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    /// Creates a new `EmbassyState` wrapping the given value.
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock synchronized state using `RefCell` for single-threaded testing.
///
/// # Panics
///
/// Panics if borrowing rules are violated (e.g. calling `with_mut` while
/// `with` is active). This indicates a bug in the test code.
pub struct MockState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> MockState<T> {
    /// Creates a new `MockState` wrapping the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }
}

impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_state_read_modify_read() {
        let state = MockState::new(0u32);

        assert_eq!(state.with(|v| *v), 0);
        state.with_mut(|v| *v += 10);
        assert_eq!(state.with(|v| *v), 10);
    }

    #[test]
    fn mock_state_closure_return_value() {
        let state = MockState::new([1i32, 2, 3]);
        let sum: i32 = state.with(|v| v.iter().sum());
        assert_eq!(sum, 6);
    }
}
