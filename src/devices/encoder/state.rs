//! Shared decoder state and quadrature decode step
//!
//! [`DecoderState`] is the only data shared between the interrupt context
//! (edge decode) and the polling context (publication). Every field is an
//! atomic cell, so no lock is taken on either side:
//!
//! - `counter` has a single writer (the decode step; `set_value` runs in the
//!   poll context and counts as a decode step) and a single reader (the poll
//!   routine), which makes plain load/store sufficient — no CAS needed.
//! - `last_a`/`last_b` are touched only by the decode step, which cannot
//!   re-enter itself.
//! - Bounds are written once during setup, before any interrupt is attached.
//!
//! The counter is `i32`: one native atomic word on the 32-bit targets this
//! crate supports. A wider counter would need a critical-section read on the
//! poll side to avoid tearing.

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

/// State shared between the decode interrupt and the poll routine.
///
/// `const`-constructible so it can live in a `static`, which is what gives
/// the interrupt closure its `'static` capture.
#[derive(Debug)]
pub struct DecoderState {
    counter: AtomicI32,
    last_a: AtomicBool,
    last_b: AtomicBool,
    min_value: AtomicI32,
    max_value: AtomicI32,
}

impl DecoderState {
    /// Create a new state with full-range bounds and a zero counter
    pub const fn new() -> Self {
        Self {
            counter: AtomicI32::new(0),
            last_a: AtomicBool::new(false),
            last_b: AtomicBool::new(false),
            min_value: AtomicI32::new(i32::MIN),
            max_value: AtomicI32::new(i32::MAX),
        }
    }

    /// Current counter value
    pub fn counter(&self) -> i32 {
        self.counter.load(Ordering::Acquire)
    }

    /// Lower counter bound
    pub fn min_value(&self) -> i32 {
        self.min_value.load(Ordering::Relaxed)
    }

    /// Upper counter bound
    pub fn max_value(&self) -> i32 {
        self.max_value.load(Ordering::Relaxed)
    }

    /// Set the bounds. Called once during setup, before interrupts attach.
    pub(crate) fn configure_bounds(&self, min_value: i32, max_value: i32) {
        self.min_value.store(min_value, Ordering::Relaxed);
        self.max_value.store(max_value, Ordering::Relaxed);
    }

    /// Overwrite the counter. Runs in the poll context (seed and `set_value`).
    pub(crate) fn set_counter(&self, value: i32) {
        self.counter.store(value, Ordering::Release);
    }

    /// Quadrature decode step. Runs in interrupt context on any edge of
    /// either pin; `pin_a`/`pin_b` are the freshly read levels.
    ///
    /// Direction is only inferred when the previous observation was the
    /// both-high rest phase, which yields one count per detent and rejects
    /// most contact bounce without a debounce timer. Transitions that start
    /// anywhere else just refresh the stored levels. Encoders whose sequence
    /// never passes through both-high between detents will not count; that
    /// matches the supported hardware and is deliberate.
    ///
    /// Never blocks, never allocates, never fails.
    pub fn apply_edge(&self, pin_a: bool, pin_b: bool) {
        if self.last_a.load(Ordering::Relaxed) && self.last_b.load(Ordering::Relaxed) {
            if !pin_a {
                let counter = self.counter.load(Ordering::Relaxed);
                if counter > self.min_value.load(Ordering::Relaxed) {
                    self.counter.store(counter - 1, Ordering::Release);
                }
            } else if !pin_b {
                let counter = self.counter.load(Ordering::Relaxed);
                if counter < self.max_value.load(Ordering::Relaxed) {
                    self.counter.store(counter + 1, Ordering::Release);
                }
            }
        }
        self.last_a.store(pin_a, Ordering::Relaxed);
        self.last_b.store(pin_b, Ordering::Relaxed);
    }
}

impl Default for DecoderState {
    fn default() -> Self {
        Self::new()
    }
}
