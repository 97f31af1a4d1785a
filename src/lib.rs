#![cfg_attr(not(test), no_std)]

//! rotary_sense - Interrupt-driven quadrature decoder
//!
//! This library tracks a bounded integer counter updated from two-phase
//! rotary-encoder signals. Edge interrupts run a lock-free decode step over
//! shared atomic state; a cooperative poll tick publishes changes, persists
//! the counter across restarts and dispatches registered listeners.
//!
//! Platform access (pins, persistent storage) goes through traits under
//! [`platform`], with mock implementations for host testing; the decoder
//! logic itself is hardware-independent.

// Mock implementations store type-erased interrupt handlers, which needs a heap
#[cfg(any(test, feature = "mock"))]
extern crate alloc;

// Host tests need a critical-section implementation for the mock mutexes
#[cfg(test)]
use critical_section as _;

// Platform abstraction layer (pins, storage, mocks)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core infrastructure (logging, hashing, sync traits)
pub mod core;
