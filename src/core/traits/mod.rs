//! Core traits for platform-agnostic infrastructure.
//!
//! Trait abstractions that decouple the decoder core from its runtime:
//! `SharedState<T>` hides whether an entity is guarded by an Embassy
//! critical-section mutex (embedded) or a `RefCell` (host tests).

pub mod sync;

// Re-export traits and mock implementations (always available)
pub use sync::{MockState, SharedState};

// Re-export Embassy implementations when the embassy feature is enabled
#[cfg(feature = "embassy")]
pub use sync::EmbassyState;
