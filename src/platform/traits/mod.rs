//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod gpio;
pub mod storage;

// Re-export trait interfaces
pub use gpio::{EdgeTrigger, InputPinInterface, PinReader};
pub use storage::StorageInterface;
