//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the decoder core. All
//! platform-specific code is isolated behind the traits defined here; the
//! sensor logic itself never touches a HAL directly.

pub mod error;
pub mod traits;

// Mock implementations for host testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{GpioError, PlatformError, Result, StorageError};
pub use traits::{EdgeTrigger, InputPinInterface, PinReader, StorageInterface};
