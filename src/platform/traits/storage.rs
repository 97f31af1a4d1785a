//! Persistent key-value storage trait
//!
//! This module defines the storage interface used to persist small values
//! (such as sensor counters) across restarts. Keys are stable 32-bit
//! identifiers derived from the owning component's configured name, so the
//! same component restores its own value after a power cycle.

use crate::platform::Result;

/// Persistent key-value storage interface
///
/// Platform implementations back this with whatever survives a restart
/// (RTC memory, flash, NVS). The decoder core treats `save` as synchronous
/// and fire-and-forget; wear management is the implementation's concern.
pub trait StorageInterface {
    /// Load the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage(StorageError::NotFound)` if no value
    /// has been stored under `key`, or `StorageError::ReadFailed` if the
    /// store is unreadable or corrupted.
    fn load(&mut self, key: u32) -> Result<i32>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Storage(StorageError::WriteFailed)` if the
    /// value could not be written.
    fn save(&mut self, key: u32, value: i32) -> Result<()>;
}

// Forwarding impl so callers can keep ownership of a storage backend and
// lend it to a driver (mirrors embedded-hal's &mut forwarding).
impl<T: StorageInterface> StorageInterface for &mut T {
    fn load(&mut self, key: u32) -> Result<i32> {
        (**self).load(key)
    }

    fn save(&mut self, key: u32, value: i32) -> Result<()> {
        (**self).save(key, value)
    }
}
