//! Mock persistent storage implementation for testing
//!
//! In-memory key-value store with operation counters and failure injection
//! for test verification. Values survive as long as the mock itself, which
//! lets tests simulate a restart by moving the mock into a fresh driver.

use heapless::FnvIndexMap;

use crate::platform::error::{PlatformError, StorageError};
use crate::platform::traits::StorageInterface;
use crate::platform::Result;

/// Maximum number of stored keys
const MAX_KEYS: usize = 8;

/// Mock storage implementation
#[derive(Default)]
pub struct MockStorage {
    values: FnvIndexMap<u32, i32, MAX_KEYS>,
    /// Number of successful save operations
    pub save_count: usize,
    /// Number of load attempts (including misses)
    pub load_count: usize,
    /// Fail the next save with `WriteFailed`
    pub fail_next_save: bool,
    /// Fail every load with `ReadFailed` (simulates a corrupted store)
    pub fail_loads: bool,
}

impl MockStorage {
    /// Create a new, empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a value, bypassing counters (simulates a prior run)
    pub fn seed(&mut self, key: u32, value: i32) {
        // Capacity overflow is a test bug, not a runtime condition
        self.values.insert(key, value).unwrap();
    }

    /// Value currently stored under `key`, if any
    pub fn stored(&self, key: u32) -> Option<i32> {
        self.values.get(&key).copied()
    }
}

impl StorageInterface for MockStorage {
    fn load(&mut self, key: u32) -> Result<i32> {
        self.load_count += 1;
        if self.fail_loads {
            return Err(PlatformError::Storage(StorageError::ReadFailed));
        }
        self.values
            .get(&key)
            .copied()
            .ok_or(PlatformError::Storage(StorageError::NotFound))
    }

    fn save(&mut self, key: u32, value: i32) -> Result<()> {
        if self.fail_next_save {
            self.fail_next_save = false;
            return Err(PlatformError::Storage(StorageError::WriteFailed));
        }
        self.values
            .insert(key, value)
            .map_err(|_| PlatformError::Storage(StorageError::WriteFailed))?;
        self.save_count += 1;
        Ok(())
    }
}
