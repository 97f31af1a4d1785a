//! Listener registry for published counter values
//!
//! An ordered, append-only collection of callbacks notified on every
//! published change. Registration happens at configuration time; there is
//! no removal. Callbacks run synchronously in registration order on the
//! poll tick, so they must be short.
//!
//! A panicking listener is *not* caught here: masking it would hide an
//! application bug, so it propagates per the host environment's policy.

use heapless::Vec;

use crate::platform::{PlatformError, Result};

/// Maximum number of registered listeners per encoder
pub const MAX_LISTENERS: usize = 8;

/// Callback invoked with each newly published counter value
pub type Listener = &'static (dyn Fn(i32) + Sync);

/// Ordered listener collection
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener, MAX_LISTENERS>,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Append a listener.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` once `MAX_LISTENERS`
    /// listeners are registered.
    pub fn register(&mut self, listener: Listener) -> Result<()> {
        self.listeners
            .push(listener)
            .map_err(|_| PlatformError::ResourceUnavailable)
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every listener in registration order with `value`
    pub fn call(&self, value: i32) {
        for listener in &self.listeners {
            listener(value);
        }
    }
}
