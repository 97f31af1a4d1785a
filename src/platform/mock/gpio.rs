//! Mock input pin implementation for testing
//!
//! A mock pin wraps a shared [`PinLine`] that represents the electrical
//! signal. Tests drive the line with [`PinLine::set_level`]; level changes
//! fire the attached interrupt handler synchronously, exactly like an edge
//! interrupt would on hardware. The level is stored before the handler runs,
//! so a handler reading the line observes the fresh state.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use alloc::boxed::Box;
use alloc::sync::Arc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::platform::traits::{EdgeTrigger, InputPinInterface, PinReader};
use crate::platform::Result;

type EdgeHandler = (EdgeTrigger, Box<dyn Fn() + Send>);

/// Simulated electrical line behind a mock pin.
///
/// Shared between the test (which drives levels) and the pin/reader handles
/// owned by the driver under test.
pub struct PinLine {
    level: AtomicBool,
    handler: Mutex<CriticalSectionRawMutex, RefCell<Option<EdgeHandler>>>,
}

impl PinLine {
    fn new(initial_level: bool) -> Self {
        Self {
            level: AtomicBool::new(initial_level),
            handler: Mutex::new(RefCell::new(None)),
        }
    }

    /// Current level of the line
    pub fn level(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }

    /// Drive the line to `high`.
    ///
    /// If this changes the level and the transition matches the attached
    /// handler's trigger, the handler runs synchronously before this
    /// returns. Driving the line to its current level is a no-op.
    pub fn set_level(&self, high: bool) {
        let previous = self.level.swap(high, Ordering::SeqCst);
        if previous == high {
            return;
        }

        self.handler.lock(|slot| {
            if let Some((trigger, handler)) = slot.borrow().as_ref() {
                let fires = match trigger {
                    EdgeTrigger::RisingEdge => high,
                    EdgeTrigger::FallingEdge => !high,
                    EdgeTrigger::AnyEdge => true,
                };
                if fires {
                    handler();
                }
            }
        });
    }

    fn attach(&self, trigger: EdgeTrigger, handler: Box<dyn Fn() + Send>) {
        self.handler.lock(|slot| {
            *slot.borrow_mut() = Some((trigger, handler));
        });
    }
}

/// Mock input pin
///
/// Created with an initial level; hand out the shared line via
/// [`MockPin::line`] before moving the pin into the driver under test.
pub struct MockPin {
    line: Arc<PinLine>,
}

impl MockPin {
    /// Create a new mock pin with the given initial level
    pub fn new(initial_level: bool) -> Self {
        Self {
            line: Arc::new(PinLine::new(initial_level)),
        }
    }

    /// Shared handle to the line for driving levels from a test
    pub fn line(&self) -> Arc<PinLine> {
        Arc::clone(&self.line)
    }
}

/// Interrupt-safe read handle for a mock pin
#[derive(Clone)]
pub struct MockPinReader {
    line: Arc<PinLine>,
}

impl PinReader for MockPinReader {
    fn read(&self) -> bool {
        self.line.level()
    }
}

impl InputPinInterface for MockPin {
    type Reader = MockPinReader;

    fn read(&self) -> bool {
        self.line.level()
    }

    fn reader(&self) -> Self::Reader {
        MockPinReader {
            line: Arc::clone(&self.line),
        }
    }

    fn attach_interrupt<F>(&mut self, trigger: EdgeTrigger, handler: F) -> Result<()>
    where
        F: Fn() + Send + 'static,
    {
        self.line.attach(trigger, Box::new(handler));
        Ok(())
    }
}
