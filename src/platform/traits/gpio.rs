//! Digital input pin trait
//!
//! This module defines the input pin interface that platform implementations
//! must provide: a readable digital level plus edge-triggered interrupt
//! registration.

use crate::platform::Result;

/// Edge condition that triggers an attached interrupt handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeTrigger {
    /// Low-to-high transitions only
    RisingEdge,
    /// High-to-low transitions only
    FallingEdge,
    /// Both transitions
    AnyEdge,
}

/// Interrupt-context read handle for an input pin.
///
/// A `PinReader` is a cheap, cloneable view of the pin's level that is safe
/// to read from the interrupt handler while the pin itself stays owned by
/// the driver. Reads must not block and must not fail.
pub trait PinReader: Clone + Send {
    /// Read the current digital level (`true` = high)
    fn read(&self) -> bool;
}

/// Digital input pin interface
///
/// Platform implementations must provide this interface for input pins used
/// by interrupt-driven drivers.
///
/// # Safety Invariants
///
/// - Only one owner per pin instance
/// - `attach_interrupt` is called at most once per pin during setup; the
///   handler stays attached for the lifetime of the process
/// - The handler runs in interrupt context: it must not block or allocate
pub trait InputPinInterface {
    /// Interrupt-safe read handle type for this pin
    type Reader: PinReader + 'static;

    /// Read the current digital level (`true` = high)
    fn read(&self) -> bool;

    /// Obtain an interrupt-safe read handle for this pin
    fn reader(&self) -> Self::Reader;

    /// Attach an edge-triggered interrupt handler
    ///
    /// The handler is invoked from interrupt context whenever the pin level
    /// transitions according to `trigger`.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio` if the platform cannot register the
    /// handler (e.g. no interrupt slot available for the pin).
    fn attach_interrupt<F>(&mut self, trigger: EdgeTrigger, handler: F) -> Result<()>
    where
        F: Fn() + Send + 'static;
}
