//! Mock platform implementations for host testing
//!
//! These mocks stand in for real pins and persistent storage so the decoder
//! core can be exercised on the host, including its interrupt path: driving
//! a mock pin line runs the attached handler synchronously, in the same way
//! a GPIO edge interrupt preempts the polling context on hardware.

pub mod gpio;
pub mod storage;

pub use gpio::{MockPin, MockPinReader, PinLine};
pub use storage::MockStorage;
