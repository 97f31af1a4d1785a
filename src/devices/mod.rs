//! Device drivers
//!
//! This module contains device drivers built on the platform abstraction
//! traits, so they run unchanged against real HAL pins or the host mocks.
//!
//! ## Modules
//!
//! - `encoder`: interrupt-driven quadrature rotary encoder sensor

pub mod encoder;
