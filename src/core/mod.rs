//! Core infrastructure
//!
//! This module contains runtime-agnostic infrastructure shared by the
//! device drivers: logging macros, stable name hashing for storage keys,
//! and synchronization trait abstractions.

pub mod hash;
pub mod logging;
pub mod traits;
