//! Common types and constants shared by the arbiter, the boot sequencer and the simulator.
//!
//! This module provides the fundamental building blocks of the fabric model. It includes:
//! 1. **Identifiers:** The `RequesterId` newtype naming a bus requester.
//! 2. **Constants:** Word size, strobe masks and the boot load address.
//! 3. **Memory Requests:** The valid/ready/address/data/strobe transaction shape.
//! 4. **Error Handling:** Configuration, arbitration and simulation error types.

/// Common constants used throughout the model.
pub mod constants;

/// Memory request definitions.
pub mod data;

/// Error types for configuration, arbitration and simulation.
pub mod error;

/// Requester identifier type.
pub mod id;

pub use constants::{
    BOOT_BASE_ADDR, FULL_WORD_STROBE, MAX_BOOT_WORDS, MAX_SRAM_BYTES, WORD_BYTES,
};
pub use data::{AccessType, MemoryRequest};
pub use error::{ArbitrationError, ConfigError, SimError};
pub use id::RequesterId;
