//! Flash boot path.
//!
//! This module implements the logic that copies the firmware image from serial flash into
//! shared memory. It provides:
//! 1. **Flash:** `FlashImage`, an in-memory byte stream standing in for the SPI flash.
//! 2. **Assembler:** `WordAssembler`, packing bytes least-significant first into 32-bit words.
//! 3. **Sequencer:** `BootSequencer`, the request/grant/write/release state machine that raises
//!    `boot_done` and `cores_enabled` once every word is written.

/// Little-endian word assembly.
pub mod assembler;

/// Firmware byte streams.
pub mod flash;

/// Boot state machine.
pub mod sequencer;

pub use assembler::{WordAssembler, WordBuffer};
pub use flash::FlashImage;
pub use sequencer::{BootInputs, BootProgress, BootSequencer, BootSignals, BootState};
