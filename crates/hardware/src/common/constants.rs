//! Global fabric constants.
//!
//! This module defines the constants shared by the word assembler, the boot
//! sequencer and the memory model. It includes:
//! 1. **Word Geometry:** Bytes per bus word and the full-word strobe mask.
//! 2. **Boot Layout:** The address of the first boot word.
//! 3. **Address Space:** Limits imposed by the 32-bit bus.

/// Number of bytes in one bus word.
pub const WORD_BYTES: u32 = 4;

/// Write strobe with every byte lane enabled.
pub const FULL_WORD_STROBE: u8 = 0b1111;

/// Mask of the valid bits of a write strobe (one bit per byte lane).
pub const STROBE_MASK: u8 = 0b1111;

/// Address of the first word written by the boot sequencer.
pub const BOOT_BASE_ADDR: u32 = 0;

/// Longest boot image, in words, whose addresses fit the 32-bit bus.
pub const MAX_BOOT_WORDS: u32 = u32::MAX / WORD_BYTES;

/// Largest SRAM the 32-bit bus can address, in bytes.
pub const MAX_SRAM_BYTES: u64 = 1 << 32;
