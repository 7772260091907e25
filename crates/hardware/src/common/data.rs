//! Memory Request Types.
//!
//! This module defines the transaction shape carried over the shared bus. It mirrors a
//! native valid/ready memory interface rather than a full AXI channel set:
//! 1. **Handshake:** `valid` is driven by the requester, `ready` by the memory sink.
//! 2. **Addressing:** One 32-bit word address per transaction.
//! 3. **Byte Lanes:** A 4-bit write strobe; a zero strobe denotes a read.

use super::constants::{FULL_WORD_STROBE, STROBE_MASK};

/// Kind of bus access a request performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch (a read with `is_instruction_fetch` set).
    Fetch,

    /// Data read; the sink fills `read_data`.
    Read,

    /// Data write of the byte lanes selected by the strobe.
    Write,
}

/// One memory transaction on the shared bus.
///
/// Requesters build a fresh value per transaction; the sink returns the same shape with
/// `ready` set and, for reads, `read_data` filled in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryRequest {
    /// Requester has a transaction on the bus.
    pub valid: bool,
    /// Transaction is an instruction fetch.
    pub is_instruction_fetch: bool,
    /// Sink accepted and completed the transaction.
    pub ready: bool,
    /// Byte address of the word being accessed.
    pub address: u32,
    /// Data to write (ignored for reads).
    pub write_data: u32,
    /// Byte lanes to write; bit `i` selects bits `8*i..8*i+8`.
    pub write_strobe: u8,
    /// Data returned by the sink for reads.
    pub read_data: u32,
}

impl MemoryRequest {
    /// Builds a data read of the word at `address`.
    pub const fn read(address: u32) -> Self {
        Self {
            valid: true,
            is_instruction_fetch: false,
            ready: false,
            address,
            write_data: 0,
            write_strobe: 0,
            read_data: 0,
        }
    }

    /// Builds a write of `data` to `address`, limited to the lanes in `strobe`.
    ///
    /// # Arguments
    ///
    /// * `address` - Byte address of the target word.
    /// * `data` - Word to write.
    /// * `strobe` - Byte-lane mask; bits above the low four are dropped.
    pub const fn write(address: u32, data: u32, strobe: u8) -> Self {
        Self {
            valid: true,
            is_instruction_fetch: false,
            ready: false,
            address,
            write_data: data,
            write_strobe: strobe & STROBE_MASK,
            read_data: 0,
        }
    }

    /// Builds a write of a whole word (all four lanes enabled).
    pub const fn write_word(address: u32, data: u32) -> Self {
        Self::write(address, data, FULL_WORD_STROBE)
    }

    /// Builds an instruction fetch of the word at `address`.
    pub const fn fetch(address: u32) -> Self {
        let mut request = Self::read(address);
        request.is_instruction_fetch = true;
        request
    }

    /// Classifies the request by its fetch flag and strobe.
    pub const fn access_type(&self) -> AccessType {
        if self.write_strobe & STROBE_MASK != 0 {
            AccessType::Write
        } else if self.is_instruction_fetch {
            AccessType::Fetch
        } else {
            AccessType::Read
        }
    }

    /// Returns `true` if the request writes at least one byte lane.
    pub const fn is_write(&self) -> bool {
        matches!(self.access_type(), AccessType::Write)
    }
}
