//! Shared SRAM.
//!
//! This module implements the memory the boot image is written into. It provides:
//! 1. **Storage:** A byte array sized from configuration.
//! 2. **Bus Port:** Word transactions with per-lane write strobes, little-endian.
//! 3. **Inspection:** Word reads for tests and reports, outside the bus.

use tracing::warn;

use crate::common::constants::WORD_BYTES;
use crate::common::data::MemoryRequest;
use crate::soc::traits::BusPort;

/// Byte-addressed SRAM on the shared bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sram {
    bytes: Vec<u8>,
}

impl Sram {
    /// Creates a zero-filled SRAM of `size_bytes` bytes.
    pub fn new(size_bytes: usize) -> Self {
        Self {
            bytes: vec![0; size_bytes],
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-sized SRAM.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reads the word containing `address` without a bus transaction.
    ///
    /// # Returns
    ///
    /// The little-endian word, or `None` if the word lies outside the SRAM.
    pub fn word_at(&self, address: u32) -> Option<u32> {
        let base = Self::word_base(address);
        let lanes = self.bytes.get(base..base + WORD_BYTES as usize)?;
        Some(u32::from_le_bytes([lanes[0], lanes[1], lanes[2], lanes[3]]))
    }

    /// Copies `data` into the SRAM at byte `offset`; out-of-range data is dropped.
    pub fn load(&mut self, offset: usize, data: &[u8]) {
        if let Some(dst) = self.bytes.get_mut(offset..offset + data.len()) {
            dst.copy_from_slice(data);
        }
    }

    /// Raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    const fn word_base(address: u32) -> usize {
        (address & !(WORD_BYTES - 1)) as usize
    }
}

impl BusPort for Sram {
    /// Completes a read or strobed write.
    ///
    /// Requests without `valid` are returned untouched. Requests outside the SRAM are returned
    /// with `ready` low.
    fn transfer(&mut self, request: MemoryRequest) -> MemoryRequest {
        let mut response = request;
        if !request.valid {
            return response;
        }

        let base = Self::word_base(request.address);
        let Some(word) = self.bytes.get_mut(base..base + WORD_BYTES as usize) else {
            warn!(
                address = format_args!("{:#010x}", request.address),
                size = self.bytes.len(),
                "SRAM access out of range"
            );
            response.ready = false;
            return response;
        };

        if request.is_write() {
            let data = request.write_data.to_le_bytes();
            for (lane, byte) in word.iter_mut().enumerate() {
                if request.write_strobe & (1 << lane) != 0 {
                    *byte = data[lane];
                }
            }
            response.read_data = 0;
        } else {
            response.read_data = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        }

        response.ready = true;
        response
    }
}
