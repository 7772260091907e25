//! Little-endian word assembler.

use crate::common::constants::WORD_BYTES;

/// Partially assembled word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordBuffer {
    /// Bytes accumulated so far, in `0..4`.
    pub bytes_seen: u8,
    /// Bytes accumulated so far; byte `i` sits in bits `8*i..8*i+8`.
    pub accumulator: u32,
}

/// Packs a byte stream into 32-bit words, least-significant byte first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordAssembler {
    buffer: WordBuffer,
}

impl WordAssembler {
    /// Creates an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the next byte of the stream.
    ///
    /// # Returns
    ///
    /// The assembled word on every fourth byte, `None` otherwise. The buffer is empty again
    /// after a word is returned.
    pub fn push_byte(&mut self, byte: u8) -> Option<u32> {
        let shift = u32::from(self.buffer.bytes_seen) * 8;
        self.buffer.accumulator |= u32::from(byte) << shift;
        self.buffer.bytes_seen += 1;

        if u32::from(self.buffer.bytes_seen) == WORD_BYTES {
            let word = self.buffer.accumulator;
            self.buffer = WordBuffer::default();
            Some(word)
        } else {
            None
        }
    }

    /// Discards any partially assembled word.
    pub fn reset(&mut self) {
        self.buffer = WordBuffer::default();
    }

    /// Number of bytes buffered toward the next word.
    pub fn bytes_seen(&self) -> u8 {
        self.buffer.bytes_seen
    }

    /// Snapshot of the buffer.
    pub fn buffer(&self) -> WordBuffer {
        self.buffer
    }
}
