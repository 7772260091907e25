//! Firmware byte streams.
//!
//! `FlashImage` replays a firmware image byte by byte in flash order. The SPI command and
//! address phase of a real flash read are not modelled; the stream starts at the first
//! image byte.

use crate::common::constants::WORD_BYTES;
use crate::soc::traits::ByteSource;

/// In-memory firmware image read sequentially.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashImage {
    data: Vec<u8>,
    cursor: usize,
}

impl FlashImage {
    /// Wraps `data` as a flash image positioned at its first byte.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }

    /// Image of `total_words` words whose bytes count up from zero (wrapping at 256).
    pub fn counting(total_words: u32) -> Self {
        let len = total_words as usize * WORD_BYTES as usize;
        Self::new((0..len).map(|i| i as u8).collect())
    }

    /// Builds an image from whole words, each stored least-significant byte first.
    pub fn from_words(words: &[u32]) -> Self {
        Self::new(words.iter().flat_map(|w| w.to_le_bytes()).collect())
    }

    /// Total image length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for an empty image.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes already streamed out.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Bytes left in the stream.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Restarts the stream from the first byte.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Raw image contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl ByteSource for FlashImage {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.data.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(byte)
    }

    fn restart(&mut self) {
        self.rewind();
    }
}
