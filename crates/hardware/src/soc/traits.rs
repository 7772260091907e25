//! Port traits connecting the fabric core to its collaborators.
//!
//! This module defines the two seams of the model. It provides:
//! 1. **`BusPort`:** The memory sink a requester drives transactions into once granted.
//! 2. **`ByteSource`:** The ordered firmware byte stream read from serial flash.
//!
//! Both are passed into the boot sequencer by `&mut` on every tick instead of being
//! captured, so the caller keeps ownership of memory and flash between ticks.

use crate::common::data::MemoryRequest;

/// Memory sink attached to the shared bus.
///
/// The sink completes a transaction in the call that delivers it; the returned request
/// carries `ready` and, for reads, `read_data`.
pub trait BusPort {
    /// Delivers one transaction to the sink and returns its completed form.
    fn transfer(&mut self, request: MemoryRequest) -> MemoryRequest;

    /// Writes the lanes of `data` selected by `strobe` to the word at `address`.
    fn write(&mut self, address: u32, data: u32, strobe: u8) -> MemoryRequest {
        self.transfer(MemoryRequest::write(address, data, strobe))
    }

    /// Reads the word at `address`.
    fn read(&mut self, address: u32) -> MemoryRequest {
        self.transfer(MemoryRequest::read(address))
    }
}

/// Ordered stream of firmware bytes.
///
/// End of stream is reported by `None` and is not an error; a source that returned `None`
/// may keep returning `None` forever.
pub trait ByteSource {
    /// Returns the next byte, or `None` once the stream is exhausted.
    fn next_byte(&mut self) -> Option<u8>;

    /// Restarts the read at the first byte of the image, as the flash controller does when
    /// it comes out of reset.
    fn restart(&mut self);
}

impl<P: BusPort + ?Sized> BusPort for &mut P {
    fn transfer(&mut self, request: MemoryRequest) -> MemoryRequest {
        (**self).transfer(request)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }

    fn restart(&mut self) {
        (**self).restart();
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }

    fn restart(&mut self) {
        (**self).restart();
    }
}
