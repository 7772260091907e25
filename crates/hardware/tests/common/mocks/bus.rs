//! `mockall` doubles for the memory port plus a recording bus.

use housekeeping_core::common::MemoryRequest;
use housekeeping_core::soc::BusPort;
use mockall::mock;

mock! {
    pub Bus {}
    impl BusPort for Bus {
        fn transfer(&mut self, request: MemoryRequest) -> MemoryRequest;
    }
}

/// Bus port that accepts every transaction and keeps a log of them.
#[derive(Debug, Default)]
pub struct RecordingBus {
    /// Every transaction delivered, in order.
    pub requests: Vec<MemoryRequest>,
    /// When `false`, transactions are returned with `ready` low.
    pub accept: bool,
}

impl RecordingBus {
    /// Creates a bus that accepts everything.
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
            accept: true,
        }
    }

    /// `(address, data)` of every write seen, in order.
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.requests
            .iter()
            .filter(|r| r.is_write())
            .map(|r| (r.address, r.write_data))
            .collect()
    }
}

impl BusPort for RecordingBus {
    fn transfer(&mut self, request: MemoryRequest) -> MemoryRequest {
        self.requests.push(request);
        let mut response = request;
        response.ready = self.accept;
        response
    }
}
