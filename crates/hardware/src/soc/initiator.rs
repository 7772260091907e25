//! Bus initiators other than the boot sequencer.
//!
//! An initiator models a compute core or a debug/DMA agent sharing the bus with the boot
//! sequencer. It queues read and write transactions, raises its request line while the queue
//! is non-empty, and completes one transaction per granted tick.

use std::collections::VecDeque;

use crate::common::constants::FULL_WORD_STROBE;
use crate::common::data::MemoryRequest;
use crate::common::id::RequesterId;

/// A bus master with a queue of outstanding transactions.
#[derive(Clone, Debug)]
pub struct Initiator {
    id: RequesterId,
    queue: VecDeque<MemoryRequest>,
    completed: Vec<MemoryRequest>,
}

impl Initiator {
    /// Creates an idle initiator occupying requester slot `id`.
    pub fn new(id: RequesterId) -> Self {
        Self {
            id,
            queue: VecDeque::new(),
            completed: Vec::new(),
        }
    }

    /// Requester slot of this initiator.
    pub fn id(&self) -> RequesterId {
        self.id
    }

    /// Queues a read of the word at `address`.
    pub fn read(&mut self, address: u32) {
        self.queue.push_back(MemoryRequest::read(address));
    }

    /// Queues a write of `data` to `address` on the lanes in `strobe`.
    pub fn write(&mut self, address: u32, data: u32, strobe: u8) {
        self.queue.push_back(MemoryRequest::write(address, data, strobe));
    }

    /// Queues a full-word write.
    pub fn write_word(&mut self, address: u32, data: u32) {
        self.write(address, data, FULL_WORD_STROBE);
    }

    /// Queues an arbitrary transaction.
    pub fn submit(&mut self, request: MemoryRequest) {
        self.queue.push_back(request);
    }

    /// Request line: high while a transaction is outstanding.
    pub fn is_requesting(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Removes the transaction at the head of the queue for delivery on a granted tick.
    pub fn take_request(&mut self) -> Option<MemoryRequest> {
        self.queue.pop_front()
    }

    /// Records the completed form of a delivered transaction.
    pub fn complete(&mut self, response: MemoryRequest) {
        self.completed.push(response);
    }

    /// Transactions still waiting for a grant.
    pub fn outstanding(&self) -> usize {
        self.queue.len()
    }

    /// Completed transactions, oldest first.
    pub fn completed(&self) -> &[MemoryRequest] {
        &self.completed
    }

    /// Drops every queued transaction.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
