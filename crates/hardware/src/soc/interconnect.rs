//! Shared-bus interconnect: arbitration plus bus ownership.
//!
//! This module wraps the weighted round-robin arbiter with the ownership rule of the shared
//! bus. It provides:
//! 1. **Arbitration rounds:** When the bus is free, one round of the arbiter picks the grantee.
//! 2. **Bus locking:** A requester that must keep the bus across several ticks (the boot
//!    sequencer during a word write) locks it; the grant is held, and no round is run, until
//!    that requester drops its request line.
//! 3. **Forwarding:** A granted single-tick request is delivered to the memory port.

use tracing::debug;

use super::arbiter::{ArbiterState, PendingRequests, WeightedRoundRobinArbiter};
use super::traits::BusPort;
use crate::common::data::MemoryRequest;
use crate::common::error::ArbitrationError;
use crate::common::id::RequesterId;

/// Bus grant decided for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grant {
    /// No requester holds the bus this tick.
    Idle,
    /// A fresh arbitration round granted this requester.
    Arbitrated(RequesterId),
    /// The requester that locked the bus keeps it; no round was run.
    Held(RequesterId),
}

impl Grant {
    /// Requester holding the bus this tick, if any.
    pub const fn holder(self) -> Option<RequesterId> {
        match self {
            Self::Idle => None,
            Self::Arbitrated(id) | Self::Held(id) => Some(id),
        }
    }

    /// Returns `true` if `id` holds the bus this tick.
    pub fn is_granted(self, id: RequesterId) -> bool {
        self.holder() == Some(id)
    }
}

/// Shared bus connecting the requesters to memory.
#[derive(Clone, Debug)]
pub struct Interconnect {
    arbiter: WeightedRoundRobinArbiter,
    locked_by: Option<RequesterId>,
    rounds: u64,
}

impl Interconnect {
    /// Creates an unlocked bus scheduled by `arbiter`.
    pub fn new(arbiter: WeightedRoundRobinArbiter) -> Self {
        Self {
            arbiter,
            locked_by: None,
            rounds: 0,
        }
    }

    /// Decides who holds the bus this tick.
    ///
    /// If the bus is locked and its owner is still requesting, the owner keeps it without an
    /// arbitration round. If the owner has dropped its request, the lock is released and a
    /// round is run among the current requesters.
    ///
    /// # Errors
    ///
    /// Propagates [`ArbitrationError`] from the arbiter.
    pub fn cycle(&mut self, pending: &PendingRequests) -> Result<Grant, ArbitrationError> {
        if let Some(owner) = self.locked_by {
            if pending.is_pending(owner) {
                return Ok(Grant::Held(owner));
            }
            debug!(owner = %owner, "bus released");
            self.locked_by = None;
        }

        self.rounds += 1;
        Ok(match self.arbiter.arbitrate(pending)? {
            Some(id) => Grant::Arbitrated(id),
            None => Grant::Idle,
        })
    }

    /// Locks the bus to `owner` until it stops requesting.
    pub fn lock(&mut self, owner: RequesterId) {
        debug!(owner = %owner, "bus locked");
        self.locked_by = Some(owner);
    }

    /// Current lock owner.
    pub fn locked_by(&self) -> Option<RequesterId> {
        self.locked_by
    }

    /// Delivers a granted requester's transaction to memory.
    ///
    /// # Arguments
    ///
    /// * `grantee` - Requester that won this tick.
    /// * `request` - Its transaction.
    /// * `port` - Memory sink.
    ///
    /// # Returns
    ///
    /// The completed transaction as returned by the sink.
    pub fn forward<P: BusPort + ?Sized>(
        &self,
        grantee: RequesterId,
        request: MemoryRequest,
        port: &mut P,
    ) -> MemoryRequest {
        let response = port.transfer(request);
        debug!(
            grantee = %grantee,
            address = format_args!("{:#010x}", request.address),
            ready = response.ready,
            "bus transfer"
        );
        response
    }

    /// Number of arbitration rounds run so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Snapshot of the arbiter's pointer and credits.
    pub fn arbiter_state(&self) -> ArbiterState {
        self.arbiter.state()
    }

    /// The arbiter scheduling this bus.
    pub fn arbiter(&self) -> &WeightedRoundRobinArbiter {
        &self.arbiter
    }

    /// Clears the lock and returns the arbiter to its power-up state.
    pub fn reset(&mut self) {
        self.locked_by = None;
        self.arbiter.reset();
    }
}
