//! Weighted round-robin bus arbiter.
//!
//! This module implements the credit-based arbiter that shares the bus among the
//! registered requesters. It provides:
//! 1. **Pending Bitmap:** `PendingRequests`, one line per requester, built fresh each round.
//! 2. **Credit Accounting:** The requester under the pointer keeps winning until its
//!    weight-derived credits run out, then the pointer rotates.
//! 3. **Bounded Scan:** The search for a pending requester is capped at `N * max(weight)`
//!    steps; running out of steps with requests pending is a protocol violation.
//!
//! Over a rotation in which every requester stays pending, requester `i` receives exactly
//! `weights[i]` grants.

use tracing::{error, trace};

use crate::common::error::{ArbitrationError, ConfigError};
use crate::common::id::RequesterId;
use crate::soc::registry::RequesterRegistry;

/// Request lines sampled for one arbitration round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingRequests {
    lines: Vec<bool>,
}

impl PendingRequests {
    /// Creates a bitmap of `width` lines, all idle.
    pub fn new(width: usize) -> Self {
        Self {
            lines: vec![false; width],
        }
    }

    /// Creates a bitmap of `width` lines with the given requesters pending.
    ///
    /// # Panics
    ///
    /// Panics if any id is `>= width`.
    pub fn with_pending(width: usize, ids: &[RequesterId]) -> Self {
        let mut pending = Self::new(width);
        for &id in ids {
            pending.set(id, true);
        }
        pending
    }

    /// Drives the request line of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the bitmap.
    pub fn set(&mut self, id: RequesterId, pending: bool) {
        self.lines[id.index()] = pending;
    }

    /// Returns `true` if `id` is requesting; ids outside the bitmap are never pending.
    pub fn is_pending(&self, id: RequesterId) -> bool {
        self.lines.get(id.index()).copied().unwrap_or(false)
    }

    /// Number of lines (one per requester).
    pub fn width(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no requester is pending.
    pub fn is_empty(&self) -> bool {
        !self.lines.iter().any(|&line| line)
    }

    /// Number of pending requesters.
    pub fn count(&self) -> usize {
        self.lines.iter().filter(|&&line| line).count()
    }

    /// Iterates the pending requester ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RequesterId> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|&(_, &line)| line)
            .map(|(i, _)| RequesterId(i))
    }
}

impl FromIterator<bool> for PendingRequests {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

/// Round-robin pointer and the credits left for the requester under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArbiterState {
    /// Requester the scan starts from, in `0..N`.
    pub current_index: usize,
    /// Grants left for `current_index` before the pointer rotates.
    pub remaining_credits: u32,
}

/// Weighted round-robin arbiter over a fixed requester registry.
#[derive(Clone, Debug)]
pub struct WeightedRoundRobinArbiter {
    registry: RequesterRegistry,
    state: ArbiterState,
}

impl WeightedRoundRobinArbiter {
    /// Creates an arbiter over a validated registry, pointing at requester 0 with full credits.
    pub fn new(registry: RequesterRegistry) -> Self {
        let state = ArbiterState {
            current_index: 0,
            remaining_credits: registry.weight(0),
        };
        Self { registry, state }
    }

    /// Creates an arbiter for `num_requesters` requesters with the given weights.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`RequesterRegistry::new`]; the arbiter is never built from an
    /// invalid configuration.
    pub fn with_weights(num_requesters: usize, weights: &[u32]) -> Result<Self, ConfigError> {
        Ok(Self::new(RequesterRegistry::new(num_requesters, weights)?))
    }

    /// Runs one arbitration round.
    ///
    /// Starting at the pointer, grants the first pending requester. A grant consumes one
    /// credit; when the credits of the granted requester run out, the pointer moves to the next
    /// requester and reloads from its weight before returning. A requester that is not pending
    /// when the scan reaches it loses the rest of its credits.
    ///
    /// An empty pending set returns `Ok(None)` and leaves the state untouched.
    ///
    /// # Errors
    ///
    /// * [`ArbitrationError::PendingWidthMismatch`] if `pending` is not one line per requester;
    ///   the state is not modified.
    /// * [`ArbitrationError::ProtocolViolation`] if the bounded scan ends without a grant.
    pub fn arbitrate(
        &mut self,
        pending: &PendingRequests,
    ) -> Result<Option<RequesterId>, ArbitrationError> {
        let num_requesters = self.registry.len();
        if pending.width() != num_requesters {
            return Err(ArbitrationError::PendingWidthMismatch {
                expected: num_requesters,
                actual: pending.width(),
            });
        }

        if pending.is_empty() {
            return Ok(None);
        }

        let max_attempts = num_requesters * self.registry.max_weight() as usize;
        let mut attempts = 0;

        while attempts < max_attempts {
            let current = RequesterId(self.state.current_index);
            if pending.is_pending(current) {
                self.state.remaining_credits = self.state.remaining_credits.saturating_sub(1);
                if self.state.remaining_credits == 0 {
                    self.advance();
                }
                trace!(
                    granted = %current,
                    next = self.state.current_index,
                    credits = self.state.remaining_credits,
                    "arbiter grant"
                );
                return Ok(Some(current));
            }

            self.advance();
            attempts += 1;
        }

        error!(
            current_index = self.state.current_index,
            attempts,
            pending = pending.count(),
            "arbiter scan exhausted with requests pending"
        );
        Err(ArbitrationError::ProtocolViolation {
            current_index: self.state.current_index,
            attempts,
        })
    }

    /// Snapshot of the pointer and credits.
    pub fn state(&self) -> ArbiterState {
        self.state
    }

    /// The registry this arbiter schedules.
    pub fn registry(&self) -> &RequesterRegistry {
        &self.registry
    }

    /// Number of requesters.
    pub fn num_requesters(&self) -> usize {
        self.registry.len()
    }

    /// Restores the power-up state: pointer at requester 0 with full credits.
    pub fn reset(&mut self) {
        self.state = ArbiterState {
            current_index: 0,
            remaining_credits: self.registry.weight(0),
        };
    }

    fn advance(&mut self) {
        let next = (self.state.current_index + 1) % self.registry.len();
        self.state = ArbiterState {
            current_index: next,
            remaining_credits: self.registry.weight(next),
        };
    }
}
