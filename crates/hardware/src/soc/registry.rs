//! Requester registry.
//!
//! Static table of the bus requesters and their arbitration weights. The table is validated
//! once when it is built and never changes afterwards, so the arbiter can rely on every
//! weight being positive and on the requester count being fixed.

use crate::common::error::ConfigError;
use crate::common::id::RequesterId;

/// One bus requester and its arbitration weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requester {
    id: RequesterId,
    weight: u32,
}

impl Requester {
    /// Identifier of this requester.
    pub const fn id(&self) -> RequesterId {
        self.id
    }

    /// Consecutive grants this requester may receive before the pointer rotates.
    pub const fn weight(&self) -> u32 {
        self.weight
    }
}

/// Validated, immutable list of requesters indexed `0..N`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequesterRegistry {
    requesters: Vec<Requester>,
}

impl RequesterRegistry {
    /// Builds a registry of `num_requesters` requesters with the given weights.
    ///
    /// # Arguments
    ///
    /// * `num_requesters` - Configured requester count.
    /// * `weights` - Weight of each requester, in id order.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::WeightCountMismatch`] if `weights.len() != num_requesters`.
    /// * [`ConfigError::NoRequesters`] if `num_requesters` is zero.
    /// * [`ConfigError::NonPositiveWeight`] for the first zero weight.
    pub fn new(num_requesters: usize, weights: &[u32]) -> Result<Self, ConfigError> {
        if weights.len() != num_requesters {
            return Err(ConfigError::WeightCountMismatch {
                requesters: num_requesters,
                weights: weights.len(),
            });
        }
        if num_requesters == 0 {
            return Err(ConfigError::NoRequesters);
        }
        if let Some(id) = weights.iter().position(|&w| w == 0) {
            return Err(ConfigError::NonPositiveWeight {
                id,
                weight: weights[id],
            });
        }

        let requesters = weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| Requester {
                id: RequesterId(i),
                weight,
            })
            .collect();
        Ok(Self { requesters })
    }

    /// Builds a registry where every requester has weight 1 (plain round robin).
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoRequesters`] if `num_requesters` is zero.
    pub fn uniform(num_requesters: usize) -> Result<Self, ConfigError> {
        Self::new(num_requesters, &vec![1; num_requesters])
    }

    /// Number of registered requesters.
    pub fn len(&self) -> usize {
        self.requesters.len()
    }

    /// Always `false`: construction rejects empty registries.
    pub fn is_empty(&self) -> bool {
        self.requesters.is_empty()
    }

    /// Looks up a requester by id.
    pub fn get(&self, id: RequesterId) -> Option<&Requester> {
        self.requesters.get(id.index())
    }

    /// Returns `true` if `id` names a registered requester.
    pub fn contains(&self, id: RequesterId) -> bool {
        id.index() < self.requesters.len()
    }

    /// Weight of the requester at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn weight(&self, index: usize) -> u32 {
        self.requesters[index].weight
    }

    /// All weights in id order.
    pub fn weights(&self) -> Vec<u32> {
        self.requesters.iter().map(Requester::weight).collect()
    }

    /// Largest configured weight.
    pub fn max_weight(&self) -> u32 {
        self.requesters.iter().map(Requester::weight).max().unwrap_or(0)
    }

    /// Sum of all weights; the length of one full rotation when everyone is pending.
    pub fn total_weight(&self) -> u64 {
        self.requesters.iter().map(|r| u64::from(r.weight)).sum()
    }

    /// Iterates requesters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Requester> {
        self.requesters.iter()
    }
}
