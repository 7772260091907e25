//! Configuration, arbitration and simulation errors.
//!
//! This module defines the error taxonomy of the fabric model. It provides:
//! 1. **Configuration Errors:** Raised once, at construction, and never retried.
//! 2. **Arbitration Errors:** Caller bugs and invariant violations detected while arbitrating.
//! 3. **Simulation Errors:** The union of the above plus firmware loading failures.
//!
//! A boot that stalls on an incomplete firmware stream is not an error; it is observed
//! through `boot_done` staying low.

use thiserror::Error;

/// Invalid requester, arbiter or boot configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The registry was configured with zero requesters.
    #[error("at least one requester is required")]
    NoRequesters,

    /// The weight list length differs from the requester count.
    #[error("number of weights ({weights}) must match number of requesters ({requesters})")]
    WeightCountMismatch {
        /// Configured requester count.
        requesters: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// A requester was given a weight that is not strictly positive.
    #[error("requester {id} has weight {weight}; all weights must be positive integers")]
    NonPositiveWeight {
        /// Index of the offending requester.
        id: usize,
        /// The rejected weight.
        weight: u32,
    },

    /// The boot image was configured with no words.
    #[error("boot image must contain at least one word")]
    ZeroTotalWords,

    /// The boot image has more words than the 32-bit bus can address.
    #[error("boot image of {total_words} words exceeds the {max_words}-word address space")]
    ImageTooLarge {
        /// Configured boot image length in words.
        total_words: u32,
        /// Largest supported length.
        max_words: u32,
    },

    /// The boot sequencer was attached to a requester slot that does not exist.
    #[error("boot requester {requester} is out of range (registry has {count} requesters)")]
    BootRequesterOutOfRange {
        /// Requested slot.
        requester: usize,
        /// Number of registered requesters.
        count: usize,
    },

    /// Shared memory cannot hold the whole boot image.
    #[error("memory of {size_bytes} bytes cannot hold {total_words} boot words")]
    MemoryTooSmall {
        /// Configured memory size in bytes.
        size_bytes: usize,
        /// Configured boot image length in words.
        total_words: u32,
    },

    /// Shared memory is larger than the 32-bit bus can address.
    #[error("memory of {size_bytes} bytes exceeds the 32-bit bus address space")]
    MemoryTooLarge {
        /// Configured memory size in bytes.
        size_bytes: usize,
    },
}

/// Failure of a single arbitration round.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArbitrationError {
    /// The pending bitmap does not have one line per requester.
    #[error("pending set has {actual} lines but the arbiter has {expected} requesters")]
    PendingWidthMismatch {
        /// Registered requester count.
        expected: usize,
        /// Width of the supplied bitmap.
        actual: usize,
    },

    /// The bounded scan ended without a grant although a request was pending.
    #[error(
        "protocol violation: no grant after {attempts} scan steps with requests pending (current index {current_index})"
    )]
    ProtocolViolation {
        /// Round-robin pointer when the scan gave up.
        current_index: usize,
        /// Scan steps taken.
        attempts: usize,
    },
}

/// Error surfaced by the simulator and the firmware loader.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Arbitration failed.
    #[error(transparent)]
    Arbitration(#[from] ArbitrationError),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Firmware image or configuration file could not be read.
    #[error("could not read '{path}': {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
