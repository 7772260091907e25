//! Boot fabric model library.
//!
//! This crate models the control logic that brings a multi-core compute fabric out of reset:
//! 1. **SoC:** Requester registry, weighted round-robin arbiter, interconnect, SRAM, initiators.
//! 2. **Boot:** Flash byte stream, little-endian word assembler, and the boot state machine.
//! 3. **Simulation:** Tick-driven supervisor, firmware loader, and statistics.
//! 4. **Configuration:** JSON-deserializable settings with validation.

/// Flash boot path (flash stream, word assembler, boot sequencer).
pub mod boot;
/// Common types and constants (identifiers, memory requests, errors).
pub mod common;
/// Model configuration (defaults, structures, validation).
pub mod config;
/// Simulation driver and firmware loading.
pub mod sim;
/// Shared bus components (registry, arbiter, interconnect, memory, initiators, traits).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Boot state machine.
pub use crate::boot::BootSequencer;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Weighted round-robin arbiter.
pub use crate::soc::WeightedRoundRobinArbiter;
