//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components of the shared bus: the requester registry, the
//! weighted round-robin arbiter, the interconnect that enforces bus ownership, the SRAM
//! sink, and the additional initiators contending for the bus.

/// Weighted round-robin arbiter and pending-request bitmap.
pub mod arbiter;

/// Bus initiators (compute cores, debug/DMA agents).
pub mod initiator;

/// Shared-bus interconnect with ownership locking.
pub mod interconnect;

/// Shared SRAM model.
pub mod memory;

/// Requester registry and weight validation.
pub mod registry;

/// Bus port and byte source traits.
pub mod traits;

pub use arbiter::{ArbiterState, PendingRequests, WeightedRoundRobinArbiter};
pub use initiator::Initiator;
pub use interconnect::{Grant, Interconnect};
pub use memory::Sram;
pub use registry::{Requester, RequesterRegistry};
pub use traits::{BusPort, ByteSource};
