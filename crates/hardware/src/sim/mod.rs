//! Simulation driver and firmware loading.
//!
//! Provides the supervisor that clocks the fabric tick by tick and the utilities for
//! loading firmware images from disk.

/// Firmware image loading.
pub mod loader;

/// Tick-driven supervisor.
pub mod simulator;

pub use simulator::{BootOutcome, BootWrite, Simulator};
