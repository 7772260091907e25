//! Simulation-level tests.

/// Firmware and configuration loading.
pub mod loader;
