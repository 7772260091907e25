//! # Unit Components
//!
//! This module mirrors the library layout and holds the tests for each component.

/// Tests for identifiers, memory requests and error messages.
pub mod common;

/// Tests for configuration defaults, JSON parsing and validation.
pub mod config;



/// End-to-end simulator and loader tests.
pub mod sim;
