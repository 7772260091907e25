//! Tests for common types.


/// Error display messages.
pub mod error;
