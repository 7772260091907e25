//! Error message tests.

use housekeeping_core::common::{ArbitrationError, ConfigError, SimError};

#[test]
fn config_error_messages() {
    assert_eq!(
        ConfigError::WeightCountMismatch {
            requesters: 3,
            weights: 2
        }
        .to_string(),
        "number of weights (2) must match number of requesters (3)"
    );
    assert_eq!(
        ConfigError::NonPositiveWeight { id: 1, weight: 0 }.to_string(),
        "requester 1 has weight 0; all weights must be positive integers"
    );
    assert_eq!(
        ConfigError::NoRequesters.to_string(),
        "at least one requester is required"
    );
}

#[test]
fn protocol_violation_message_names_the_scan() {
    let err = ArbitrationError::ProtocolViolation {
        current_index: 2,
        attempts: 6,
    };
    let msg = err.to_string();
    assert!(msg.starts_with("protocol violation"));
    assert!(msg.contains("6 scan steps"));
}

#[test]
fn sim_error_wraps_config_error_transparently() {
    let err: SimError = ConfigError::ZeroTotalWords.into();
    assert!(matches!(err, SimError::Config(ConfigError::ZeroTotalWords)));
    assert_eq!(err.to_string(), "boot image must contain at least one word");
}

#[test]
fn sim_error_wraps_arbitration_error() {
    let err: SimError = ArbitrationError::PendingWidthMismatch {
        expected: 2,
        actual: 3,
    }
    .into();
    assert_eq!(
        err.to_string(),
        "pending set has 3 lines but the arbiter has 2 requesters"
    );
}
