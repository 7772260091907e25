//! Configuration Unit Tests.
//!
//! Verifies the defaults, JSON deserialization with partial documents, and the
//! cross-field checks performed by `Config::validate`.

use housekeeping_core::common::{ConfigError, MAX_BOOT_WORDS};
use housekeeping_core::config::Config;
use rstest::rstest;

use crate::common::harness::config;

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert_eq!(config.arbiter.weights, vec![1]);
    assert_eq!(config.boot.total_words, 8);
    assert_eq!(config.boot.boot_requester, 0);
    assert_eq!(config.memory.size_bytes, 4096);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn empty_document_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.arbiter.weights, vec![1]);
    assert_eq!(config.boot.total_words, 8);
    assert_eq!(config.memory.size_bytes, 4096);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "boot": { "total_words": 3 } }"#).unwrap();
    assert_eq!(config.boot.total_words, 3);
    assert_eq!(config.boot.boot_requester, 0);
    assert_eq!(config.arbiter.weights, vec![1]);
}

#[test]
fn malformed_document_is_rejected() {
    assert!(Config::from_json(r#"{ "arbiter": { "weights": "heavy" } }"#).is_err());
    // Weights are unsigned; negative values fail at parse time.
    assert!(Config::from_json(r#"{ "arbiter": { "weights": [1, -2] } }"#).is_err());
}

#[test]
fn image_bytes_is_four_per_word() {
    assert_eq!(config(&[1], 5).boot.image_bytes(), 20);
}

#[test]
fn num_requesters_follows_weights() {
    assert_eq!(config(&[2, 1, 1], 1).arbiter.num_requesters(), 3);
}

#[rstest]
#[case::no_requesters(&[], 4, ConfigError::NoRequesters)]
#[case::zero_weight(&[1, 0, 2], 4, ConfigError::NonPositiveWeight { id: 1, weight: 0 })]
#[case::zero_words(&[1, 1], 0, ConfigError::ZeroTotalWords)]
#[case::unaddressable_image(
    &[1],
    MAX_BOOT_WORDS + 1,
    ConfigError::ImageTooLarge { total_words: MAX_BOOT_WORDS + 1, max_words: MAX_BOOT_WORDS }
)]
fn invalid_configs_are_rejected(
    #[case] weights: &[u32],
    #[case] total_words: u32,
    #[case] expected: ConfigError,
) {
    let config = config(weights, total_words);
    assert_eq!(config.validate(), Err(expected));
}

#[test]
fn boot_requester_must_exist() {
    let mut config = config(&[1, 1], 4);
    config.boot.boot_requester = 2;
    assert_eq!(
        config.validate(),
        Err(ConfigError::BootRequesterOutOfRange {
            requester: 2,
            count: 2
        })
    );
}

#[test]
fn memory_must_hold_the_image() {
    let mut config = config(&[1], 4);
    config.memory.size_bytes = 15;
    assert_eq!(
        config.validate(),
        Err(ConfigError::MemoryTooSmall {
            size_bytes: 15,
            total_words: 4
        })
    );

    config.memory.size_bytes = 16;
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn registry_is_checked_before_boot_section() {
    let config = config(&[0], 0);
    assert_eq!(
        config.validate(),
        Err(ConfigError::NonPositiveWeight { id: 0, weight: 0 })
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn memory_beyond_bus_address_space_is_rejected() {
    let mut config = config(&[1], 4);
    config.memory.size_bytes = (1usize << 32) + 4;
    assert_eq!(
        config.validate(),
        Err(ConfigError::MemoryTooLarge {
            size_bytes: (1usize << 32) + 4
        })
    );
}
