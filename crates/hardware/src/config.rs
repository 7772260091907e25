//! Configuration system for the boot fabric model.
//!
//! This module defines the configuration structures used to parameterize the model.
//! It provides:
//! 1. **Defaults:** Baseline fabric constants (requester weights, boot image length, SRAM size).
//! 2. **Structures:** Hierarchical config for the arbiter, the boot sequencer and memory.
//! 3. **Validation:** `Config::validate` checks cross-field constraints before anything is built.
//!
//! Configuration is supplied as JSON (see the `hksim` CLI) or use `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{MAX_BOOT_WORDS, MAX_SRAM_BYTES, WORD_BYTES};
use crate::common::error::ConfigError;
use crate::soc::registry::RequesterRegistry;

/// Default configuration constants for the model.
mod defaults {
    /// Requester weights: the boot sequencer alone on the bus.
    pub const WEIGHTS: [u32; 1] = [1];

    /// Boot image length in words (32 bytes of flash).
    pub const TOTAL_WORDS: u32 = 8;

    /// Requester slot the boot sequencer occupies.
    pub const BOOT_REQUESTER: usize = 0;

    /// Shared SRAM size in bytes (4 KiB).
    pub const SRAM_SIZE: usize = 4096;
}

/// Root configuration structure containing all model settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use housekeeping_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.arbiter.weights, vec![1]);
/// assert_eq!(config.boot.total_words, 8);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use housekeeping_core::config::Config;
///
/// let json = r#"{
///     "arbiter": { "weights": [2, 1, 1] },
///     "boot": { "total_words": 16, "boot_requester": 0 },
///     "memory": { "size_bytes": 1024 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.arbiter.weights, vec![2, 1, 1]);
/// assert_eq!(config.boot.total_words, 16);
/// assert_eq!(config.memory.size_bytes, 1024);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Bus arbiter settings
    #[serde(default)]
    pub arbiter: ArbiterConfig,
    /// Boot sequencer settings
    #[serde(default)]
    pub boot: BootConfig,
    /// Shared memory settings
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks every cross-field constraint of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: registry errors (no requesters, non-positive
    /// weights), an empty or unaddressable boot image, a boot requester slot outside the
    /// registry, or an SRAM too small for the boot image or too large for the bus.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = self.arbiter.registry()?;
        self.boot.validate(registry.len())?;
        self.memory.validate(self.boot.total_words)
    }
}

/// Weighted round-robin arbiter configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ArbiterConfig {
    /// One weight per requester; requester `i` may take `weights[i]` consecutive grants.
    #[serde(default = "ArbiterConfig::default_weights")]
    pub weights: Vec<u32>,
}

impl ArbiterConfig {
    /// Returns the default weight vector.
    fn default_weights() -> Vec<u32> {
        defaults::WEIGHTS.to_vec()
    }

    /// Number of requesters implied by the weight vector.
    pub fn num_requesters(&self) -> usize {
        self.weights.len()
    }

    /// Builds and validates the requester registry described by this config.
    ///
    /// # Errors
    ///
    /// See [`RequesterRegistry::new`].
    pub fn registry(&self) -> Result<RequesterRegistry, ConfigError> {
        RequesterRegistry::new(self.num_requesters(), &self.weights)
    }
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            weights: Self::default_weights(),
        }
    }
}

/// Boot sequencer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BootConfig {
    /// Number of 32-bit words in the boot image
    #[serde(default = "BootConfig::default_total_words")]
    pub total_words: u32,

    /// Requester slot of the boot sequencer on the shared bus
    #[serde(default = "BootConfig::default_boot_requester")]
    pub boot_requester: usize,
}

impl BootConfig {
    /// Returns the default boot image length in words.
    fn default_total_words() -> u32 {
        defaults::TOTAL_WORDS
    }

    /// Returns the default requester slot of the boot sequencer.
    fn default_boot_requester() -> usize {
        defaults::BOOT_REQUESTER
    }

    /// Number of flash bytes the boot image spans.
    pub fn image_bytes(&self) -> usize {
        self.total_words as usize * WORD_BYTES as usize
    }

    fn validate(&self, num_requesters: usize) -> Result<(), ConfigError> {
        if self.total_words == 0 {
            return Err(ConfigError::ZeroTotalWords);
        }
        if self.total_words > MAX_BOOT_WORDS {
            return Err(ConfigError::ImageTooLarge {
                total_words: self.total_words,
                max_words: MAX_BOOT_WORDS,
            });
        }
        if self.boot_requester >= num_requesters {
            return Err(ConfigError::BootRequesterOutOfRange {
                requester: self.boot_requester,
                count: num_requesters,
            });
        }
        Ok(())
    }
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            total_words: defaults::TOTAL_WORDS,
            boot_requester: defaults::BOOT_REQUESTER,
        }
    }
}

/// Shared memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// SRAM size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size_bytes: usize,
}

impl MemoryConfig {
    /// Returns the default SRAM size in bytes.
    fn default_size() -> usize {
        defaults::SRAM_SIZE
    }

    fn validate(&self, total_words: u32) -> Result<(), ConfigError> {
        if self.size_bytes as u64 > MAX_SRAM_BYTES {
            return Err(ConfigError::MemoryTooLarge {
                size_bytes: self.size_bytes,
            });
        }
        let needed = total_words as usize * WORD_BYTES as usize;
        if self.size_bytes < needed {
            return Err(ConfigError::MemoryTooSmall {
                size_bytes: self.size_bytes,
                total_words,
            });
        }
        Ok(())
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::SRAM_SIZE,
        }
    }
}
