//! Boot sequencer state machine.
//!
//! The sequencer copies `total_words` firmware words from flash into shared memory, one bus
//! transaction per word. For each word it:
//! 1. **Assembles** four flash bytes (one byte per tick) while `Idle`.
//! 2. **Requests** the bus and holds the word until the grant arrives.
//! 3. **Writes** the word at `words_written * 4` with a single `write_enable` pulse.
//! 4. **Releases** the bus and counts the word.
//!
//! After the last word it parks in `Done` with `boot_done` and `cores_enabled` high. Reset
//! is level-sensitive and overrides everything: while it is asserted the sequencer is held
//! in `Idle` with all progress cleared, and any partial word is lost.
//!
//! A flash stream that ends early leaves the sequencer parked in `Idle` forever. There is no
//! timeout here; the cores simply never get enabled.

use tracing::{debug, info, trace, warn};

use super::assembler::WordAssembler;
use crate::common::constants::{BOOT_BASE_ADDR, MAX_BOOT_WORDS, WORD_BYTES};
use crate::common::data::MemoryRequest;
use crate::common::error::ConfigError;
use crate::config::BootConfig;
use crate::soc::traits::{BusPort, ByteSource};

/// Sequencer state; each variant carries only the data valid in that state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BootState {
    /// Collecting flash bytes toward the next word.
    #[default]
    Idle,
    /// A word is ready; the bus request has just been raised.
    Request {
        /// Word to be written.
        word: u32,
    },
    /// Waiting for the bus grant with the word held.
    WaitGrant {
        /// Word to be written.
        word: u32,
    },
    /// The write was issued this tick; `write_enable` pulses.
    Write {
        /// Word that was written.
        word: u32,
    },
    /// Bus request dropped; the word has been counted.
    Release,
    /// Every word written; cores enabled until reset.
    Done,
}

impl BootState {
    /// Short upper-case state name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Request { .. } => "REQUEST",
            Self::WaitGrant { .. } => "WAIT_GRANT",
            Self::Write { .. } => "WRITE",
            Self::Release => "RELEASE",
            Self::Done => "DONE",
        }
    }

    /// Word held by the state, if any.
    pub const fn held_word(&self) -> Option<u32> {
        match self {
            Self::Request { word } | Self::WaitGrant { word } | Self::Write { word } => Some(*word),
            Self::Idle | Self::Release | Self::Done => None,
        }
    }
}

/// Inputs sampled by the sequencer on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BootInputs {
    /// Level-sensitive reset.
    pub reset: bool,
    /// Bus grant from the supervisor running the arbiter.
    pub grant: bool,
}

impl BootInputs {
    /// Reset low, no grant.
    pub const IDLE: Self = Self {
        reset: false,
        grant: false,
    };

    /// Reset low, grant high.
    pub const GRANTED: Self = Self {
        reset: false,
        grant: true,
    };

    /// Reset high.
    pub const RESET: Self = Self {
        reset: true,
        grant: false,
    };

    /// Reset low with the given grant level.
    pub const fn with_grant(grant: bool) -> Self {
        Self {
            reset: false,
            grant,
        }
    }
}

/// Output signals of the sequencer, derived from its state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BootSignals {
    /// Requesting (or holding) the bus.
    pub bus_request: bool,
    /// One-tick pulse on the tick a word is written.
    pub write_enable: bool,
    /// Every word has been written.
    pub boot_done: bool,
    /// Compute cores may leave reset; follows `boot_done`.
    pub cores_enabled: bool,
}

/// Words written so far out of the image length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootProgress {
    /// Words written and released.
    pub words_written: u32,
    /// Image length in words.
    pub total_words: u32,
}

impl BootProgress {
    /// Memory address of the next word to write.
    ///
    /// `words_written` never exceeds [`MAX_BOOT_WORDS`], so the product fits in `u32`.
    pub const fn address(&self) -> u32 {
        BOOT_BASE_ADDR + self.words_written * WORD_BYTES
    }

    /// Returns `true` once every word has been written.
    pub const fn is_complete(&self) -> bool {
        self.words_written == self.total_words
    }
}

/// Flash-to-memory boot state machine.
#[derive(Clone, Debug)]
pub struct BootSequencer {
    state: BootState,
    assembler: WordAssembler,
    progress: BootProgress,
}

impl BootSequencer {
    /// Creates a sequencer in `Idle` that will copy `total_words` words.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroTotalWords`] if `total_words` is zero.
    /// * [`ConfigError::ImageTooLarge`] if the last word would lie beyond the 32-bit
    ///   address space (more than [`MAX_BOOT_WORDS`] words).
    pub fn new(total_words: u32) -> Result<Self, ConfigError> {
        if total_words == 0 {
            return Err(ConfigError::ZeroTotalWords);
        }
        if total_words > MAX_BOOT_WORDS {
            return Err(ConfigError::ImageTooLarge {
                total_words,
                max_words: MAX_BOOT_WORDS,
            });
        }
        Ok(Self {
            state: BootState::Idle,
            assembler: WordAssembler::new(),
            progress: BootProgress {
                words_written: 0,
                total_words,
            },
        })
    }

    /// Creates a sequencer from the boot section of the configuration.
    ///
    /// # Errors
    ///
    /// See [`BootSequencer::new`].
    pub fn from_config(config: &BootConfig) -> Result<Self, ConfigError> {
        Self::new(config.total_words)
    }

    /// Advances the state machine by one tick.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Reset and grant levels for this tick.
    /// * `flash` - Firmware stream; at most one byte is read per tick, and only in `Idle`.
    /// * `bus` - Memory sink; exactly one write is issued per word, on the granted tick.
    ///
    /// # Returns
    ///
    /// The state after the tick.
    pub fn tick<S, P>(&mut self, inputs: BootInputs, flash: &mut S, bus: &mut P) -> BootState
    where
        S: ByteSource + ?Sized,
        P: BusPort + ?Sized,
    {
        if inputs.reset {
            self.reset();
            return self.state;
        }

        let next = match self.state {
            BootState::Idle => match flash.next_byte() {
                Some(byte) => {
                    trace!(
                        byte = format_args!("{byte:#04x}"),
                        buffered = self.assembler.bytes_seen(),
                        "flash byte"
                    );
                    self.assembler
                        .push_byte(byte)
                        .map_or(BootState::Idle, |word| BootState::Request { word })
                }
                None => BootState::Idle,
            },
            BootState::Request { word } | BootState::WaitGrant { word } => {
                if inputs.grant {
                    self.issue_write(word, bus);
                    BootState::Write { word }
                } else {
                    BootState::WaitGrant { word }
                }
            }
            BootState::Write { .. } => {
                self.progress.words_written += 1;
                BootState::Release
            }
            BootState::Release => {
                if self.progress.is_complete() {
                    info!(words = self.progress.words_written, "boot complete, enabling cores");
                    BootState::Done
                } else {
                    BootState::Idle
                }
            }
            BootState::Done => BootState::Done,
        };

        if next.name() != self.state.name() {
            debug!(
                from = self.state.name(),
                to = next.name(),
                words_written = self.progress.words_written,
                "boot state"
            );
        }
        self.state = next;
        next
    }

    /// Clears all progress and returns to `Idle`; a partially assembled word is lost.
    pub fn reset(&mut self) {
        if self.state != BootState::Idle
            || self.progress.words_written != 0
            || self.assembler.bytes_seen() != 0
        {
            info!(
                from = self.state.name(),
                words_written = self.progress.words_written,
                "boot sequencer reset"
            );
        }
        self.state = BootState::Idle;
        self.assembler.reset();
        self.progress.words_written = 0;
    }

    fn issue_write<P: BusPort + ?Sized>(&self, word: u32, bus: &mut P) {
        let request = MemoryRequest::write_word(self.progress.address(), word);
        let response = bus.transfer(request);
        debug!(
            address = format_args!("{:#010x}", request.address),
            data = format_args!("{word:#010x}"),
            "boot word written"
        );
        if !response.ready {
            warn!(
                address = format_args!("{:#010x}", request.address),
                "memory did not accept boot write"
            );
        }
    }

    /// Current state.
    pub fn state(&self) -> BootState {
        self.state
    }

    /// Output signals for the current state.
    pub fn signals(&self) -> BootSignals {
        let done = self.state == BootState::Done;
        BootSignals {
            bus_request: matches!(
                self.state,
                BootState::Request { .. } | BootState::WaitGrant { .. } | BootState::Write { .. }
            ),
            write_enable: matches!(self.state, BootState::Write { .. }),
            boot_done: done,
            cores_enabled: done,
        }
    }

    /// Bus request line.
    pub fn bus_request(&self) -> bool {
        self.signals().bus_request
    }

    /// Write-enable pulse.
    pub fn write_enable(&self) -> bool {
        self.signals().write_enable
    }

    /// Boot completion flag.
    pub fn boot_done(&self) -> bool {
        self.signals().boot_done
    }

    /// Core activation flag.
    pub fn cores_enabled(&self) -> bool {
        self.signals().cores_enabled
    }

    /// Words written out of the image length.
    pub fn progress(&self) -> BootProgress {
        self.progress
    }

    /// Address the next word will be written to.
    pub fn address(&self) -> u32 {
        self.progress.address()
    }

    /// Bytes buffered toward the next word.
    pub fn buffered_bytes(&self) -> u8 {
        self.assembler.bytes_seen()
    }
}
