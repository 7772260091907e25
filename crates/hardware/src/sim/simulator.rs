//! Simulator: the supervisor that clocks the fabric.
//!
//! The simulator owns the interconnect, the boot sequencer, the initiators, the flash
//! stream and the SRAM, and steps them together once per tick:
//! 1. Sample every request line as it stood at the end of the previous tick.
//! 2. Decide the bus holder (held lock or one arbitration round).
//! 3. Deliver a granted initiator's transaction, or feed the grant to the boot sequencer.
//! 4. Advance the boot sequencer.
//!
//! While reset is held the flash read is restarted at the first image byte, so the next
//! boot always copies the image from its beginning.
//!
//! It is also where timeout policy lives: `run` gives up after a tick budget and reports a
//! stalled boot instead of waiting forever.

use std::fmt;

use tracing::{info, warn};

use crate::boot::sequencer::{BootInputs, BootProgress, BootSequencer, BootSignals, BootState};
use crate::common::error::SimError;
use crate::common::id::RequesterId;
use crate::config::Config;
use crate::soc::arbiter::{PendingRequests, WeightedRoundRobinArbiter};
use crate::soc::initiator::Initiator;
use crate::soc::interconnect::{Grant, Interconnect};
use crate::soc::memory::Sram;
use crate::soc::traits::ByteSource;
use crate::stats::SimStats;

/// One boot word as it was written to memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootWrite {
    /// Memory address.
    pub address: u32,
    /// Word written.
    pub data: u32,
}

/// Result of a bounded run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootOutcome {
    /// `boot_done` rose; cores are enabled.
    Completed {
        /// Ticks simulated when boot finished.
        ticks: u64,
    },
    /// The tick budget ran out first; cores stay disabled.
    Stalled {
        /// Ticks simulated.
        ticks: u64,
        /// Words written before the stall.
        words_written: u32,
        /// Sequencer state at the stall.
        state: BootState,
    },
}

impl BootOutcome {
    /// Returns `true` if boot completed.
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Top-level fabric simulator.
pub struct Simulator {
    interconnect: Interconnect,
    sequencer: BootSequencer,
    boot_requester: RequesterId,
    initiators: Vec<Initiator>,
    flash: Box<dyn ByteSource>,
    memory: Sram,
    reset: bool,
    writes: Vec<BootWrite>,
    stats: SimStats,
}

impl Simulator {
    /// Builds a simulator from a configuration and a firmware stream.
    ///
    /// Every requester slot other than the boot sequencer's gets an idle [`Initiator`].
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the configuration does not validate.
    pub fn new(config: &Config, flash: Box<dyn ByteSource>) -> Result<Self, SimError> {
        config.validate()?;

        let registry = config.arbiter.registry()?;
        let num_requesters = registry.len();
        let boot_requester = RequesterId(config.boot.boot_requester);
        let initiators = (0..num_requesters)
            .map(RequesterId)
            .filter(|&id| id != boot_requester)
            .map(Initiator::new)
            .collect();

        Ok(Self {
            interconnect: Interconnect::new(WeightedRoundRobinArbiter::new(registry)),
            sequencer: BootSequencer::from_config(&config.boot)?,
            boot_requester,
            initiators,
            flash,
            memory: Sram::new(config.memory.size_bytes),
            reset: false,
            writes: Vec::new(),
            stats: SimStats::new(num_requesters),
        })
    }

    /// Drives the reset input; it stays at this level until changed.
    pub fn set_reset(&mut self, asserted: bool) {
        if asserted && !self.reset {
            self.stats.resets += 1;
        }
        self.reset = asserted;
    }

    /// Replaces the firmware stream, e.g. to boot a different image after a reset.
    pub fn set_flash(&mut self, flash: Box<dyn ByteSource>) {
        self.flash = flash;
    }

    /// Advances the whole fabric by one tick.
    ///
    /// # Returns
    ///
    /// The boot sequencer's state after the tick.
    ///
    /// # Errors
    ///
    /// [`SimError::Arbitration`] if the arbiter reports a protocol violation.
    pub fn tick(&mut self) -> Result<BootState, SimError> {
        self.stats.ticks += 1;

        if self.reset {
            self.stats.reset_ticks += 1;
            self.interconnect.reset();
            self.writes.clear();
            self.flash.restart();
            return Ok(self.sequencer.tick(
                BootInputs::RESET,
                self.flash.as_mut(),
                &mut self.memory,
            ));
        }

        let pending = self.pending();
        let boot_requesting = pending.is_pending(self.boot_requester);
        let grant = self.interconnect.cycle(&pending)?;

        match grant {
            Grant::Idle => self.stats.idle_rounds += 1,
            Grant::Arbitrated(id) => {
                self.stats.record_grant(id);
                if id == self.boot_requester {
                    self.interconnect.lock(id);
                } else {
                    self.serve_initiator(id);
                }
            }
            Grant::Held(_) => self.stats.held_ticks += 1,
        }

        let boot_granted = grant.is_granted(self.boot_requester);
        if boot_requesting && !boot_granted {
            self.stats.grant_wait_ticks += 1;
        }

        let state = self.sequencer.tick(
            BootInputs::with_grant(boot_granted),
            self.flash.as_mut(),
            &mut self.memory,
        );
        if let BootState::Write { word } = state {
            self.stats.boot_words += 1;
            self.writes.push(BootWrite {
                address: self.sequencer.address(),
                data: word,
            });
        }
        Ok(state)
    }

    /// Ticks until `boot_done` rises or `max_ticks` ticks have elapsed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Simulator::tick`].
    pub fn run(&mut self, max_ticks: u64) -> Result<BootOutcome, SimError> {
        for _ in 0..max_ticks {
            if self.tick()? == BootState::Done {
                info!(ticks = self.stats.ticks, "cores enabled");
                return Ok(BootOutcome::Completed {
                    ticks: self.stats.ticks,
                });
            }
        }

        let progress = self.sequencer.progress();
        warn!(
            ticks = self.stats.ticks,
            words_written = progress.words_written,
            total_words = progress.total_words,
            state = self.sequencer.state().name(),
            "boot did not complete within the tick budget; cores stay disabled"
        );
        Ok(BootOutcome::Stalled {
            ticks: self.stats.ticks,
            words_written: progress.words_written,
            state: self.sequencer.state(),
        })
    }

    fn pending(&self) -> PendingRequests {
        let mut pending = PendingRequests::new(self.interconnect.arbiter().num_requesters());
        pending.set(self.boot_requester, self.sequencer.bus_request());
        for initiator in &self.initiators {
            pending.set(initiator.id(), initiator.is_requesting());
        }
        pending
    }

    fn serve_initiator(&mut self, id: RequesterId) {
        let Some(initiator) = self.initiators.iter_mut().find(|i| i.id() == id) else {
            return;
        };
        if let Some(request) = initiator.take_request() {
            let response = self.interconnect.forward(id, request, &mut self.memory);
            initiator.complete(response);
            self.stats.initiator_transfers += 1;
        }
    }

    /// The boot sequencer.
    pub fn sequencer(&self) -> &BootSequencer {
        &self.sequencer
    }

    /// Boot sequencer output signals.
    pub fn signals(&self) -> BootSignals {
        self.sequencer.signals()
    }

    /// Boot progress.
    pub fn progress(&self) -> BootProgress {
        self.sequencer.progress()
    }

    /// Requester slot of the boot sequencer.
    pub fn boot_requester(&self) -> RequesterId {
        self.boot_requester
    }

    /// The initiator in slot `id`, if that slot is not the boot sequencer's.
    pub fn initiator(&self, id: RequesterId) -> Option<&Initiator> {
        self.initiators.iter().find(|i| i.id() == id)
    }

    /// Mutable access to the initiator in slot `id`.
    pub fn initiator_mut(&mut self, id: RequesterId) -> Option<&mut Initiator> {
        self.initiators.iter_mut().find(|i| i.id() == id)
    }

    /// All initiators in slot order.
    pub fn initiators(&self) -> &[Initiator] {
        &self.initiators
    }

    /// The interconnect.
    pub fn interconnect(&self) -> &Interconnect {
        &self.interconnect
    }

    /// Shared memory.
    pub fn memory(&self) -> &Sram {
        &self.memory
    }

    /// Boot words written since the last reset, in order.
    pub fn writes(&self) -> &[BootWrite] {
        &self.writes
    }

    /// Statistics so far.
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("state", &self.sequencer.state())
            .field("progress", &self.sequencer.progress())
            .field("boot_requester", &self.boot_requester)
            .field("reset", &self.reset)
            .field("ticks", &self.stats.ticks)
            .finish_non_exhaustive()
    }
}
