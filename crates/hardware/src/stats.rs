//! Simulation statistics collection and reporting.
//!
//! This module tracks what happened on the bus during a run. It provides:
//! 1. **Time:** Total ticks and ticks spent with reset asserted.
//! 2. **Arbitration:** Rounds run, idle rounds, and grants per requester.
//! 3. **Boot:** Words written and ticks the boot sequencer spent waiting for a grant.
//! 4. **Initiators:** Transactions completed on behalf of other bus masters.

use std::fmt;

use crate::common::id::RequesterId;

/// Counters accumulated by the simulator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Ticks simulated.
    pub ticks: u64,
    /// Ticks with reset asserted.
    pub reset_ticks: u64,
    /// Rising edges of reset.
    pub resets: u64,
    /// Arbitration rounds that produced no grant.
    pub idle_rounds: u64,
    /// Ticks in which a locked owner kept the bus without a round.
    pub held_ticks: u64,
    /// Grants won in arbitration rounds, per requester.
    pub grants: Vec<u64>,
    /// Boot words written to memory.
    pub boot_words: u64,
    /// Ticks the boot sequencer requested the bus without holding it.
    pub grant_wait_ticks: u64,
    /// Initiator transactions completed.
    pub initiator_transfers: u64,
}

impl SimStats {
    /// Creates zeroed counters for `num_requesters` requesters.
    pub fn new(num_requesters: usize) -> Self {
        Self {
            grants: vec![0; num_requesters],
            ..Self::default()
        }
    }

    /// Counts an arbitrated grant to `id`.
    pub fn record_grant(&mut self, id: RequesterId) {
        if let Some(count) = self.grants.get_mut(id.index()) {
            *count += 1;
        }
    }

    /// Grants won by `id`.
    pub fn grants_for(&self, id: RequesterId) -> u64 {
        self.grants.get(id.index()).copied().unwrap_or(0)
    }

    /// Total arbitrated grants.
    pub fn total_grants(&self) -> u64 {
        self.grants.iter().sum()
    }

    /// Prints the summary to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "BOOT FABRIC STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "ticks                    {}", self.ticks)?;
        writeln!(f, "  reset ticks            {} ({} resets)", self.reset_ticks, self.resets)?;
        writeln!(f, "boot words written       {}", self.boot_words)?;
        writeln!(f, "  grant wait ticks       {}", self.grant_wait_ticks)?;
        writeln!(f, "initiator transfers      {}", self.initiator_transfers)?;
        writeln!(f, "idle rounds              {}", self.idle_rounds)?;
        writeln!(f, "held ticks               {}", self.held_ticks)?;
        writeln!(f, "grants")?;
        for (i, count) in self.grants.iter().enumerate() {
            writeln!(f, "  {:<22} {}", RequesterId(i).to_string(), count)?;
        }
        write!(f, "==========================================================")
    }
}
