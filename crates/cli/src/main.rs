//! Boot fabric simulator CLI.
//!
//! This binary drives a simulated boot of the fabric. It performs:
//! 1. **Configuration:** Loads a JSON config (or uses the defaults) and applies overrides.
//! 2. **Firmware:** Reads a raw flash image, or generates a counting pattern.
//! 3. **Run:** Clocks the fabric until the cores are enabled or the tick budget runs out,
//!    optionally with background traffic from the other initiators.

use clap::{Parser, Subcommand, ValueEnum};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use housekeeping_core::boot::FlashImage;
use housekeeping_core::common::{RequesterId, WORD_BYTES};
use housekeeping_core::config::Config;
use housekeeping_core::sim::loader;
use housekeeping_core::sim::{BootOutcome, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "hksim",
    author,
    version,
    about = "Boot fabric simulator: weighted round-robin bus arbiter and flash boot sequencer",
    long_about = "Stream a firmware image from flash into shared SRAM through the arbitrated bus.\n\nExamples:\n  hksim run --pattern counting --words 8\n  hksim run --image fw.bin --config fabric.json --initiator-traffic 4\n  RUST_LOG=debug hksim run --pattern counting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one boot to completion (or until the tick budget expires).
    Run {
        /// Raw firmware image to stream from flash.
        #[arg(short, long, conflicts_with = "pattern")]
        image: Option<String>,

        /// Generated firmware image instead of a file.
        #[arg(short, long, value_enum)]
        pattern: Option<Pattern>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<String>,

        /// Override the boot length in words.
        #[arg(short, long)]
        words: Option<u32>,

        /// Override the arbiter weights (comma separated, one per requester).
        #[arg(long, value_delimiter = ',')]
        weights: Option<Vec<u32>>,

        /// Tick budget before the boot is declared stalled.
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,

        /// Transactions queued on every other initiator before the run.
        #[arg(long, default_value_t = 0)]
        initiator_traffic: u32,

        /// Dump the boot region of SRAM after the run.
        #[arg(long)]
        dump: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Pattern {
    /// Bytes 0, 1, 2, ... covering the boot length.
    Counting,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            image,
            pattern,
            config,
            words,
            weights,
            max_ticks,
            initiator_traffic,
            dump,
        } => {
            let config = build_config(config.as_deref(), words, weights);
            let flash = build_flash(image.as_deref(), pattern, &config);
            cmd_run(&config, flash, max_ticks, initiator_traffic, dump);
        }
    }
}

/// Loads the config file (if any) and applies command-line overrides.
fn build_config(path: Option<&str>, words: Option<u32>, weights: Option<Vec<u32>>) -> Config {
    let mut config = match path {
        Some(p) => loader::load_config(p).unwrap_or_else(|e| fatal(&e)),
        None => Config::default(),
    };
    if let Some(w) = words {
        config.boot.total_words = w;
    }
    if let Some(w) = weights {
        config.arbiter.weights = w;
    }
    if let Err(e) = config.validate() {
        fatal(&e);
    }
    debug!(?config, "configuration resolved");
    config
}

fn build_flash(image: Option<&str>, pattern: Option<Pattern>, config: &Config) -> FlashImage {
    let flash = match (image, pattern) {
        (Some(path), _) => loader::load_firmware(path).unwrap_or_else(|e| fatal(&e)),
        (None, Some(Pattern::Counting)) => FlashImage::counting(config.boot.total_words),
        (None, None) => {
            eprintln!("Error: specify --image <file> or --pattern counting");
            eprintln!("  hksim run --pattern counting --words 8");
            eprintln!("  hksim run --image fw.bin");
            process::exit(1);
        }
    };
    if let Some(notice) = short_image_notice(&flash, config) {
        eprintln!("{notice}");
    }
    flash
}

/// Warning printed before a run that cannot complete because the image is too short.
fn short_image_notice(flash: &FlashImage, config: &Config) -> Option<String> {
    if loader::check_image(flash, &config.boot) {
        return None;
    }
    Some(format!(
        "[!] Image holds {} bytes but the boot needs {}: the run will stall with the cores disabled",
        flash.len(),
        config.boot.image_bytes()
    ))
}

/// Clocks the fabric and prints the outcome, the boot writes and the statistics.
///
/// Exits with code 2 when the boot stalls, so scripts can tell a fail-closed boot from a crash.
fn cmd_run(config: &Config, flash: FlashImage, max_ticks: u64, traffic: u32, dump: bool) {
    println!(
        "Configuration: weights={:?} boot_requester={} words={} sram={} bytes",
        config.arbiter.weights,
        config.boot.boot_requester,
        config.boot.total_words,
        config.memory.size_bytes
    );

    let mut sim = Simulator::new(config, Box::new(flash)).unwrap_or_else(|e| fatal(&e));
    queue_traffic(&mut sim, traffic, config.memory.size_bytes);

    let outcome = sim.run(max_ticks).unwrap_or_else(|e| fatal(&e));

    for (i, w) in sim.writes().iter().enumerate() {
        println!("  word {i:>4}: [{:#010x}] <- {:#010x}", w.address, w.data);
    }
    if dump {
        for addr in (0..config.boot.total_words).map(|i| i * 4) {
            if let Some(word) = sim.memory().word_at(addr) {
                println!("  sram[{addr:#010x}] = {word:#010x}");
            }
        }
    }
    println!();
    sim.stats().print();

    match outcome {
        BootOutcome::Completed { ticks } => {
            println!("\n[*] Boot complete after {ticks} ticks: boot_done=1 cores_enabled=1");
        }
        BootOutcome::Stalled {
            ticks,
            words_written,
            state,
        } => {
            println!(
                "\n[!] Boot stalled after {ticks} ticks in {} ({words_written}/{} words): cores remain disabled",
                state.name(),
                config.boot.total_words
            );
            process::exit(2);
        }
    }
}

/// Queues alternating writes and reads on every initiator in the upper half of SRAM.
fn queue_traffic(sim: &mut Simulator, per_initiator: u32, sram_bytes: usize) {
    let ids: Vec<RequesterId> = sim.initiators().iter().map(|i| i.id()).collect();
    for id in ids {
        if let Some(initiator) = sim.initiator_mut(id) {
            for n in 0..per_initiator {
                let addr = traffic_address(id, n, sram_bytes);
                if n % 2 == 0 {
                    initiator.write_word(addr, 0xA5A5_0000 | n);
                } else {
                    initiator.read(addr);
                }
            }
        }
    }
}

/// Word address of transaction `n` of initiator `id`, wrapped into the upper half of SRAM.
///
/// `sram_bytes` has been validated to hold at least one word and to fit the 32-bit bus,
/// so the result always lies inside the SRAM and fits in `u32`.
fn traffic_address(id: RequesterId, n: u32, sram_bytes: usize) -> u32 {
    let words = (sram_bytes / WORD_BYTES as usize).max(1);
    let base = words / 2;
    let span = words - base;
    let word = id
        .index()
        .wrapping_mul(16)
        .wrapping_add(n as usize)
        % span;
    ((base + word) * WORD_BYTES as usize) as u32
}

fn fatal(err: &dyn std::error::Error) -> ! {
    eprintln!("\n[!] FATAL: {err}");
    process::exit(1);
}
