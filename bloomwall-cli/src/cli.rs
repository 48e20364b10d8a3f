//! Command-line surface.
//!
//! Mirrors the invocation shape of the distilled specification:
//! `bloomwall [-c <capacity>] [-e <error_rate>] <t1> <t2> <t3> <cmd_template>`.
//! Unlike the program this was distilled from — whose `main` parsed
//! `-c`/`-e` into locals and then silently overwrote them with the
//! built-in defaults — both flags are honoured here.

use bloomwall_core::{derive_km, DetectError, WindowSpec, PERIODS_SECS, WINDOW_COUNT};
use clap::Parser;

/// Streaming brute-force / abuse detector.
///
/// Reads whitespace-keyed event lines from stdin (one per `\n`-terminated
/// line: an id token followed by at least one payload token) and fires
/// `cmd_template` whenever any of three tumbling-window counters — at
/// 10 seconds, 1 minute, and 10 minutes — exceeds its configured
/// threshold. The filter is a counting-Bloom-filter-like structure
/// sized from `capacity`/`error_rate`, so thresholds are checked
/// against a probabilistic lower bound on the true per-key count:
/// false positives are possible, false negatives are not.
///
/// `cmd_template` is split into argv tokens once at startup (shell
/// word-splitting rules) and is never re-interpreted by a shell when
/// fired — every literal occurrence of the token `KEY` in any argument
/// is replaced with the offending key, then the result is executed
/// directly. This avoids the shell-injection risk a naive `sh -c`
/// substitution of an attacker-controlled key would otherwise open up.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Target number of insertions the counting filter is sized for.
    #[arg(short = 'c', long = "capacity", default_value_t = 100_000)]
    pub capacity: u64,

    /// Target false-positive rate, in (0, 1).
    #[arg(short = 'e', long = "error-rate", default_value_t = 0.01)]
    pub error_rate: f64,

    /// Threshold for the 10-second window.
    pub t1: u32,
    /// Threshold for the 1-minute window.
    pub t2: u32,
    /// Threshold for the 10-minute window.
    pub t3: u32,

    /// Command to run on a threshold crossing, e.g. `"logger -t abuse KEY"`.
    /// Tokenized once with shell word-splitting rules; KEY is substituted
    /// per-token, and the result is exec'd directly (no shell).
    pub cmd_template: String,
}

impl Args {
    pub fn window_specs(&self) -> [WindowSpec; WINDOW_COUNT] {
        [
            WindowSpec::new(PERIODS_SECS[0], self.t1),
            WindowSpec::new(PERIODS_SECS[1], self.t2),
            WindowSpec::new(PERIODS_SECS[2], self.t3),
        ]
    }
}

/// The validated configuration a `WindowCounter` is built from:
/// the counting-filter sizing target plus the three window specs.
///
/// Constructed once from parsed CLI arguments and validated — by
/// deriving `(k, m)` from `capacity`/`error_rate` and discarding the
/// result — before any counters are allocated, so a bad `-c`/`-e`
/// value surfaces as a configuration error rather than partway through
/// `WindowCounter::new`.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub capacity: u64,
    pub error_rate: f64,
    pub window_specs: [WindowSpec; WINDOW_COUNT],
}

impl DetectorConfig {
    pub fn from_args(args: &Args) -> Result<Self, DetectError> {
        derive_km(args.capacity, args.error_rate)?;
        Ok(Self {
            capacity: args.capacity,
            error_rate: args.error_rate,
            window_specs: args.window_specs(),
        })
    }
}
