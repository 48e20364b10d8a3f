//! Core of a streaming brute-force / abuse detector.
//!
//! Reads keyed event lines and maintains sliding-window counters
//! across multiple time horizons using a counting-Bloom-filter-like
//! structure backed by per-window bitmaps of small counters. This
//! crate is the probabilistic data structure and its supporting line
//! framing; it has no knowledge of stdin, subprocesses, or CLI
//! arguments — those live in the `bloomwall-cli` binary crate so this
//! core stays a plain, independently testable library.

#[macro_use]
extern crate static_assertions;

pub mod clock;
pub mod error;
pub mod hash;
pub mod line_reader;
pub mod window;

pub use clock::{Clock, MonotonicClock};
pub use error::DetectError;
pub use line_reader::{LineReader, MAX_LINELEN};
pub use window::{derive_km, WindowCounter, WindowSpec, PERIODS_SECS, WINDOW_COUNT};
