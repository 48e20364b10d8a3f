//! The detector loop: single-threaded, cooperative, one suspension
//! point per iteration.
//!
//! Ported from a `poll(2)`-driven C event loop with a hand-rolled
//! `roff`/`woff` byte buffer and a `goto nextline` for draining
//! multiple buffered lines. Here the suspension point is
//! `tokio::time::timeout` around a stdin read on a current-thread
//! runtime — no OS thread pool, no real parallelism, matching the
//! "single-threaded, cooperative" model this was distilled from — and
//! "keep draining until nothing's left" is an ordinary loop instead of
//! a label.

use std::time::Duration;

use bloomwall_core::{Clock, LineReader, MonotonicClock, WindowCounter};
use log::info;
use tokio::io::{AsyncReadExt, Stdin};
use tokio::time::timeout;

use crate::error::CliError;
use crate::trigger::Trigger;

/// The poll's 1-second bound. Exists solely so `maybe_reset` still
/// runs periodically when no input arrives; it is not a cancellation
/// mechanism.
const POLL_TIMEOUT: Duration = Duration::from_secs(1);

const READ_CHUNK: usize = 4096;

pub struct Detector {
    reader: LineReader,
    counter: WindowCounter,
    clock: MonotonicClock,
    trigger: Trigger,
}

impl Detector {
    pub fn new(counter: WindowCounter, trigger: Trigger) -> Self {
        Self {
            reader: LineReader::new(),
            counter,
            clock: MonotonicClock::new(),
            trigger,
        }
    }

    /// Runs forever. Only returns on a fatal error — matching the
    /// spec's "exit code 0 never" contract, even on stdin EOF.
    pub async fn run(mut self, mut stdin: Stdin) -> Result<(), CliError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match timeout(POLL_TIMEOUT, stdin.read(&mut chunk)).await {
                Ok(Ok(n)) => {
                    if n > 0 {
                        self.reader.push(&chunk[..n]);
                        self.drain_lines()?;
                    }
                }
                Ok(Err(e)) => return Err(CliError::stdin_read(e)),
                Err(_elapsed) => {
                    // No input within the 1-second poll window.
                }
            }

            // Resets happen at the end of every iteration, after any
            // triggers for this iteration have already fired — a line
            // arriving in the same iteration as a scheduled reset is
            // still counted in the old bucket.
            self.counter.maybe_reset(self.clock.now_secs());
        }
    }

    /// Drains every currently-parseable line. All `W` windows are
    /// observed for a line before any of its threshold checks fire.
    fn drain_lines(&mut self) -> Result<(), CliError> {
        while let Some(line) = self.reader.next_line()? {
            let counts = self.counter.observe(&line);
            let thresholds = self.counter.thresholds();
            let key = String::from_utf8_lossy(&line).into_owned();

            for i in 0..counts.len() {
                if counts[i] > thresholds[i] {
                    info!("window {i} over threshold ({} > {}) for {key:?}", counts[i], thresholds[i]);
                    self.trigger.fire(&key)?;
                }
            }
        }
        Ok(())
    }
}
