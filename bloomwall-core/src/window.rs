//! The multi-window counting-Bloom-filter structure.
//!
//! Each [`Window`] is a tumbling bucket: a counting Bloom filter that
//! is hard-reset to all zeroes once its period has elapsed, rather
//! than decaying continuously. `W` windows at different periods
//! (repository default: 10s, 60s, 600s) together approximate a
//! sliding window at three granularities.

use log::debug;

use crate::clock::{Clock, MonotonicClock};
use crate::error::DetectError;
use crate::hash;

/// Number of independent windows a [`WindowCounter`] tracks.
///
/// Fixed rather than generic: the CLI always supplies exactly three
/// thresholds (`t1 t2 t3`), one per hard-coded period.
pub const WINDOW_COUNT: usize = 3;

/// The three window periods, in seconds, in the order thresholds are
/// supplied on the command line.
pub const PERIODS_SECS: [u64; WINDOW_COUNT] = [10, 60, 600];

const_assert_eq!(PERIODS_SECS.len(), WINDOW_COUNT);

/// A single window's reset period and trigger threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub period_secs: u64,
    pub threshold: u32,
}

impl WindowSpec {
    pub fn new(period_secs: u64, threshold: u32) -> Self {
        Self {
            period_secs,
            threshold,
        }
    }
}

/// Derives `(k, m)` — the number of hash functions and the
/// counters-per-function — from a target insertion `capacity` and a
/// target false-positive `error_rate`.
///
/// `k = ceil(log2(1/error_rate))`, `m = ceil(capacity * |ln(error_rate)|
/// / (k * ln(2)^2))`. Both are always `>= 1` for any valid
/// `capacity >= 1` and `error_rate` in `(0, 1)`.
pub fn derive_km(capacity: u64, error_rate: f64) -> Result<(u32, u32), DetectError> {
    if capacity < 1 {
        return Err(DetectError::invalid_capacity(capacity));
    }
    if !(error_rate > 0.0 && error_rate < 1.0) {
        return Err(DetectError::invalid_error_rate(error_rate));
    }

    let k = (1.0 / error_rate).log2().ceil();
    let k = k.max(1.0) as u32;

    let ln2_sq = std::f64::consts::LN_2 * std::f64::consts::LN_2;
    let m = (capacity as f64 * error_rate.ln().abs() / (k as f64 * ln2_sq)).ceil();
    let m = m.max(1.0) as u32;

    Ok((k, m))
}

#[derive(Debug)]
struct Window {
    spec: WindowSpec,
    counters: Vec<u32>,
    last_reset: u64,
}

impl Window {
    fn new(spec: WindowSpec, k: u32, m: u32, now: u64) -> Self {
        Self {
            spec,
            counters: vec![0u32; k as usize * m as usize],
            last_reset: now,
        }
    }

    /// Hard-resets this window if its period has fully elapsed.
    ///
    /// No catch-up: an arbitrarily large `elapsed` still triggers
    /// exactly one reset. This is a "bucket since last reset", not a
    /// "one bucket per period" semantics.
    fn maybe_reset(&mut self, now: u64) {
        if MonotonicClock::diff(now, self.last_reset) >= self.spec.period_secs {
            self.counters.iter_mut().for_each(|c| *c = 0);
            self.last_reset = now;
            debug!(
                "window (period={}s, threshold={}) reset at t={now}",
                self.spec.period_secs, self.spec.threshold
            );
        }
    }
}

/// Holds `W` independent counting-Bloom-filter windows sharing one
/// `(k, m)` shape, and drives their increment/reset lifecycle.
#[derive(Debug)]
pub struct WindowCounter {
    k: u32,
    m: u32,
    windows: [Window; WINDOW_COUNT],
    /// Reused hash-index scratch space; avoids a per-`observe` allocation.
    scratch: Vec<u32>,
}

impl WindowCounter {
    /// Allocates all `W` counter arrays up front from `(capacity, error_rate)`.
    pub fn new(
        capacity: u64,
        error_rate: f64,
        specs: [WindowSpec; WINDOW_COUNT],
        now: u64,
    ) -> Result<Self, DetectError> {
        let (k, m) = derive_km(capacity, error_rate)?;
        let windows = specs.map(|spec| Window::new(spec, k, m, now));
        Ok(Self {
            k,
            m,
            windows,
            scratch: Vec::with_capacity(k as usize),
        })
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    pub fn m(&self) -> u32 {
        self.m
    }

    pub fn thresholds(&self) -> [u32; WINDOW_COUNT] {
        let mut out = [0u32; WINDOW_COUNT];
        for (i, w) in self.windows.iter().enumerate() {
            out[i] = w.spec.threshold;
        }
        out
    }

    /// Increments every window's `k` hashed counters for `key` by one,
    /// returning the post-increment minimum (the observed count) per
    /// window. The increment across all `W` windows completes before
    /// this returns — no threshold check interleaves with it.
    pub fn observe(&mut self, key: &[u8]) -> [u32; WINDOW_COUNT] {
        hash::write_indices(key, self.k, self.m, &mut self.scratch);

        let m = self.m as usize;
        let indices = &self.scratch;
        let mut counts = [0u32; WINDOW_COUNT];

        for (wi, window) in self.windows.iter_mut().enumerate() {
            let mut min = u32::MAX;
            for (bank, &idx) in indices.iter().enumerate() {
                let counter = &mut window.counters[bank * m + idx as usize];
                *counter = counter.saturating_add(1);
                min = min.min(*counter);
            }
            counts[wi] = min;
        }

        debug!("observe: window counts {counts:?} (thresholds {:?})", self.thresholds());
        counts
    }

    /// Resets any window whose period has elapsed since its last reset.
    pub fn maybe_reset(&mut self, now: u64) {
        for window in &mut self.windows {
            window.maybe_reset(now);
        }
    }
}
