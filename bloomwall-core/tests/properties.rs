//! Property tests for the invariants enumerated in the spec's
//! "testable properties" section: `(k, m)` derivation, the
//! counting-Bloom no-false-negatives guarantee, and per-`observe`
//! increment-by-exactly-one.

use bloomwall_core::{derive_km, WindowCounter, WindowSpec, PERIODS_SECS, WINDOW_COUNT};
use proptest::prelude::*;

fn uniform_specs(threshold: u32) -> [WindowSpec; WINDOW_COUNT] {
    std::array::from_fn(|i| WindowSpec::new(PERIODS_SECS[i], threshold))
}

proptest! {
    /// `k = ceil(log2(1/e))` and `m = ceil(C * |ln e| / (k * ln(2)^2))`
    /// for any `C >= 1` and `e` in `(0, 1)`, and both are always `>= 1`.
    #[test]
    fn km_derivation_matches_formula(
        capacity in 1u64..10_000_000,
        error_rate in 1e-6f64..0.999999,
    ) {
        let (k, m) = derive_km(capacity, error_rate).unwrap();

        let expected_k = (1.0 / error_rate).log2().ceil().max(1.0) as u32;
        prop_assert_eq!(k, expected_k);

        let ln2_sq = std::f64::consts::LN_2 * std::f64::consts::LN_2;
        let expected_m = (capacity as f64 * error_rate.ln().abs() / (k as f64 * ln2_sq))
            .ceil()
            .max(1.0) as u32;
        prop_assert_eq!(m, expected_m);

        prop_assert!(k >= 1);
        prop_assert!(m >= 1);
    }

    /// Inserting a key `n` times between resets yields `observe(x)[i] >= n`
    /// for every window `i` — the counting-Bloom lower-bound property
    /// rules out false negatives, though false positives remain possible.
    #[test]
    fn no_false_negatives_for_n_insertions(
        n in 1u32..200,
        key in "[a-z0-9]{1,32}",
    ) {
        let mut wc = WindowCounter::new(100_000, 0.01, uniform_specs(u32::MAX), 0).unwrap();
        let mut last = [0u32; WINDOW_COUNT];
        for _ in 0..n {
            last = wc.observe(key.as_bytes());
        }
        for count in last {
            prop_assert!(count >= n);
        }
    }

    /// Every `observe` increments each of a window's `k` hashed
    /// counters by exactly one: two consecutive single observations of
    /// distinct keys can only ever grow a window's reported count by
    /// one relative to inserting just the first key alone.
    #[test]
    fn observe_grows_each_window_by_exactly_one_per_call(
        key in "[a-z0-9]{1,32}",
    ) {
        let mut wc = WindowCounter::new(100_000, 0.01, uniform_specs(u32::MAX), 0).unwrap();
        let first = wc.observe(key.as_bytes());
        let second = wc.observe(key.as_bytes());
        for i in 0..WINDOW_COUNT {
            prop_assert_eq!(second[i], first[i] + 1);
        }
    }

    /// `maybe_reset` called with `elapsed >= period` always zeroes every
    /// counter in that window and advances its reset clock, regardless
    /// of how far past the period `now` lands.
    #[test]
    fn reset_zeroes_counters_whenever_period_elapsed(
        key in "[a-z0-9]{1,32}",
        overshoot in 0u64..100_000,
    ) {
        let mut wc = WindowCounter::new(100_000, 0.01, uniform_specs(u32::MAX), 0).unwrap();
        wc.observe(key.as_bytes());
        wc.maybe_reset(PERIODS_SECS[0] + overshoot);
        let counts = wc.observe(key.as_bytes());
        // Window 0 always resets (its period, 10s, is the smallest);
        // a fresh single observation reads back as exactly 1.
        prop_assert_eq!(counts[0], 1);
    }
}
