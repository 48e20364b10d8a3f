//! Error types for the detector core.
//!
//! Every fatal condition is constructed with [`track_caller`] so the
//! call site survives into the rendered diagnostic, mirroring the
//! `file:line` prefix the original C implementation produced via its
//! `fatal()`/`pfatal()` macros.

use std::panic::Location;

/// A fatal condition raised by the detector core.
///
/// There is no local recovery from any of these: construction of a
/// `DetectError` is always the last thing the core does before the
/// caller bubbles it up to `main` and the process exits.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("[{at}] invalid capacity {capacity}: must be >= 1")]
    InvalidCapacity {
        capacity: u64,
        at: &'static Location<'static>,
    },

    #[error("[{at}] invalid error rate {error_rate}: must be in (0, 1)")]
    InvalidErrorRate {
        error_rate: f64,
        at: &'static Location<'static>,
    },

    #[error("[{at}] line of {len} bytes exceeds MAX_LINELEN ({max})")]
    LineTooLong {
        len: usize,
        max: usize,
        at: &'static Location<'static>,
    },

    #[error("[{at}] malformed line: missing id or payload")]
    MalformedLine { at: &'static Location<'static> },
}

impl DetectError {
    #[track_caller]
    pub fn invalid_capacity(capacity: u64) -> Self {
        Self::InvalidCapacity {
            capacity,
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn invalid_error_rate(error_rate: f64) -> Self {
        Self::InvalidErrorRate {
            error_rate,
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn line_too_long(len: usize) -> Self {
        Self::LineTooLong {
            len,
            max: crate::line_reader::MAX_LINELEN,
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn malformed_line() -> Self {
        Self::MalformedLine {
            at: Location::caller(),
        }
    }
}
