//! Top-level error type the binary bubbles up to `main`.
//!
//! Every variant renders with a `[file:line]` prefix so a fatal exit
//! points straight back at the call site that raised it, matching the
//! diagnostic shape of the program this crate replaces.

use std::panic::Location;

use bloomwall_core::DetectError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("[{at}] cmd_template did not tokenize to a non-empty argv: {template:?}")]
    EmptyTriggerTemplate {
        template: String,
        at: &'static Location<'static>,
    },

    #[error("[{at}] rendered trigger command ({len} bytes) exceeds the 8192-byte bound")]
    TriggerTooLong {
        len: usize,
        at: &'static Location<'static>,
    },

    #[error("[{at}] failed to spawn trigger command: {source}")]
    SpawnFailed {
        #[source]
        source: std::io::Error,
        at: &'static Location<'static>,
    },

    #[error("[{at}] stdin read failed: {source}")]
    StdinRead {
        #[source]
        source: std::io::Error,
        at: &'static Location<'static>,
    },

    #[error("[{at}] failed to start the async runtime: {source}")]
    RuntimeInit {
        #[source]
        source: std::io::Error,
        at: &'static Location<'static>,
    },
}

impl CliError {
    #[track_caller]
    pub fn empty_trigger_template(template: &str) -> Self {
        Self::EmptyTriggerTemplate {
            template: template.to_owned(),
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn trigger_too_long(len: usize) -> Self {
        Self::TriggerTooLong {
            len,
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn spawn_failed(source: std::io::Error) -> Self {
        Self::SpawnFailed {
            source,
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn stdin_read(source: std::io::Error) -> Self {
        Self::StdinRead {
            source,
            at: Location::caller(),
        }
    }

    #[track_caller]
    pub fn runtime_init(source: std::io::Error) -> Self {
        Self::RuntimeInit {
            source,
            at: Location::caller(),
        }
    }
}
