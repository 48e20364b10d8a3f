//! Trigger sink: renders `cmd_template` for an offending key and
//! executes it fire-and-forget.

use std::process::Command;

use crate::error::CliError;

/// Bound on the rendered command's total length, in bytes.
pub const MAX_RENDERED_LEN: usize = 8192;

/// An argv-shaped command template, tokenized once at construction.
#[derive(Debug, Clone)]
pub struct Trigger {
    argv: Vec<String>,
}

impl Trigger {
    /// Tokenizes `template` with shell word-splitting rules. The
    /// result is never handed back to a shell — `fire` execs the
    /// first token directly with the rest as `argv[1..]`.
    pub fn parse(template: &str) -> Result<Self, CliError> {
        let argv = shlex::split(template)
            .ok_or_else(|| CliError::empty_trigger_template(template))?;
        if argv.is_empty() {
            return Err(CliError::empty_trigger_template(template));
        }
        Ok(Self { argv })
    }

    /// Replaces every literal `KEY` occurrence in each argv token with
    /// `key` and spawns the result without waiting for it to exit.
    pub fn fire(&self, key: &str) -> Result<(), CliError> {
        let rendered: Vec<String> = self
            .argv
            .iter()
            .map(|token| token.replace("KEY", key))
            .collect();

        let total_len: usize = rendered.iter().map(|t| t.len() + 1).sum();
        if total_len > MAX_RENDERED_LEN {
            return Err(CliError::trigger_too_long(total_len));
        }

        log::info!("threshold crossed, firing trigger for key {key:?}");
        Command::new(&rendered[0])
            .args(&rendered[1..])
            .spawn()
            .map_err(CliError::spawn_failed)?;
        Ok(())
    }
}
