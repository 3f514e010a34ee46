//! External text sources
//!
//! The probe never talks to the router directly; it shells out to FRR's
//! `vtysh` and consumes whatever text comes back. The invocation sits behind
//! the [`TextSource`] trait so the orchestrator and its tests can substitute
//! canned output.

use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// A collaborator that produces raw CLI text or fails.
pub trait TextSource {
    fn fetch(&self) -> Result<String, SourceError>;
}

/// Failure to obtain text from the upstream CLI.
///
/// Both variants are fatal to the probe: there is no retry and no partial
/// data fabrication.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} -c \"{command}\" failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Runs one fixed vtysh command per invocation.
#[derive(Debug, Clone)]
pub struct VtyshSource {
    program: String,
    command: String,
}

impl VtyshSource {
    pub fn new(program: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            command: command.into(),
        }
    }

    /// Source for the per-neighbor configuration.
    pub fn running_config(program: impl Into<String>) -> Self {
        Self::new(program, "show running-config")
    }

    /// Source for the session summary table.
    pub fn bgp_summary(program: impl Into<String>) -> Self {
        Self::new(program, "show bgp summary")
    }
}

impl TextSource for VtyshSource {
    fn fetch(&self) -> Result<String, SourceError> {
        debug!(program = %self.program, command = %self.command, "invoking source");

        let output = Command::new(&self.program)
            .arg("-c")
            .arg(&self.command)
            .output()
            .map_err(|source| SourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                program: self.program.clone(),
                command: self.command.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
