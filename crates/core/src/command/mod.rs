//! Process execution boundary
//!
//! Scanners never spawn processes directly. Everything goes through a
//! [`CommandRunner`] so the shell can be swapped for a scripted runner in tests.

mod shell;

#[cfg(test)]
pub(crate) mod fake;

pub use shell::{RunnerOptions, ShellRunner};

use crate::error::Result;
use std::path::Path;

/// Captured result of a command that was started successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub status: Option<i32>,
    /// Standard output decoded as UTF-8. Invalid sequences become U+FFFD, so a
    /// path that isn't valid UTF-8 comes back altered.
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a shell command line in a working directory
pub trait CommandRunner: Send + Sync {
    /// Run `command` with `working_dir` as its current directory.
    ///
    /// A non-zero exit is returned as a normal [`CommandOutput`]; only a
    /// failure to launch the command (or a timeout) is an error.
    fn run(&self, command: &str, working_dir: &Path) -> Result<CommandOutput>;
}
