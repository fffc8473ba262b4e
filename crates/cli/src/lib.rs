pub mod cli;
pub mod commands;
pub mod config;
pub mod display;

// Re-export commonly used items
pub use cli::{Cli, Commands, GlobalArgs};

use fzsl_core::ErrorKind;

/// Process exit code for a failed command
///
/// 2 configuration, 3 command execution, 4 no applicable scanner, 1 anything else.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<fzsl_core::Error>().map(fzsl_core::Error::kind) {
        Some(ErrorKind::Configuration) => 2,
        Some(ErrorKind::Execution) => 3,
        Some(ErrorKind::NoStrategy) => 4,
        Some(ErrorKind::UnknownScanner) => 2,
        Some(ErrorKind::Io) | None => 1,
    }
}
