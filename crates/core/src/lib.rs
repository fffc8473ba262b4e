//! fzsl-core - scanner selection and path enumeration
//!
//! This crate provides functionality to:
//! - Load scanner definitions from section based configuration
//! - Decide which scanner applies to a directory (root path, detection command, priority)
//! - Run the chosen scanner's command and turn its output into candidate paths
pub mod command;
pub mod config;
pub mod error;
pub mod registry;
pub mod scanner;
pub mod selector;
pub mod utils;

// Re-export commonly used types
pub use command::{CommandOutput, CommandRunner, RunnerOptions, ShellRunner};
pub use config::{ConfigSource, ConfigValue, JsonSource, MapSource, TomlSource};
pub use error::{ConfigErrorKind, Error, ErrorKind, ExecutionFailure, Result};
pub use registry::{LoadPolicy, LoadReport, RegisteredScanner, ScannerRegistry};
pub use scanner::{Scanner, ScannerBuilder};
pub use selector::{ScanOutcome, SelectionMode, Selector};
