use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur while loading, selecting or running scanners
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error in section [{section}]: {kind}")]
    Configuration {
        section: String,
        kind: ConfigErrorKind,
    },

    #[error("Failed to run: \"{command}\" in {}", .working_dir.display())]
    Execution {
        command: String,
        working_dir: PathBuf,
        #[source]
        failure: ExecutionFailure,
    },

    #[error("No scanner is applicable to {}", .path.display())]
    NoStrategy { path: PathBuf },

    #[error("Unknown scanner: {0}")]
    UnknownScanner(String),

    #[error("Failed to read configuration {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration {origin}: {message}")]
    ConfigParse { origin: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What was wrong with a scanner section
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigErrorKind {
    #[error("missing required key 'cmd'")]
    MissingCommand,

    #[error("invalid value {value} for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("a scanner with this name is already registered")]
    DuplicateSection,
}

/// Why an external command did not produce a usable result
#[derive(Debug, thiserror::Error)]
pub enum ExecutionFailure {
    #[error("could not start process: {0}")]
    Spawn(#[source] io::Error),

    #[error("command not found")]
    NotFound,

    #[error("command is not executable")]
    NotExecutable,

    #[error("exited with {}", describe_status(.0))]
    ExitStatus(Option<i32>),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Coarse classification of [`Error`] for callers that branch on the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Execution,
    NoStrategy,
    UnknownScanner,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } | Error::ConfigFile { .. } | Error::ConfigParse { .. } => {
                ErrorKind::Configuration
            }
            Error::Execution { .. } => ErrorKind::Execution,
            Error::NoStrategy { .. } => ErrorKind::NoStrategy,
            Error::UnknownScanner(_) => ErrorKind::UnknownScanner,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn configuration(section: impl Into<String>, kind: ConfigErrorKind) -> Self {
        Error::Configuration {
            section: section.into(),
            kind,
        }
    }

    pub(crate) fn invalid_value(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::configuration(
            section,
            ConfigErrorKind::InvalidValue {
                key: key.into(),
                value: value.into(),
                reason: reason.into(),
            },
        )
    }

    pub(crate) fn execution(
        command: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        failure: ExecutionFailure,
    ) -> Self {
        Error::Execution {
            command: command.into(),
            working_dir: working_dir.into(),
            failure,
        }
    }
}

/// Result type alias for fzsl operations
pub type Result<T> = std::result::Result<T, Error>;
