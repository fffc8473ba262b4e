//! A scanner is one configured way of listing candidate paths
//!
//! It pairs an enumeration command with the rules deciding where it may be
//! used: a detection command, a root directory, or neither (a fallback that
//! fits everywhere).

use crate::command::CommandRunner;
use crate::config::{ConfigSource, KEY_ROOT_PATH, ScannerSection};
use crate::error::{Error, ExecutionFailure, Result};
use crate::utils::path::{canonical_root, canonical_target, has_string_prefix};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Immutable scanner definition.
///
/// Two scanners are equal when command, detection command, priority and
/// canonical root path all match. Ordering is a separate concern, see
/// [`Scanner::cmp_priority`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scanner {
    cmd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detect_cmd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_path: Option<PathBuf>,
    priority: i64,
}

impl Scanner {
    pub fn builder(cmd: impl Into<String>) -> ScannerBuilder {
        ScannerBuilder {
            cmd: cmd.into(),
            detect_cmd: None,
            root_path: None,
            priority: 0,
        }
    }

    /// Build the scanner described by `section` in `source`
    pub fn from_config(section: &str, source: &dyn ConfigSource) -> Result<Self> {
        let record = ScannerSection::read(section, source)?;
        Self::from_section(section, record)
    }

    /// Build a scanner from an already validated section record
    pub fn from_section(name: &str, record: ScannerSection) -> Result<Self> {
        let raw_root = record.root_path.clone();
        let mut builder = Scanner::builder(record.cmd).priority(record.priority.unwrap_or(0));
        if let Some(detect_cmd) = record.detect_cmd {
            builder = builder.detect_cmd(detect_cmd);
        }
        if let Some(root_path) = record.root_path {
            builder = builder.root_path(root_path);
        }

        builder.build().map_err(|e| match (e, raw_root) {
            (Error::Io(io), Some(raw)) => {
                Error::invalid_value(name, KEY_ROOT_PATH, format!("{raw:?}"), io.to_string())
            }
            (other, _) => other,
        })
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn detect_cmd(&self) -> Option<&str> {
        self.detect_cmd.as_deref()
    }

    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Negative priorities opt out of automatic selection
    pub fn is_auto_selectable(&self) -> bool {
        self.priority >= 0
    }

    /// Order by priority alone, lowest first
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }

    /// Directory the enumeration command runs in for `target`
    pub fn working_dir(&self, target: &Path) -> PathBuf {
        self.root_path
            .clone()
            .unwrap_or_else(|| target.to_path_buf())
    }

    /// Whether this scanner may be used for `path`.
    ///
    /// A root path match wins outright. Otherwise the detection command runs in
    /// `path` and a zero exit means suitable. A scanner with neither is suitable
    /// everywhere. Failing to launch the detection command is an error, not a
    /// "no".
    pub fn is_suitable(&self, path: &Path, runner: &dyn CommandRunner) -> Result<bool> {
        if let Some(root) = &self.root_path {
            let target = canonical_target(path)?;
            if has_string_prefix(&target, root) {
                trace!("{} is under root {}", target.display(), root.display());
                return Ok(true);
            }
        }

        if let Some(detect_cmd) = &self.detect_cmd {
            let output = runner.run(detect_cmd, path)?;
            trace!("detect {:?} in {} -> {:?}", detect_cmd, path.display(), output.status);
            if output.success() {
                return Ok(true);
            }
        }

        Ok(self.root_path.is_none() && self.detect_cmd.is_none())
    }

    /// Run the enumeration command and return the candidate paths.
    ///
    /// `path` defaults to the current directory and is ignored when a root path
    /// is configured. Suitability is not re-checked.
    pub fn scan(&self, path: Option<&Path>, runner: &dyn CommandRunner) -> Result<Vec<String>> {
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let cwd = self.working_dir(&target);

        let output = runner.run(&self.cmd, &cwd)?;
        if !output.success() {
            debug!("{:?} failed in {}: {}", self.cmd, cwd.display(), output.stderr.trim());
            return Err(Error::execution(
                &self.cmd,
                cwd,
                ExecutionFailure::ExitStatus(output.status),
            ));
        }

        Ok(split_candidates(&output.stdout))
    }
}

/// Split command output into candidates: whitespace separated, empties dropped
pub fn split_candidates(stdout: &str) -> Vec<String> {
    stdout.split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, Clone)]
pub struct ScannerBuilder {
    cmd: String,
    detect_cmd: Option<String>,
    root_path: Option<String>,
    priority: i64,
}

impl ScannerBuilder {
    pub fn detect_cmd(mut self, detect_cmd: impl Into<String>) -> Self {
        self.detect_cmd = Some(detect_cmd.into());
        self
    }

    /// Root path as written; expanded and resolved by [`ScannerBuilder::build`]
    pub fn root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = Some(root_path.into());
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn build(self) -> Result<Scanner> {
        let root_path = match self.root_path {
            Some(raw) => Some(canonical_root(&raw)?),
            None => None,
        };

        Ok(Scanner {
            cmd: self.cmd,
            detect_cmd: self.detect_cmd,
            root_path,
            priority: self.priority,
        })
    }
}
