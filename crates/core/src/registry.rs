//! Scanner registry
//!
//! Holds the configured scanners in configuration order. Built once at startup
//! and only read afterwards.

use crate::config::ConfigSource;
use crate::error::{ConfigErrorKind, Error, Result};
use crate::scanner::Scanner;
use serde::Serialize;
use tracing::{debug, warn};

/// A scanner together with the section name it was defined under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredScanner {
    pub name: String,
    #[serde(flatten)]
    pub scanner: Scanner,
}

/// What to do with a section that doesn't describe a valid scanner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Fail the whole load on the first invalid section
    #[default]
    Strict,
    /// Leave invalid sections out and report them in [`LoadReport::skipped`]
    SkipInvalid,
}

#[derive(Debug)]
pub struct SkippedSection {
    pub section: String,
    pub error: Error,
}

#[derive(Debug)]
pub struct LoadReport {
    pub registry: ScannerRegistry,
    pub skipped: Vec<SkippedSection>,
}

#[derive(Debug, Clone, Default)]
pub struct ScannerRegistry {
    entries: Vec<RegisteredScanner>,
}

impl ScannerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every section of `source`, failing on the first invalid one
    pub fn load(source: &dyn ConfigSource) -> Result<Self> {
        Self::load_with_policy(source, LoadPolicy::Strict).map(|report| report.registry)
    }

    pub fn load_with_policy(source: &dyn ConfigSource, policy: LoadPolicy) -> Result<LoadReport> {
        let mut registry = Self::new();
        let mut skipped = Vec::new();

        for section in source.sections() {
            let loaded = Scanner::from_config(&section, source)
                .and_then(|scanner| registry.register(&section, scanner));

            match (loaded, policy) {
                (Ok(()), _) => debug!("Registered scanner [{}]", section),
                (Err(e), LoadPolicy::Strict) => return Err(e),
                (Err(e), LoadPolicy::SkipInvalid) => {
                    warn!("Skipping scanner [{}]: {}", section, e);
                    skipped.push(SkippedSection { section, error: e });
                }
            }
        }

        Ok(LoadReport { registry, skipped })
    }

    /// Register a scanner under `name`; names must be unique
    pub fn register(&mut self, name: &str, scanner: Scanner) -> Result<()> {
        if self.contains(name) {
            return Err(Error::configuration(name, ConfigErrorKind::DuplicateSection));
        }
        self.entries.push(RegisteredScanner {
            name: name.to_string(),
            scanner,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredScanner> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Scanners in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredScanner> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Scanners sorted by ascending priority, configuration order within a tie
    pub fn by_priority(&self) -> Vec<&RegisteredScanner> {
        let mut sorted: Vec<&RegisteredScanner> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.scanner.cmp_priority(&b.scanner));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
