//! Picks the scanner to use for a directory and runs it

use crate::command::CommandRunner;
use crate::error::{Error, Result};
use crate::registry::{RegisteredScanner, ScannerRegistry};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which scanners take part in automatic selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Only scanners with a non-negative priority
    #[default]
    Automatic,
    /// Every registered scanner, negative priorities included
    IncludeDisabled,
}

/// Result of a completed scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub scanner: String,
    pub working_dir: PathBuf,
    pub candidates: Vec<String>,
}

pub struct Selector<'a> {
    registry: &'a ScannerRegistry,
    runner: &'a dyn CommandRunner,
    mode: SelectionMode,
}

impl<'a> Selector<'a> {
    pub fn new(registry: &'a ScannerRegistry, runner: &'a dyn CommandRunner) -> Self {
        Self {
            registry,
            runner,
            mode: SelectionMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Eligible scanners, highest priority first, ties in registration order
    fn candidates(&self) -> Vec<&'a RegisteredScanner> {
        let registry: &'a ScannerRegistry = self.registry;
        let mut candidates: Vec<&'a RegisteredScanner> = registry
            .iter()
            .filter(|entry| {
                self.mode == SelectionMode::IncludeDisabled || entry.scanner.is_auto_selectable()
            })
            .collect();
        candidates.sort_by(|a, b| b.scanner.cmp_priority(&a.scanner));
        candidates
    }

    /// The highest priority scanner suitable for `target`.
    ///
    /// Candidates are tried best first, so detection commands of scanners that
    /// could not win are never run.
    pub fn select(&self, target: &Path) -> Result<&'a RegisteredScanner> {
        for entry in self.candidates() {
            if entry.scanner.is_suitable(target, self.runner)? {
                debug!("Selected scanner [{}] for {}", entry.name, target.display());
                return Ok(entry);
            }
        }

        Err(Error::NoStrategy {
            path: target.to_path_buf(),
        })
    }

    /// Every suitable scanner for `target`, in selection order
    pub fn applicable(&self, target: &Path) -> Result<Vec<&'a RegisteredScanner>> {
        let mut applicable = Vec::new();
        for entry in self.candidates() {
            if entry.scanner.is_suitable(target, self.runner)? {
                applicable.push(entry);
            }
        }
        Ok(applicable)
    }

    /// Look a scanner up by name, bypassing detection and priority
    pub fn select_by_name(&self, name: &str) -> Result<&'a RegisteredScanner> {
        let registry: &'a ScannerRegistry = self.registry;
        registry
            .get(name)
            .ok_or_else(|| Error::UnknownScanner(name.to_string()))
    }

    /// Select a scanner for `target` (default: current directory) and run it
    pub fn scan(&self, target: Option<&Path>) -> Result<ScanOutcome> {
        let target = resolve_target(target)?;
        let entry = self.select(&target)?;
        self.run(entry, &target)
    }

    /// Run the scanner called `name` without checking its suitability
    pub fn scan_with(&self, name: &str, target: Option<&Path>) -> Result<ScanOutcome> {
        let target = resolve_target(target)?;
        let entry = self.select_by_name(name)?;
        self.run(entry, &target)
    }

    fn run(&self, entry: &RegisteredScanner, target: &Path) -> Result<ScanOutcome> {
        let candidates = entry.scanner.scan(Some(target), self.runner)?;
        debug!("[{}] produced {} candidates", entry.name, candidates.len());

        Ok(ScanOutcome {
            scanner: entry.name.clone(),
            working_dir: entry.scanner.working_dir(target),
            candidates,
        })
    }
}

fn resolve_target(target: Option<&Path>) -> Result<PathBuf> {
    match target {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}
