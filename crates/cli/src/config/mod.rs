//! Locating and loading the scanner configuration

use anyhow::{Context, Result};
use fzsl_core::config::{ConfigSource, default_source, find_config_file, load_source};
use fzsl_core::{LoadPolicy, RunnerOptions, ScannerRegistry, ShellRunner};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::GlobalArgs;

pub const CONFIG_ENV: &str = "FZSL_CONFIG";

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    BuiltIn,
}

/// Everything a command needs to select and run scanners
pub struct Session {
    pub registry: ScannerRegistry,
    pub runner: ShellRunner,
    pub origin: ConfigOrigin,
}

impl Session {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let env_config = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let origin = resolve_config_path(global.config.as_deref(), env_config)
            .map(ConfigOrigin::File)
            .unwrap_or(ConfigOrigin::BuiltIn);

        let source: Box<dyn ConfigSource> = match &origin {
            ConfigOrigin::File(path) => {
                debug!("Loading scanners from {}", path.display());
                load_source(path)?
            }
            ConfigOrigin::BuiltIn => {
                debug!("No configuration file found, using built-in scanners");
                Box::new(default_source()?)
            }
        };

        let policy = if global.skip_invalid {
            LoadPolicy::SkipInvalid
        } else {
            LoadPolicy::Strict
        };
        let report = ScannerRegistry::load_with_policy(source.as_ref(), policy)
            .with_context(|| format!("Failed to load scanners from {}", describe(&origin)))?;
        for skipped in &report.skipped {
            warn!("Ignored scanner [{}]: {}", skipped.section, skipped.error);
        }

        Ok(Self {
            registry: report.registry,
            runner: ShellRunner::new(runner_options(global.timeout)),
            origin,
        })
    }
}

/// Explicit path, then `$FZSL_CONFIG`, then the first conventional location that exists
pub fn resolve_config_path(explicit: Option<&Path>, env: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or(env.filter(|p| !p.as_os_str().is_empty()))
        .or_else(find_config_file)
}

pub fn runner_options(timeout_secs: u64) -> RunnerOptions {
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));
    RunnerOptions::default().with_timeout(timeout)
}

pub fn describe(origin: &ConfigOrigin) -> String {
    match origin {
        ConfigOrigin::File(path) => path.display().to_string(),
        ConfigOrigin::BuiltIn => "built-in defaults".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let resolved = resolve_config_path(
            Some(Path::new("/etc/fzsl.toml")),
            Some(PathBuf::from("/env/fzsl.toml")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/etc/fzsl.toml")));
    }

    #[test]
    fn test_env_path_used_when_no_flag() {
        let resolved = resolve_config_path(None, Some(PathBuf::from("/env/fzsl.toml")));
        assert_eq!(resolved, Some(PathBuf::from("/env/fzsl.toml")));
    }

    #[test]
    fn test_timeout_zero_disables() {
        assert_eq!(runner_options(0).timeout, None);
        assert_eq!(runner_options(7).timeout, Some(Duration::from_secs(7)));
    }
}
