//! Configuration sources for scanner definitions

mod defaults;
mod json_source;
mod section;
mod source;
mod toml_source;

pub use defaults::{DEFAULT_CONFIG, default_source};
pub use json_source::JsonSource;
pub use section::{KEY_CMD, KEY_DETECT_CMD, KEY_PRIORITY, KEY_ROOT_PATH, ScannerSection};
pub use source::{ConfigSource, ConfigValue, MapSource};
pub use toml_source::TomlSource;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Load a configuration file, picking the format from its extension.
///
/// `.json` files are read as JSON, everything else as TOML.
pub fn load_source(path: &Path) -> Result<Box<dyn ConfigSource>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Ok(Box::new(JsonSource::load(path)?))
    } else {
        Ok(Box::new(TomlSource::load(path)?))
    }
}

/// Conventional configuration file locations, most preferred first
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fzsl").join("fzsl.toml"));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fzsl.toml"));
        paths.push(home.join(".fzsl.json"));
    }
    paths
}

/// First existing file among [`default_config_paths`]
pub fn find_config_file() -> Option<PathBuf> {
    default_config_paths().into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_source_by_extension() {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("fzsl.toml");
        let json_path = dir.path().join("fzsl.JSON");
        fs::write(&toml_path, "[a]\ncmd = \"ls\"\n").unwrap();
        fs::write(&json_path, r#"{"b": {"cmd": "find ."}}"#).unwrap();

        assert_eq!(load_source(&toml_path).unwrap().sections(), vec!["a"]);
        assert_eq!(load_source(&json_path).unwrap().sections(), vec!["b"]);
    }

    #[test]
    fn test_json_content_in_toml_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fzsl.conf");
        fs::write(&path, r#"{"b": {"cmd": "find ."}}"#).unwrap();

        assert!(load_source(&path).is_err());
    }
}
