use super::source::{ConfigSource, ConfigValue};
use crate::error::{Error, Result};
use std::path::Path;

/// TOML configuration where every top-level table is a scanner section
///
/// ```toml
/// [git]
/// cmd = "git ls-files"
/// detect_cmd = "git rev-parse --is-inside-work-tree"
/// priority = 10
/// ```
#[derive(Debug, Clone)]
pub struct TomlSource {
    table: toml::Table,
}

impl TomlSource {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse TOML text; `origin` names the text in error messages
    pub fn parse(contents: &str, origin: &str) -> Result<Self> {
        let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| Error::ConfigParse {
            origin: origin.to_string(),
            message: e.message().to_string(),
        })?;

        if let Some((key, value)) = table.iter().find(|(_, v)| !v.is_table()) {
            return Err(Error::ConfigParse {
                origin: origin.to_string(),
                message: format!(
                    "top-level key '{key}' is a {}, expected a [section]",
                    value.type_str()
                ),
            });
        }

        Ok(Self { table })
    }
}

impl ConfigSource for TomlSource {
    fn sections(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }

    fn get(&self, section: &str, key: &str) -> Option<ConfigValue> {
        let value = self.table.get(section)?.as_table()?.get(key)?;
        Some(match value {
            toml::Value::String(s) => ConfigValue::String(s.clone()),
            toml::Value::Integer(i) => ConfigValue::Integer(*i),
            other => ConfigValue::Other {
                type_name: other.type_str().to_string(),
                text: other.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_sections_keep_file_order() {
        let source = TomlSource::parse(
            r#"
[zeta]
cmd = "ls"

[alpha]
cmd = "find ."
priority = -1

[mid]
cmd = "git ls-files"
"#,
            "test.toml",
        )
        .unwrap();

        assert_eq!(source.sections(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(source.get("alpha", "priority"), Some(ConfigValue::Integer(-1)));
        assert_eq!(source.get("zeta", "cmd"), Some("ls".into()));
        assert!(!source.has_option("zeta", "detect_cmd"));
    }

    #[test]
    fn test_non_scalar_values_are_reported_as_other() {
        let source = TomlSource::parse("[x]\ncmd = [\"ls\"]\n", "test.toml").unwrap();
        match source.get("x", "cmd") {
            Some(ConfigValue::Other { type_name, .. }) => assert_eq!(type_name, "array"),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_top_level_scalar_is_rejected() {
        let err = TomlSource::parse("cmd = \"ls\"\n", "fzsl.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("top-level key 'cmd'"));
    }

    #[test]
    fn test_syntax_error() {
        let err = TomlSource::parse("[broken\ncmd = ", "fzsl.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { ref origin, .. } if origin == "fzsl.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = TomlSource::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigFile { .. }));
    }
}
